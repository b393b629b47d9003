use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::post;
use crate::{errors::ServiceError, pagination::Pagination};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub author: String,
}

fn post_not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Post not found with id: {id}"))
}

pub async fn create_post(db: &DatabaseConnection, input: &PostInput) -> Result<post::Model, ServiceError> {
    let created = post::create(db, &input.title, &input.content, &input.author).await?;
    info!(post_id = created.id, "post_created");
    Ok(created)
}

pub async fn list_posts(db: &DatabaseConnection, page: Option<Pagination>) -> Result<Vec<post::Model>, ServiceError> {
    let select = post::Entity::find().order_by_asc(post::Column::Id);
    let rows = match page {
        Some(p) => {
            let (page_idx, per_page) = p.normalize();
            select.paginate(db, per_page).fetch_page(page_idx).await?
        }
        None => select.all(db).await?,
    };
    Ok(rows)
}

pub async fn get_post(db: &DatabaseConnection, id: i32) -> Result<post::Model, ServiceError> {
    post::Entity::find_by_id(id).one(db).await?.ok_or_else(|| post_not_found(id))
}

pub async fn update_post(db: &DatabaseConnection, id: i32, input: &PostInput) -> Result<post::Model, ServiceError> {
    post::validate(&input.title, &input.content, &input.author)?;
    let mut am: post::ActiveModel = get_post(db, id).await?.into();
    am.title = Set(input.title.trim().to_string());
    am.content = Set(input.content.clone());
    am.author = Set(input.author.trim().to_string());
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}

pub async fn delete_post(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = post::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(post_not_found(id));
    }
    Ok(())
}

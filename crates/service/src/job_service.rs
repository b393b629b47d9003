use chrono::{DateTime, FixedOffset};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::job;
use crate::{errors::ServiceError, pagination::Pagination};

/// Create/update body for a job posting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobInput {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: Option<f64>,
    pub posted_at: Option<DateTime<FixedOffset>>,
}

/// List jobs by id, one page when `page` is given.
pub async fn list_jobs(db: &DatabaseConnection, page: Option<Pagination>) -> Result<Vec<job::Model>, ServiceError> {
    let select = job::Entity::find().order_by_asc(job::Column::Id);
    let rows = match page {
        Some(p) => {
            let (page_idx, per_page) = p.normalize();
            select.paginate(db, per_page).fetch_page(page_idx).await?
        }
        None => select.all(db).await?,
    };
    Ok(rows)
}

pub async fn get_job(db: &DatabaseConnection, id: i32) -> Result<Option<job::Model>, ServiceError> {
    Ok(job::Entity::find_by_id(id).one(db).await?)
}

pub async fn create_job(db: &DatabaseConnection, input: &JobInput) -> Result<job::Model, ServiceError> {
    let created = job::create(
        db,
        &input.title,
        &input.description,
        &input.company,
        &input.location,
        input.salary,
        input.posted_at,
    )
    .await?;
    info!(job_id = created.id, company = %created.company, "job_created");
    Ok(created)
}

/// Replace every field of an existing job; `postedAt` is kept when omitted.
pub async fn update_job(db: &DatabaseConnection, id: i32, input: &JobInput) -> Result<job::Model, ServiceError> {
    let salary = job::validate(&input.title, &input.description, &input.company, &input.location, input.salary)?;
    let mut am: job::ActiveModel = job::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Job"))?
        .into();
    am.title = Set(input.title.trim().to_string());
    am.description = Set(input.description.clone());
    am.company = Set(input.company.trim().to_string());
    am.location = Set(input.location.trim().to_string());
    am.salary = Set(salary);
    if let Some(posted_at) = input.posted_at {
        am.posted_at = Set(posted_at);
    }
    Ok(am.update(db).await?)
}

pub async fn delete_job(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = job::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Job"));
    }
    info!(job_id = id, "job_deleted");
    Ok(())
}

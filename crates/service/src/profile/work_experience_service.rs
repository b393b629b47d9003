use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

use models::db::contains_ci;
use models::work_experience;

use super::domain::WorkExperienceDto;
use super::profile_service::{find_profile, refresh_completion};
use crate::errors::ServiceError;

async fn find_owned(db: &DatabaseConnection, user_id: i32, id: i32) -> Result<work_experience::Model, ServiceError> {
    work_experience::Entity::find_by_id(id)
        .filter(work_experience::Column::UserProfileId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Work experience"))
}

async fn list_where(
    db: &DatabaseConnection,
    user_id: i32,
    extra: Option<sea_orm::sea_query::SimpleExpr>,
) -> Result<Vec<WorkExperienceDto>, ServiceError> {
    find_profile(db, user_id).await?;
    let mut select = work_experience::Entity::find().filter(work_experience::Column::UserProfileId.eq(user_id));
    if let Some(expr) = extra {
        select = select.filter(expr);
    }
    let rows = select
        .order_by_desc(work_experience::Column::StartDate)
        .order_by_asc(work_experience::Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(WorkExperienceDto::from).collect())
}

/// Apply a validated body; a current position never keeps an end date.
fn apply(am: &mut work_experience::ActiveModel, input: &WorkExperienceDto, start: NaiveDate) {
    am.company = Set(input.company.trim().to_string());
    am.position = Set(input.title.trim().to_string());
    am.location = Set(input.location.clone());
    am.description = Set(input.description.clone());
    am.start_date = Set(start);
    am.end_date = Set(if input.is_current_position { None } else { input.end_date });
    am.current_position = Set(input.is_current_position);
    am.industry = Set(input.industry.clone());
    am.employment_type = Set(input.employment_type.clone());
    am.skills_used = Set(input.skills_used.clone());
}

pub async fn list_work_experience(db: &DatabaseConnection, user_id: i32) -> Result<Vec<WorkExperienceDto>, ServiceError> {
    list_where(db, user_id, None).await
}

pub async fn get_work_experience(db: &DatabaseConnection, user_id: i32, id: i32) -> Result<WorkExperienceDto, ServiceError> {
    Ok(find_owned(db, user_id, id).await?.into())
}

pub async fn create_work_experience(db: &DatabaseConnection, user_id: i32, input: &WorkExperienceDto) -> Result<WorkExperienceDto, ServiceError> {
    let profile = find_profile(db, user_id).await?;
    let start = work_experience::validate(&input.company, &input.title, input.start_date, input.end_date)?;
    let mut am = work_experience::ActiveModel { user_profile_id: Set(user_id), ..Default::default() };
    apply(&mut am, input, start);
    let created = am.insert(db).await?;
    refresh_completion(db, profile).await?;
    info!(profile_id = user_id, work_experience_id = created.id, "work_experience_added");
    Ok(created.into())
}

pub async fn update_work_experience(db: &DatabaseConnection, user_id: i32, id: i32, input: &WorkExperienceDto) -> Result<WorkExperienceDto, ServiceError> {
    let start = work_experience::validate(&input.company, &input.title, input.start_date, input.end_date)?;
    let mut am: work_experience::ActiveModel = find_owned(db, user_id, id).await?.into();
    apply(&mut am, input, start);
    Ok(am.update(db).await?.into())
}

pub async fn delete_work_experience(db: &DatabaseConnection, user_id: i32, id: i32) -> Result<(), ServiceError> {
    find_owned(db, user_id, id).await?;
    work_experience::Entity::delete_by_id(id).exec(db).await?;
    let profile = find_profile(db, user_id).await?;
    refresh_completion(db, profile).await?;
    Ok(())
}

pub async fn by_company(db: &DatabaseConnection, user_id: i32, company: &str) -> Result<Vec<WorkExperienceDto>, ServiceError> {
    list_where(db, user_id, Some(contains_ci(work_experience::Column::Company, company))).await
}

pub async fn current_positions(db: &DatabaseConnection, user_id: i32) -> Result<Vec<WorkExperienceDto>, ServiceError> {
    list_where(db, user_id, Some(work_experience::Column::CurrentPosition.eq(true))).await
}

pub async fn mark_as_current(db: &DatabaseConnection, user_id: i32, id: i32) -> Result<WorkExperienceDto, ServiceError> {
    let mut am: work_experience::ActiveModel = find_owned(db, user_id, id).await?.into();
    am.current_position = Set(true);
    am.end_date = Set(None);
    Ok(am.update(db).await?.into())
}

pub async fn end_position(db: &DatabaseConnection, user_id: i32, id: i32, end_date: NaiveDate) -> Result<WorkExperienceDto, ServiceError> {
    let existing = find_owned(db, user_id, id).await?;
    if end_date < existing.start_date {
        return Err(ServiceError::validation("End date must not be before start date"));
    }
    let mut am: work_experience::ActiveModel = existing.into();
    am.current_position = Set(false);
    am.end_date = Set(Some(end_date));
    Ok(am.update(db).await?.into())
}

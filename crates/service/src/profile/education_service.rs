use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use models::db::contains_ci;
use models::education;

use super::domain::EducationDto;
use super::profile_service::find_profile;
use crate::errors::ServiceError;

async fn find_owned(db: &DatabaseConnection, user_id: i32, id: i32) -> Result<education::Model, ServiceError> {
    education::Entity::find_by_id(id)
        .filter(education::Column::UserProfileId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Education"))
}

async fn list_where(
    db: &DatabaseConnection,
    user_id: i32,
    extra: Option<sea_orm::sea_query::SimpleExpr>,
) -> Result<Vec<EducationDto>, ServiceError> {
    find_profile(db, user_id).await?;
    let mut select = education::Entity::find().filter(education::Column::UserProfileId.eq(user_id));
    if let Some(expr) = extra {
        select = select.filter(expr);
    }
    let rows = select
        .order_by_desc(education::Column::StartDate)
        .order_by_asc(education::Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(EducationDto::from).collect())
}

fn apply(am: &mut education::ActiveModel, input: &EducationDto, start: chrono::NaiveDate) -> Result<(), ServiceError> {
    if let Some(end) = input.end_date {
        if end < start {
            return Err(ServiceError::validation("End date must not be before start date"));
        }
    }
    am.institution = Set(input.institution.trim().to_string());
    am.degree = Set(input.degree.trim().to_string());
    am.field_of_study = Set(input.field_of_study.trim().to_string());
    am.location = Set(input.location.clone());
    am.description = Set(input.description.clone());
    am.start_date = Set(start);
    am.end_date = Set(input.end_date);
    am.current_education = Set(input.current_education);
    am.grade = Set(input.grade.clone());
    am.activities = Set(input.activities.clone());
    am.achievements = Set(input.achievements.clone());
    Ok(())
}

pub async fn list_education(db: &DatabaseConnection, user_id: i32) -> Result<Vec<EducationDto>, ServiceError> {
    list_where(db, user_id, None).await
}

pub async fn get_education(db: &DatabaseConnection, user_id: i32, id: i32) -> Result<EducationDto, ServiceError> {
    Ok(find_owned(db, user_id, id).await?.into())
}

pub async fn create_education(db: &DatabaseConnection, user_id: i32, input: &EducationDto) -> Result<EducationDto, ServiceError> {
    find_profile(db, user_id).await?;
    let start = education::validate(&input.institution, &input.degree, &input.field_of_study, input.start_date)?;
    let mut am = education::ActiveModel { user_profile_id: Set(user_id), ..Default::default() };
    apply(&mut am, input, start)?;
    Ok(am.insert(db).await?.into())
}

pub async fn update_education(db: &DatabaseConnection, user_id: i32, id: i32, input: &EducationDto) -> Result<EducationDto, ServiceError> {
    let start = education::validate(&input.institution, &input.degree, &input.field_of_study, input.start_date)?;
    let mut am: education::ActiveModel = find_owned(db, user_id, id).await?.into();
    apply(&mut am, input, start)?;
    Ok(am.update(db).await?.into())
}

pub async fn delete_education(db: &DatabaseConnection, user_id: i32, id: i32) -> Result<(), ServiceError> {
    find_owned(db, user_id, id).await?;
    education::Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}

pub async fn by_institution(db: &DatabaseConnection, user_id: i32, institution: &str) -> Result<Vec<EducationDto>, ServiceError> {
    list_where(db, user_id, Some(contains_ci(education::Column::Institution, institution))).await
}

pub async fn by_degree(db: &DatabaseConnection, user_id: i32, degree: &str) -> Result<Vec<EducationDto>, ServiceError> {
    list_where(db, user_id, Some(contains_ci(education::Column::Degree, degree))).await
}

pub async fn by_field_of_study(db: &DatabaseConnection, user_id: i32, field: &str) -> Result<Vec<EducationDto>, ServiceError> {
    list_where(db, user_id, Some(contains_ci(education::Column::FieldOfStudy, field))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::profile::domain::CreateProfile;
    use crate::profile::profile_service::{create_profile, get_completion};
    use crate::test_support::get_db;

    fn school(institution: &str, degree: &str, field: &str) -> EducationDto {
        EducationDto {
            institution: institution.into(),
            degree: degree.into(),
            field_of_study: field.into(),
            start_date: NaiveDate::from_ymd_opt(2010, 9, 1),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn education_crud_and_filters() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let uid = create_profile(&db, &CreateProfile { first_name: "Tim".into(), last_name: "Lee".into(), ..Default::default() })
            .await?
            .id;
        assert!(get_completion(&db, uid).await?.missing_fields.contains(&"education".to_string()));

        let e = create_education(&db, uid, &school("Oxford", "BA", "Physics")).await?;
        create_education(&db, uid, &school("MIT", "PhD", "Computer Science")).await?;
        assert!(!get_completion(&db, uid).await?.missing_fields.contains(&"education".to_string()));

        assert_eq!(by_institution(&db, uid, "oxf").await?.len(), 1);
        assert_eq!(by_degree(&db, uid, "phd").await?.len(), 1);
        assert_eq!(by_field_of_study(&db, uid, "SCIENCE").await?[0].institution, "MIT");

        let mut changed = school("Oxford", "MA", "Physics");
        changed.grade = Some("First".into());
        let updated = update_education(&db, uid, e.id.unwrap(), &changed).await?;
        assert_eq!(updated.degree, "MA");

        delete_education(&db, uid, e.id.unwrap()).await?;
        assert_eq!(list_education(&db, uid).await?.len(), 1);
        assert!(matches!(get_education(&db, uid, e.id.unwrap()).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn required_fields() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let uid = create_profile(&db, &CreateProfile { first_name: "A".into(), last_name: "B".into(), ..Default::default() })
            .await?
            .id;
        let err = create_education(&db, uid, &school("Oxford", "BA", "")).await.unwrap_err();
        assert_eq!(err.to_string(), "Field of study is required");
        let mut no_start = school("Oxford", "BA", "Physics");
        no_start.start_date = None;
        assert_eq!(create_education(&db, uid, &no_start).await.unwrap_err().to_string(), "Start date is required");
        Ok(())
    }
}

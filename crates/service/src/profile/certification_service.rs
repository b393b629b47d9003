use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

use models::certification;
use models::db::contains_ci;

use super::domain::CertificationDto;
use super::profile_service::find_profile;
use crate::errors::ServiceError;

/// Window for `expiring_soon`, in days from today.
pub const EXPIRING_SOON_DAYS: i64 = 30;

async fn find_owned(db: &DatabaseConnection, user_id: i32, id: i32) -> Result<certification::Model, ServiceError> {
    certification::Entity::find_by_id(id)
        .filter(certification::Column::UserProfileId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Certification"))
}

async fn rows_for(
    db: &DatabaseConnection,
    user_id: i32,
    extra: Option<sea_orm::sea_query::SimpleExpr>,
) -> Result<Vec<certification::Model>, ServiceError> {
    find_profile(db, user_id).await?;
    let mut select = certification::Entity::find().filter(certification::Column::UserProfileId.eq(user_id));
    if let Some(expr) = extra {
        select = select.filter(expr);
    }
    Ok(select
        .order_by_desc(certification::Column::IssueDate)
        .order_by_asc(certification::Column::Id)
        .all(db)
        .await?)
}

fn to_dtos(rows: impl IntoIterator<Item = certification::Model>) -> Vec<CertificationDto> {
    rows.into_iter().map(CertificationDto::from).collect()
}

fn apply(am: &mut certification::ActiveModel, input: &CertificationDto, issued: NaiveDate) -> Result<(), ServiceError> {
    if let Some(expiry) = input.expiry_date {
        if expiry < issued {
            return Err(ServiceError::validation("Expiration date must not be before issue date"));
        }
    }
    am.name = Set(input.name.trim().to_string());
    am.issuing_organization = Set(input.issuing_organization.trim().to_string());
    am.credential_id = Set(input.credential_id.clone());
    am.credential_url = Set(input.credential_url.clone());
    am.issue_date = Set(issued);
    am.expiration_date = Set(input.expiry_date);
    am.does_not_expire = Set(input.does_not_expire);
    am.description = Set(input.description.clone());
    am.skills = Set(input.skills.clone());
    Ok(())
}

pub async fn list_certifications(db: &DatabaseConnection, user_id: i32) -> Result<Vec<CertificationDto>, ServiceError> {
    Ok(to_dtos(rows_for(db, user_id, None).await?))
}

pub async fn get_certification(db: &DatabaseConnection, user_id: i32, id: i32) -> Result<CertificationDto, ServiceError> {
    Ok(find_owned(db, user_id, id).await?.into())
}

pub async fn create_certification(db: &DatabaseConnection, user_id: i32, input: &CertificationDto) -> Result<CertificationDto, ServiceError> {
    find_profile(db, user_id).await?;
    let issued = certification::validate(&input.name, &input.issuing_organization, input.issue_date)?;
    let mut am = certification::ActiveModel { user_profile_id: Set(user_id), ..Default::default() };
    apply(&mut am, input, issued)?;
    Ok(am.insert(db).await?.into())
}

pub async fn update_certification(db: &DatabaseConnection, user_id: i32, id: i32, input: &CertificationDto) -> Result<CertificationDto, ServiceError> {
    let issued = certification::validate(&input.name, &input.issuing_organization, input.issue_date)?;
    let mut am: certification::ActiveModel = find_owned(db, user_id, id).await?.into();
    apply(&mut am, input, issued)?;
    Ok(am.update(db).await?.into())
}

pub async fn delete_certification(db: &DatabaseConnection, user_id: i32, id: i32) -> Result<(), ServiceError> {
    find_owned(db, user_id, id).await?;
    certification::Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}

pub async fn by_organization(db: &DatabaseConnection, user_id: i32, organization: &str) -> Result<Vec<CertificationDto>, ServiceError> {
    Ok(to_dtos(rows_for(db, user_id, Some(contains_ci(certification::Column::IssuingOrganization, organization))).await?))
}

pub async fn by_name(db: &DatabaseConnection, user_id: i32, name: &str) -> Result<Vec<CertificationDto>, ServiceError> {
    Ok(to_dtos(rows_for(db, user_id, Some(contains_ci(certification::Column::Name, name))).await?))
}

pub async fn valid_on(db: &DatabaseConnection, user_id: i32, today: NaiveDate) -> Result<Vec<CertificationDto>, ServiceError> {
    let rows = rows_for(db, user_id, None).await?;
    Ok(to_dtos(rows.into_iter().filter(|c| c.is_valid_on(today))))
}

pub async fn expired_on(db: &DatabaseConnection, user_id: i32, today: NaiveDate) -> Result<Vec<CertificationDto>, ServiceError> {
    let rows = rows_for(db, user_id, None).await?;
    Ok(to_dtos(rows.into_iter().filter(|c| c.is_expired_on(today))))
}

pub async fn expiring_soon(db: &DatabaseConnection, user_id: i32, today: NaiveDate) -> Result<Vec<CertificationDto>, ServiceError> {
    let rows = rows_for(db, user_id, None).await?;
    Ok(to_dtos(rows.into_iter().filter(|c| c.expires_within(today, EXPIRING_SOON_DAYS))))
}

/// Set a new expiration date; a renewed certification expires again.
pub async fn renew(db: &DatabaseConnection, user_id: i32, id: i32, new_expiration: NaiveDate) -> Result<CertificationDto, ServiceError> {
    let existing = find_owned(db, user_id, id).await?;
    if new_expiration < existing.issue_date {
        return Err(ServiceError::validation("Expiration date must not be before issue date"));
    }
    let mut am: certification::ActiveModel = existing.into();
    am.expiration_date = Set(Some(new_expiration));
    am.does_not_expire = Set(false);
    let renewed = am.update(db).await?;
    info!(profile_id = user_id, certification_id = id, %new_expiration, "certification_renewed");
    Ok(renewed.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::domain::CreateProfile;
    use crate::profile::profile_service::create_profile;
    use crate::test_support::get_db;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, day).unwrap() }

    fn cert(name: &str, expiry: Option<NaiveDate>, does_not_expire: bool) -> CertificationDto {
        CertificationDto {
            name: name.into(),
            issuing_organization: "Cloud Native Computing Foundation".into(),
            issue_date: Some(d(2023, 1, 1)),
            expiry_date: expiry,
            does_not_expire,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn validity_filters_and_renewal() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let uid = create_profile(&db, &CreateProfile { first_name: "K".into(), last_name: "H".into(), ..Default::default() })
            .await?
            .id;
        let today = d(2024, 6, 1);
        let expired = create_certification(&db, uid, &cert("CKA", Some(d(2024, 5, 1)), false)).await?;
        create_certification(&db, uid, &cert("CKAD", Some(d(2024, 6, 15)), false)).await?;
        create_certification(&db, uid, &cert("CKS", None, true)).await?;

        assert_eq!(valid_on(&db, uid, today).await?.len(), 2);
        assert_eq!(expired_on(&db, uid, today).await?[0].name, "CKA");
        assert_eq!(expiring_soon(&db, uid, today).await?[0].name, "CKAD");
        assert_eq!(by_name(&db, uid, "ck").await?.len(), 3);
        assert_eq!(by_organization(&db, uid, "native").await?.len(), 3);

        let renewed = renew(&db, uid, expired.id.unwrap(), d(2026, 5, 1)).await?;
        assert_eq!(renewed.expiry_date, Some(d(2026, 5, 1)));
        assert!(!renewed.does_not_expire);
        assert!(expired_on(&db, uid, today).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn crud_and_validation() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let uid = create_profile(&db, &CreateProfile { first_name: "K".into(), last_name: "H".into(), ..Default::default() })
            .await?
            .id;
        let err = create_certification(&db, uid, &cert("", None, false)).await.unwrap_err();
        assert_eq!(err.to_string(), "Certification name is required");
        let backwards = cert("CKA", Some(d(2022, 1, 1)), false);
        assert!(create_certification(&db, uid, &backwards).await.unwrap_err().is_client_error());

        let c = create_certification(&db, uid, &cert("CKA", None, false)).await?;
        let updated = update_certification(&db, uid, c.id.unwrap(), &cert("CKA v2", None, true)).await?;
        assert_eq!(updated.name, "CKA v2");
        delete_certification(&db, uid, c.id.unwrap()).await?;
        assert!(list_certifications(&db, uid).await?.is_empty());
        assert_eq!(
            get_certification(&db, uid, c.id.unwrap()).await.unwrap_err().to_string(),
            "Certification not found"
        );
        Ok(())
    }
}

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{info, instrument};

use models::db::contains_ci;
use models::{certification, education, user_profile, user_skill, work_experience};

use super::completion::{self, OwnedCounts};
use super::domain::{CreateProfile, PrivacySettings, ProfileCompletion, ProfileSearch, UpdateProfile, UserProfileDto};
use crate::errors::ServiceError;

/// Load a profile row or fail with 404.
pub async fn find_profile<C: ConnectionTrait>(db: &C, id: i32) -> Result<user_profile::Model, ServiceError> {
    user_profile::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("User profile"))
}

async fn skills_of<C: ConnectionTrait>(db: &C, profile_id: i32) -> Result<Vec<String>, ServiceError> {
    let rows = user_skill::Entity::find()
        .filter(user_skill::Column::UserProfileId.eq(profile_id))
        .order_by_asc(user_skill::Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|s| s.skill).collect())
}

async fn to_dto(db: &DatabaseConnection, profile: user_profile::Model) -> Result<UserProfileDto, ServiceError> {
    let skills = skills_of(db, profile.id).await?;
    Ok(UserProfileDto::from_model(profile, skills))
}

/// Batch conversion: one skill query for the whole list.
async fn to_dtos(db: &DatabaseConnection, profiles: Vec<user_profile::Model>) -> Result<Vec<UserProfileDto>, ServiceError> {
    if profiles.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i32> = profiles.iter().map(|p| p.id).collect();
    let mut by_profile: HashMap<i32, Vec<String>> = HashMap::new();
    let rows = user_skill::Entity::find()
        .filter(user_skill::Column::UserProfileId.is_in(ids))
        .order_by_asc(user_skill::Column::Id)
        .all(db)
        .await?;
    for row in rows {
        by_profile.entry(row.user_profile_id).or_default().push(row.skill);
    }
    Ok(profiles
        .into_iter()
        .map(|p| {
            let skills = by_profile.remove(&p.id).unwrap_or_default();
            UserProfileDto::from_model(p, skills)
        })
        .collect())
}

async fn owned_counts<C: ConnectionTrait>(db: &C, profile_id: i32) -> Result<OwnedCounts, ServiceError> {
    let skills = user_skill::Entity::find()
        .filter(user_skill::Column::UserProfileId.eq(profile_id))
        .count(db)
        .await?;
    let work_experience = work_experience::Entity::find()
        .filter(work_experience::Column::UserProfileId.eq(profile_id))
        .count(db)
        .await?;
    let education = education::Entity::find()
        .filter(education::Column::UserProfileId.eq(profile_id))
        .count(db)
        .await?;
    Ok(OwnedCounts { skills, work_experience, education })
}

/// Recompute and persist the completion percentage when it changed.
pub async fn refresh_completion<C: ConnectionTrait>(db: &C, profile: user_profile::Model) -> Result<user_profile::Model, ServiceError> {
    let counts = owned_counts(db, profile.id).await?;
    let pct = completion::percentage(&profile, &counts);
    if pct == profile.profile_completion_percentage {
        return Ok(profile);
    }
    let mut am: user_profile::ActiveModel = profile.into();
    am.profile_completion_percentage = Set(pct);
    Ok(am.update(db).await?)
}

/// Replace the skill set; blanks and duplicates are dropped.
async fn replace_skills<C: ConnectionTrait>(db: &C, profile_id: i32, skills: &[String]) -> Result<(), ServiceError> {
    user_skill::Entity::delete_many()
        .filter(user_skill::Column::UserProfileId.eq(profile_id))
        .exec(db)
        .await?;
    let rows: Vec<user_skill::ActiveModel> = user_skill::normalize_skills(skills)
        .into_iter()
        .map(|skill| user_skill::ActiveModel {
            user_profile_id: Set(profile_id),
            skill: Set(skill),
            ..Default::default()
        })
        .collect();
    if !rows.is_empty() {
        user_skill::Entity::insert_many(rows).exec(db).await?;
    }
    Ok(())
}

async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<user_profile::Model>, ServiceError> {
    Ok(user_profile::Entity::find()
        .filter(user_profile::Column::Email.eq(email.trim()))
        .one(db)
        .await?)
}

#[instrument(skip(db, input), fields(email = ?input.email))]
pub async fn create_profile(db: &DatabaseConnection, input: &CreateProfile) -> Result<UserProfileDto, ServiceError> {
    user_profile::validate_names(&input.first_name, &input.last_name)?;
    let email = input.email.as_deref().map(str::trim).filter(|e| !e.is_empty());
    if let Some(email) = email {
        if find_by_email(db, email).await?.is_some() {
            return Err(ServiceError::validation("A profile with this email already exists"));
        }
    }

    let txn = db.begin().await?;
    let created = user_profile::create(&txn, email, &user_profile::full_name(&input.first_name, &input.last_name)).await?;
    let mut am: user_profile::ActiveModel = created.into();
    am.headline = Set(input.headline.clone());
    am.bio = Set(input.summary.clone());
    am.location = Set(input.location.clone());
    am.industry = Set(input.industry.clone());
    am.website = Set(input.website.clone());
    am.phone_number = Set(input.phone_number.clone());
    am.linkedin_url = Set(input.linkedin_url.clone());
    am.github_url = Set(input.github_url.clone());
    am.current_position = Set(input.current_position.clone());
    am.current_company = Set(input.current_company.clone());
    if let Some(v) = input.profile_public { am.profile_public = Set(v); }
    if let Some(v) = input.contact_info_public { am.contact_info_public = Set(v); }
    if let Some(v) = input.work_experience_public { am.work_experience_public = Set(v); }
    if let Some(v) = input.education_public { am.education_public = Set(v); }
    if let Some(v) = input.skills_public { am.skills_public = Set(v); }
    let profile = am.update(&txn).await?;
    if let Some(skills) = &input.skills {
        replace_skills(&txn, profile.id, skills).await?;
    }
    let profile = refresh_completion(&txn, profile).await?;
    txn.commit().await?;

    info!(profile_id = profile.id, "profile_created");
    to_dto(db, profile).await
}

pub async fn get_profile(db: &DatabaseConnection, id: i32) -> Result<UserProfileDto, ServiceError> {
    let profile = find_profile(db, id).await?;
    to_dto(db, profile).await
}

pub async fn get_profile_by_email(db: &DatabaseConnection, email: &str) -> Result<UserProfileDto, ServiceError> {
    let profile = find_by_email(db, email).await?.ok_or_else(|| ServiceError::not_found("User profile"))?;
    to_dto(db, profile).await
}

/// Return the profile for `email`, creating an empty private one first if needed.
pub async fn create_or_get_by_email(db: &DatabaseConnection, email: &str) -> Result<UserProfileDto, ServiceError> {
    if email.trim().is_empty() {
        return Err(ServiceError::validation("Email is required"));
    }
    if let Some(existing) = find_by_email(db, email).await? {
        return to_dto(db, existing).await;
    }
    let created = user_profile::create(db, Some(email), "").await?;
    let mut am: user_profile::ActiveModel = created.into();
    am.profile_public = Set(false);
    am.work_experience_public = Set(false);
    am.education_public = Set(false);
    am.skills_public = Set(false);
    let profile = am.update(db).await?;
    info!(profile_id = profile.id, "profile_created_for_email");
    to_dto(db, profile).await
}

/// Only profiles marked public are visible here.
pub async fn get_public_profile(db: &DatabaseConnection, id: i32) -> Result<UserProfileDto, ServiceError> {
    let profile = find_profile(db, id).await?;
    if !profile.profile_public {
        return Err(ServiceError::not_found("User profile"));
    }
    to_dto(db, profile).await
}

#[instrument(skip(db, input))]
pub async fn update_profile(db: &DatabaseConnection, id: i32, input: &UpdateProfile) -> Result<UserProfileDto, ServiceError> {
    user_profile::validate_names(&input.first_name, &input.last_name)?;
    let txn = db.begin().await?;
    let mut am: user_profile::ActiveModel = find_profile(&txn, id).await?.into();
    am.full_name = Set(user_profile::full_name(&input.first_name, &input.last_name));
    if let Some(v) = &input.headline { am.headline = Set(Some(v.clone())); }
    if let Some(v) = &input.summary { am.bio = Set(Some(v.clone())); }
    if let Some(v) = &input.location { am.location = Set(Some(v.clone())); }
    if let Some(v) = &input.industry { am.industry = Set(Some(v.clone())); }
    if let Some(v) = &input.website { am.website = Set(Some(v.clone())); }
    if let Some(v) = &input.phone_number { am.phone_number = Set(Some(v.clone())); }
    if let Some(v) = &input.linkedin_url { am.linkedin_url = Set(Some(v.clone())); }
    if let Some(v) = &input.github_url { am.github_url = Set(Some(v.clone())); }
    if let Some(v) = &input.current_position { am.current_position = Set(Some(v.clone())); }
    if let Some(v) = &input.current_company { am.current_company = Set(Some(v.clone())); }
    am.updated_at = Set(Utc::now().into());
    let profile = am.update(&txn).await?;
    if let Some(skills) = &input.skills {
        replace_skills(&txn, id, skills).await?;
    }
    let profile = refresh_completion(&txn, profile).await?;
    txn.commit().await?;
    info!(profile_id = id, completion = profile.profile_completion_percentage, "profile_updated");
    to_dto(db, profile).await
}

/// Delete a profile together with everything it owns.
#[instrument(skip(db))]
pub async fn delete_profile(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    find_profile(&txn, id).await?;
    user_skill::Entity::delete_many().filter(user_skill::Column::UserProfileId.eq(id)).exec(&txn).await?;
    work_experience::Entity::delete_many().filter(work_experience::Column::UserProfileId.eq(id)).exec(&txn).await?;
    education::Entity::delete_many().filter(education::Column::UserProfileId.eq(id)).exec(&txn).await?;
    certification::Entity::delete_many().filter(certification::Column::UserProfileId.eq(id)).exec(&txn).await?;
    user_profile::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(profile_id = id, "profile_deleted");
    Ok(())
}

pub async fn list_profiles(db: &DatabaseConnection) -> Result<Vec<UserProfileDto>, ServiceError> {
    let rows = user_profile::Entity::find().order_by_asc(user_profile::Column::Id).all(db).await?;
    to_dtos(db, rows).await
}

pub async fn list_public_profiles(db: &DatabaseConnection) -> Result<Vec<UserProfileDto>, ServiceError> {
    let rows = user_profile::Entity::find()
        .filter(user_profile::Column::ProfilePublic.eq(true))
        .order_by_asc(user_profile::Column::Id)
        .all(db)
        .await?;
    to_dtos(db, rows).await
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub async fn search_profiles(db: &DatabaseConnection, query: &ProfileSearch) -> Result<Vec<UserProfileDto>, ServiceError> {
    let mut cond = Condition::all();
    if let Some(keyword) = non_blank(&query.keyword) {
        cond = cond.add(
            Condition::any()
                .add(contains_ci(user_profile::Column::FullName, keyword))
                .add(contains_ci(user_profile::Column::Bio, keyword))
                .add(contains_ci(user_profile::Column::CurrentPosition, keyword))
                .add(contains_ci(user_profile::Column::CurrentCompany, keyword)),
        );
    }
    if let Some(location) = non_blank(&query.location) {
        cond = cond.add(contains_ci(user_profile::Column::Location, location));
    }
    if let Some(industry) = non_blank(&query.industry) {
        cond = cond.add(contains_ci(user_profile::Column::Industry, industry));
    }
    if let Some(company) = non_blank(&query.company) {
        cond = cond.add(contains_ci(user_profile::Column::CurrentCompany, company));
    }
    let rows = user_profile::Entity::find()
        .filter(cond)
        .order_by_asc(user_profile::Column::Id)
        .all(db)
        .await?;
    to_dtos(db, rows).await
}

/// Profiles holding any of the given skills (case-insensitive).
pub async fn search_by_skills(db: &DatabaseConnection, skills: &[String]) -> Result<Vec<UserProfileDto>, ServiceError> {
    let wanted = user_skill::normalize_skills(skills);
    if wanted.is_empty() {
        return Ok(Vec::new());
    }
    let mut any = Condition::any();
    for skill in &wanted {
        any = any.add(models::db::equals_ci(user_skill::Column::Skill, skill));
    }
    let ids: BTreeSet<i32> = user_skill::Entity::find()
        .filter(any)
        .all(db)
        .await?
        .into_iter()
        .map(|s| s.user_profile_id)
        .collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = user_profile::Entity::find()
        .filter(user_profile::Column::Id.is_in(ids))
        .order_by_asc(user_profile::Column::Id)
        .all(db)
        .await?;
    to_dtos(db, rows).await
}

async fn search_column(db: &DatabaseConnection, col: user_profile::Column, needle: &str) -> Result<Vec<UserProfileDto>, ServiceError> {
    let rows = user_profile::Entity::find()
        .filter(contains_ci(col, needle))
        .order_by_asc(user_profile::Column::Id)
        .all(db)
        .await?;
    to_dtos(db, rows).await
}

pub async fn search_by_location(db: &DatabaseConnection, location: &str) -> Result<Vec<UserProfileDto>, ServiceError> {
    search_column(db, user_profile::Column::Location, location).await
}

pub async fn search_by_company(db: &DatabaseConnection, company: &str) -> Result<Vec<UserProfileDto>, ServiceError> {
    search_column(db, user_profile::Column::CurrentCompany, company).await
}

pub async fn search_by_industry(db: &DatabaseConnection, industry: &str) -> Result<Vec<UserProfileDto>, ServiceError> {
    search_column(db, user_profile::Column::Industry, industry).await
}

/// Profiles whose completion is strictly above `threshold`.
pub async fn with_completion_above(db: &DatabaseConnection, threshold: i32) -> Result<Vec<UserProfileDto>, ServiceError> {
    let rows = user_profile::Entity::find()
        .filter(user_profile::Column::ProfileCompletionPercentage.gt(threshold))
        .order_by_asc(user_profile::Column::Id)
        .all(db)
        .await?;
    to_dtos(db, rows).await
}

pub async fn get_privacy_settings(db: &DatabaseConnection, id: i32) -> Result<PrivacySettings, ServiceError> {
    let profile = find_profile(db, id).await?;
    Ok(PrivacySettings::from(&profile))
}

/// Email and phone visibility share one stored flag.
pub async fn update_privacy_settings(db: &DatabaseConnection, id: i32, settings: &PrivacySettings) -> Result<PrivacySettings, ServiceError> {
    let mut am: user_profile::ActiveModel = find_profile(db, id).await?.into();
    am.profile_public = Set(settings.profile_visible);
    am.contact_info_public = Set(settings.show_email || settings.show_phone);
    am.work_experience_public = Set(settings.show_work_experience);
    am.education_public = Set(settings.show_education);
    am.skills_public = Set(settings.show_certifications);
    am.updated_at = Set(Utc::now().into());
    let profile = am.update(db).await?;
    info!(profile_id = id, "privacy_settings_updated");
    Ok(PrivacySettings::from(&profile))
}

pub async fn get_completion(db: &DatabaseConnection, id: i32) -> Result<ProfileCompletion, ServiceError> {
    let profile = find_profile(db, id).await?;
    let counts = owned_counts(db, id).await?;
    Ok(completion::summarize(&profile, &counts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn ada() -> CreateProfile {
        CreateProfile {
            email: Some("ada@example.com".into()),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            headline: Some("Analytical engines".into()),
            location: Some("London".into()),
            industry: Some("Computing".into()),
            current_company: Some("Babbage & Co".into()),
            skills: Some(vec!["Mathematics".into(), "Poetry".into(), "mathematics ".into()]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_get_and_split_names() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let p = create_profile(&db, &ada()).await?;
        assert_eq!(p.first_name, "Ada");
        assert_eq!(p.last_name, "Lovelace");
        assert_eq!(p.skills, vec!["Mathematics", "Poetry", "mathematics"]);
        // fullName 20 + location 10 + company 10 + skills 10
        assert_eq!(p.profile_completion_percentage, 50);

        let by_email = get_profile_by_email(&db, "ada@example.com").await?;
        assert_eq!(by_email.id, p.id);
        let err = create_profile(&db, &ada()).await.unwrap_err();
        assert!(err.is_client_error());
        Ok(())
    }

    #[tokio::test]
    async fn names_are_validated() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = create_profile(&db, &CreateProfile { last_name: "X".into(), ..Default::default() }).await.unwrap_err();
        assert_eq!(err.to_string(), "First name is required");
        let p = create_profile(&db, &ada()).await?;
        let long = UpdateProfile { first_name: "A".repeat(51), last_name: "B".into(), ..Default::default() };
        assert!(update_profile(&db, p.id, &long).await.unwrap_err().is_client_error());
        Ok(())
    }

    #[tokio::test]
    async fn partial_update_keeps_absent_fields() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let p = create_profile(&db, &ada()).await?;
        let update = UpdateProfile {
            first_name: "Augusta".into(),
            last_name: "King".into(),
            summary: Some("First programmer".into()),
            skills: Some(vec!["Rust".into()]),
            ..Default::default()
        };
        let updated = update_profile(&db, p.id, &update).await?;
        assert_eq!(updated.first_name, "Augusta");
        assert_eq!(updated.location.as_deref(), Some("London"));
        assert_eq!(updated.summary.as_deref(), Some("First programmer"));
        assert_eq!(updated.skills, vec!["Rust"]);
        assert_eq!(updated.profile_completion_percentage, 65);

        let missing = update_profile(&db, 999, &update).await.unwrap_err();
        assert_eq!(missing.to_string(), "User profile not found");
        Ok(())
    }

    #[tokio::test]
    async fn create_or_get_is_idempotent_and_private() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let first = create_or_get_by_email(&db, "new@example.com").await?;
        assert!(!first.profile_public);
        assert_eq!(first.first_name, "");
        let again = create_or_get_by_email(&db, "new@example.com").await?;
        assert_eq!(first.id, again.id);
        assert!(matches!(get_public_profile(&db, first.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn search_filters_combine() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_profile(&db, &ada()).await?;
        create_profile(&db, &CreateProfile {
            email: Some("grace@example.com".into()),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            location: Some("New York".into()),
            current_company: Some("US Navy".into()),
            skills: Some(vec!["COBOL".into()]),
            ..Default::default()
        })
        .await?;

        let q = ProfileSearch { keyword: Some("LOVE".into()), location: Some("lond".into()), ..Default::default() };
        let hits = search_profiles(&db, &q).await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, a.id);
        // headline is not part of the keyword match
        let q = ProfileSearch { keyword: Some("engines".into()), ..Default::default() };
        assert!(search_profiles(&db, &q).await?.is_empty());

        assert_eq!(search_profiles(&db, &ProfileSearch::default()).await?.len(), 2);
        assert_eq!(search_by_company(&db, "navy").await?[0].first_name, "Grace");
        assert_eq!(search_by_industry(&db, "comp").await?.len(), 1);
        assert_eq!(search_by_location(&db, "york").await?.len(), 1);
        assert_eq!(search_by_skills(&db, &["cobol".into(), "poetry".into()]).await?.len(), 2);
        assert!(search_by_skills(&db, &[]).await?.is_empty());
        assert_eq!(with_completion_above(&db, 45).await?.len(), 2);
        assert!(with_completion_above(&db, 50).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn keyword_matches_current_company() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_profile(&db, &ada()).await?;
        let grace = create_profile(&db, &CreateProfile {
            email: Some("grace@example.com".into()),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            current_company: Some("Acme Navy".into()),
            ..Default::default()
        })
        .await?;

        let q = ProfileSearch { keyword: Some("acme".into()), ..Default::default() };
        let hits = search_profiles(&db, &q).await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, grace.id);
        Ok(())
    }

    #[tokio::test]
    async fn wildcards_in_search_text_match_literally() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_profile(&db, &ada()).await?;
        let fast = create_profile(&db, &CreateProfile {
            email: Some("growth@example.com".into()),
            first_name: "Gina".into(),
            last_name: "Grow".into(),
            current_company: Some("100% Growth_Labs".into()),
            ..Default::default()
        })
        .await?;

        assert_eq!(search_by_company(&db, "_").await?.len(), 1);
        assert_eq!(search_by_company(&db, "100%").await?.len(), 1);
        assert!(search_by_company(&db, "%").await?.iter().all(|p| p.id == fast.id));
        assert!(search_by_company(&db, "babbage_").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn privacy_round_trip() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let p = create_profile(&db, &ada()).await?;
        let before = get_privacy_settings(&db, p.id).await?;
        assert!(before.profile_visible);
        assert!(!before.show_email);

        let settings = PrivacySettings { profile_visible: false, show_phone: true, show_education: true, ..Default::default() };
        let after = update_privacy_settings(&db, p.id, &settings).await?;
        assert!(!after.profile_visible);
        assert!(after.show_email && after.show_phone);
        assert!(!after.show_certifications);
        assert_eq!(list_public_profiles(&db).await?.len(), 0);
        assert_eq!(list_profiles(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn completion_and_cascade_delete() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let p = create_profile(&db, &ada()).await?;
        let c = get_completion(&db, p.id).await?;
        assert_eq!(c.completion_percentage, 50);
        assert!(!c.is_complete);
        assert!(c.missing_fields.contains(&"education".to_string()));
        assert!(!c.missing_fields.contains(&"skills".to_string()));

        delete_profile(&db, p.id).await?;
        assert!(matches!(get_profile(&db, p.id).await, Err(ServiceError::NotFound(_))));
        let left = user_skill::Entity::find().count(&db).await?;
        assert_eq!(left, 0);
        assert!(delete_profile(&db, p.id).await.is_err());
        Ok(())
    }
}

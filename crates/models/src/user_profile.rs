use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::{certification, education, user_skill, work_experience};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profile")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub full_name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub profile_picture_url: Option<String>,
    pub header_image: Option<String>,
    pub profile_completion_percentage: i32,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub profile_public: bool,
    pub contact_info_public: bool,
    pub work_experience_public: bool,
    pub education_public: bool,
    pub skills_public: bool,
    pub current_position: Option<String>,
    pub current_company: Option<String>,
    pub industry: Option<String>,
    pub headline: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Skill,
    WorkExperience,
    Education,
    Certification,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Skill => Entity::has_many(user_skill::Entity).into(),
            Relation::WorkExperience => Entity::has_many(work_experience::Entity).into(),
            Relation::Education => Entity::has_many(education::Entity).into(),
            Relation::Certification => Entity::has_many(certification::Entity).into(),
        }
    }
}

impl Related<user_skill::Entity> for Entity {
    fn to() -> RelationDef { Relation::Skill.def() }
}

impl Related<work_experience::Entity> for Entity {
    fn to() -> RelationDef { Relation::WorkExperience.def() }
}

impl Related<education::Entity> for Entity {
    fn to() -> RelationDef { Relation::Education.def() }
}

impl Related<certification::Entity> for Entity {
    fn to() -> RelationDef { Relation::Certification.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub const NAME_MAX: usize = 50;

/// First and last name are both required and bounded.
pub fn validate_names(first_name: &str, last_name: &str) -> Result<(), ModelError> {
    errors::require_text(first_name, "First name is required")?;
    errors::require_text(last_name, "Last name is required")?;
    errors::max_chars(first_name.trim(), NAME_MAX, "First name must not exceed 50 characters")?;
    errors::max_chars(last_name.trim(), NAME_MAX, "Last name must not exceed 50 characters")?;
    Ok(())
}

pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name.trim(), last_name.trim())
}

/// Split a stored full name back into (first, last); the last name takes everything after the first space.
pub fn split_full_name(full_name: &str) -> (String, String) {
    match full_name.trim().split_once(' ') {
        Some((first, last)) => (first.to_string(), last.trim().to_string()),
        None => (full_name.trim().to_string(), String::new()),
    }
}

/// Insert a bare profile. Public flags default to visible except contact info.
pub async fn create<C: ConnectionTrait>(db: &C, email: Option<&str>, full_name: &str) -> Result<Model, ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        email: Set(email.map(|e| e.trim().to_string())),
        full_name: Set(full_name.to_string()),
        bio: Set(None),
        location: Set(None),
        profile_picture_url: Set(None),
        header_image: Set(None),
        profile_completion_percentage: Set(0),
        phone_number: Set(None),
        website: Set(None),
        linkedin_url: Set(None),
        github_url: Set(None),
        profile_public: Set(true),
        contact_info_public: Set(false),
        work_experience_public: Set(true),
        education_public: Set(true),
        skills_public: Set(true),
        current_position: Set(None),
        current_company: Set(None),
        industry: Set(None),
        headline: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

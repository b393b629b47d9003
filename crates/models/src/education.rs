use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::user_profile;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "education")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_profile_id: i32,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub current_education: bool,
    pub grade: Option<String>,
    pub activities: Option<String>,
    pub achievements: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { UserProfile }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::UserProfile => Entity::belongs_to(user_profile::Entity)
                .from(Column::UserProfileId)
                .to(user_profile::Column::Id)
                .into(),
        }
    }
}

impl Related<user_profile::Entity> for Entity {
    fn to() -> RelationDef { Relation::UserProfile.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(institution: &str, degree: &str, field_of_study: &str, start_date: Option<Date>) -> Result<Date, ModelError> {
    errors::require_text(institution, "Institution is required")?;
    errors::require_text(degree, "Degree is required")?;
    errors::require_text(field_of_study, "Field of study is required")?;
    start_date.ok_or_else(|| ModelError::validation("Start date is required"))
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::user_profile;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "work_experience")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_profile_id: i32,
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub current_position: bool,
    pub industry: Option<String>,
    pub employment_type: Option<String>,
    pub skills_used: Option<String>,
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

pub fn validate(company: &str, position: &str, start_date: Option<Date>, end_date: Option<Date>) -> Result<Date, ModelError> {
    errors::require_text(company, "Company is required")?;
    errors::require_text(position, "Title is required")?;
    let start = start_date.ok_or_else(|| ModelError::validation("Start date is required"))?;
    if let Some(end) = end_date {
        if end < start {
            return Err(ModelError::validation("End date must not be before start date"));
        }
    }
    Ok(start)
}

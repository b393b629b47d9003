use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::user_profile;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_skill")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_profile_id: i32,
    pub skill: String,
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

/// Trim, drop blanks and de-duplicate while keeping first-seen order.
pub fn normalize_skills<I, S>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for s in skills {
        let s = s.as_ref().trim();
        if !s.is_empty() && !out.iter().any(|e| e == s) {
            out.push(s.to_string());
        }
    }
    out
}

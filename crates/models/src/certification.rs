use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::user_profile;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "certification")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_profile_id: i32,
    pub name: String,
    pub issuing_organization: String,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub issue_date: Date,
    pub expiration_date: Option<Date>,
    pub does_not_expire: bool,
    pub description: Option<String>,
    pub skills: Option<String>,
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

impl Model {
    /// Valid on `today`: never expires, has no expiry, or expires today or later.
    pub fn is_valid_on(&self, today: Date) -> bool {
        self.does_not_expire || self.expiration_date.map(|d| d >= today).unwrap_or(true)
    }

    pub fn is_expired_on(&self, today: Date) -> bool {
        !self.is_valid_on(today)
    }

    /// Expires within `[today, today + days]`.
    pub fn expires_within(&self, today: Date, days: i64) -> bool {
        if self.does_not_expire {
            return false;
        }
        match self.expiration_date {
            Some(d) => d >= today && d <= today + chrono::Duration::days(days),
            None => false,
        }
    }
}

pub fn validate(name: &str, issuing_organization: &str, issue_date: Option<Date>) -> Result<Date, ModelError> {
    errors::require_text(name, "Certification name is required")?;
    errors::require_text(issuing_organization, "Issuing organization is required")?;
    issue_date.ok_or_else(|| ModelError::validation("Issue date is required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn cert(expiration: Option<Date>, does_not_expire: bool) -> Model {
        Model {
            id: 1,
            user_profile_id: 1,
            name: "CKA".into(),
            issuing_organization: "CNCF".into(),
            credential_id: None,
            credential_url: None,
            issue_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            expiration_date: expiration,
            does_not_expire,
            description: None,
            skills: None,
        }
    }

    #[test]
    fn validity_windows() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let past = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let soon = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        let later = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();

        assert!(cert(None, false).is_valid_on(today));
        assert!(cert(Some(past), true).is_valid_on(today));
        assert!(cert(Some(today), false).is_valid_on(today));
        assert!(cert(Some(past), false).is_expired_on(today));

        assert!(cert(Some(soon), false).expires_within(today, 30));
        assert!(!cert(Some(later), false).expires_within(today, 30));
        assert!(!cert(Some(soon), true).expires_within(today, 30));
        assert!(!cert(Some(past), false).expires_within(today, 30));
    }
}

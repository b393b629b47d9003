use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub company: String,
    pub location: String,
    #[sea_orm(column_type = "Double")]
    pub salary: f64,
    pub posted_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Field rules for create and update.
pub fn validate(title: &str, description: &str, company: &str, location: &str, salary: Option<f64>) -> Result<f64, ModelError> {
    errors::require_text(title, "Title is required")?;
    errors::require_text(description, "Description is required")?;
    errors::require_text(company, "Company is required")?;
    errors::require_text(location, "Location is required")?;
    let salary = salary.ok_or_else(|| ModelError::validation("Salary is required"))?;
    if !salary.is_finite() || salary < 0.0 {
        return Err(ModelError::validation("Salary must be zero or positive"));
    }
    Ok(salary)
}

pub async fn create(
    db: &DatabaseConnection,
    title: &str,
    description: &str,
    company: &str,
    location: &str,
    salary: Option<f64>,
    posted_at: Option<DateTimeWithTimeZone>,
) -> Result<Model, ModelError> {
    let salary = validate(title, description, company, location, salary)?;
    let am = ActiveModel {
        title: Set(title.trim().to_string()),
        description: Set(description.to_string()),
        company: Set(company.trim().to_string()),
        location: Set(location.trim().to_string()),
        salary: Set(salary),
        posted_at: Set(posted_at.unwrap_or_else(|| Utc::now().into())),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

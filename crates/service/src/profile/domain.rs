use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use models::{certification, education, user_profile, work_experience};

/// Profile as returned to clients. The stored full name is split back into first/last.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileDto {
    pub id: i32,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub profile_picture_url: Option<String>,
    pub header_image: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub profile_completion_percentage: i32,
    pub profile_public: bool,
    pub contact_info_public: bool,
    pub work_experience_public: bool,
    pub education_public: bool,
    pub skills_public: bool,
    pub current_position: Option<String>,
    pub current_company: Option<String>,
    pub skills: Vec<String>,
    pub is_profile_complete: bool,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl UserProfileDto {
    pub fn from_model(m: user_profile::Model, skills: Vec<String>) -> Self {
        let (first_name, last_name) = user_profile::split_full_name(&m.full_name);
        Self {
            id: m.id,
            email: m.email,
            first_name,
            last_name,
            headline: m.headline,
            summary: m.bio,
            location: m.location,
            industry: m.industry,
            profile_picture_url: m.profile_picture_url,
            header_image: m.header_image,
            website: m.website,
            phone_number: m.phone_number,
            linkedin_url: m.linkedin_url,
            github_url: m.github_url,
            profile_completion_percentage: m.profile_completion_percentage,
            profile_public: m.profile_public,
            contact_info_public: m.contact_info_public,
            work_experience_public: m.work_experience_public,
            education_public: m.education_public,
            skills_public: m.skills_public,
            current_position: m.current_position,
            current_company: m.current_company,
            skills,
            is_profile_complete: m.profile_completion_percentage >= 100,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Body of `POST /api/v1/users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProfile {
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub current_position: Option<String>,
    pub current_company: Option<String>,
    pub profile_public: Option<bool>,
    pub contact_info_public: Option<bool>,
    pub work_experience_public: Option<bool>,
    pub education_public: Option<bool>,
    pub skills_public: Option<bool>,
    pub skills: Option<Vec<String>>,
}

/// Body of `PUT /api/v1/users/{userId}`: names are required, everything else
/// overwrites only when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProfile {
    pub first_name: String,
    pub last_name: String,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub current_position: Option<String>,
    pub current_company: Option<String>,
    pub skills: Option<Vec<String>>,
}

/// Optional filters for profile search, AND-combined.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSearch {
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivacySettings {
    pub id: Option<i32>,
    pub profile_visible: bool,
    pub show_email: bool,
    pub show_phone: bool,
    pub show_work_experience: bool,
    pub show_education: bool,
    pub show_certifications: bool,
}

impl From<&user_profile::Model> for PrivacySettings {
    fn from(m: &user_profile::Model) -> Self {
        Self {
            id: Some(m.id),
            profile_visible: m.profile_public,
            show_email: m.contact_info_public,
            show_phone: m.contact_info_public,
            show_work_experience: m.work_experience_public,
            show_education: m.education_public,
            show_certifications: m.skills_public,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCompletion {
    pub completion_percentage: i32,
    pub is_complete: bool,
    pub missing_fields: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperienceDto {
    pub id: Option<i32>,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_current_position: bool,
    pub industry: Option<String>,
    pub employment_type: Option<String>,
    pub skills_used: Option<String>,
}

impl From<work_experience::Model> for WorkExperienceDto {
    fn from(m: work_experience::Model) -> Self {
        Self {
            id: Some(m.id),
            title: m.position,
            company: m.company,
            location: m.location,
            description: m.description,
            start_date: Some(m.start_date),
            end_date: m.end_date,
            is_current_position: m.current_position,
            industry: m.industry,
            employment_type: m.employment_type,
            skills_used: m.skills_used,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationDto {
    pub id: Option<i32>,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub current_education: bool,
    pub grade: Option<String>,
    pub activities: Option<String>,
    pub achievements: Option<String>,
}

impl From<education::Model> for EducationDto {
    fn from(m: education::Model) -> Self {
        Self {
            id: Some(m.id),
            institution: m.institution,
            degree: m.degree,
            field_of_study: m.field_of_study,
            location: m.location,
            description: m.description,
            start_date: Some(m.start_date),
            end_date: m.end_date,
            current_education: m.current_education,
            grade: m.grade,
            activities: m.activities,
            achievements: m.achievements,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationDto {
    pub id: Option<i32>,
    pub name: String,
    pub issuing_organization: String,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub does_not_expire: bool,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub description: Option<String>,
    pub skills: Option<String>,
}

impl From<certification::Model> for CertificationDto {
    fn from(m: certification::Model) -> Self {
        Self {
            id: Some(m.id),
            name: m.name,
            issuing_organization: m.issuing_organization,
            issue_date: Some(m.issue_date),
            expiry_date: m.expiration_date,
            does_not_expire: m.does_not_expire,
            credential_id: m.credential_id,
            credential_url: m.credential_url,
            description: m.description,
            skills: m.skills,
        }
    }
}

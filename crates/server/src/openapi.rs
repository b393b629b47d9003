use serde::Deserialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CredentialsDoc { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct AuthResponseDoc { pub token: String, pub message: String }

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequestDoc {
    pub requester_id: Option<i64>,
    pub receiver_id: Option<i64>,
    pub connection_id: Option<i32>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobInputDoc {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: f64,
    /// RFC 3339; defaults to now
    pub posted_at: Option<String>,
}

#[derive(ToSchema)]
pub struct PostInputDoc { pub title: String, pub content: String, pub author: String }

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageDoc { pub sender_id: i64, pub receiver_id: i64, pub content: String }

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewNotificationDoc { pub user_id: String, pub message: String }

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileDoc {
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub current_position: Option<String>,
    pub current_company: Option<String>,
    pub profile_public: Option<bool>,
    pub skills: Option<Vec<String>>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDoc {
    pub first_name: String,
    pub last_name: String,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettingsDoc {
    pub profile_visible: bool,
    pub show_email: bool,
    pub show_phone: bool,
    pub show_work_experience: bool,
    pub show_education: bool,
    pub show_certifications: bool,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperienceDoc {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    /// YYYY-MM-DD
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_current_position: bool,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationDoc {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub current_education: bool,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificationDoc {
    pub name: String,
    pub issuing_organization: String,
    pub issue_date: String,
    pub expiry_date: Option<String>,
    pub does_not_expire: bool,
    pub credential_id: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::current_user,
        crate::routes::auth::send_email_verification_token,
        crate::routes::auth::validate_email_verification_token,
        crate::routes::auth::send_password_reset_token,
        crate::routes::auth::reset_password,
        crate::routes::connections::send_request,
        crate::routes::connections::accept_request,
        crate::routes::connections::reject_request,
        crate::routes::connections::list_connections,
        crate::routes::connections::remove_connection,
        crate::routes::connections::connection_status,
        crate::routes::jobs::list,
        crate::routes::jobs::get_one,
        crate::routes::jobs::create,
        crate::routes::jobs::update,
        crate::routes::jobs::delete,
        crate::routes::posts::create,
        crate::routes::posts::list,
        crate::routes::posts::get_one,
        crate::routes::posts::update,
        crate::routes::posts::delete,
        crate::routes::messages::send,
        crate::routes::messages::get_one,
        crate::routes::messages::conversation,
        crate::routes::messages::inbox,
        crate::routes::messages::delete,
        crate::routes::notifications::create,
        crate::routes::notifications::for_user,
        crate::routes::notifications::mark_read,
        crate::routes::users::create,
        crate::routes::users::list,
        crate::routes::users::list_public,
        crate::routes::users::get_one,
        crate::routes::users::get_public,
        crate::routes::users::update,
        crate::routes::users::delete,
        crate::routes::users::search,
        crate::routes::users::completion_above,
        crate::routes::users::get_privacy,
        crate::routes::users::update_privacy,
        crate::routes::users::completion,
        crate::routes::work_experience::create,
        crate::routes::work_experience::list,
        crate::routes::work_experience::end_position,
        crate::routes::education::create,
        crate::routes::education::list,
        crate::routes::certifications::create,
        crate::routes::certifications::list,
        crate::routes::certifications::renew,
    ),
    components(
        schemas(
            HealthResponse,
            CredentialsDoc,
            AuthResponseDoc,
            ConnectionRequestDoc,
            JobInputDoc,
            PostInputDoc,
            SendMessageDoc,
            NewNotificationDoc,
            CreateProfileDoc,
            UpdateProfileDoc,
            PrivacySettingsDoc,
            WorkExperienceDoc,
            EducationDoc,
            CertificationDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "users"),
        (name = "work-experience"),
        (name = "education"),
        (name = "certifications"),
        (name = "connections"),
        (name = "jobs"),
        (name = "messages"),
        (name = "notifications"),
        (name = "posts")
    )
)]
pub struct ApiDoc;

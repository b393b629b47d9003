//! Profile picture and banner image storage on the local filesystem.
//!
//! Files land in `<root>/<kind>/<userId>/<uuid><ext>` and are referenced by the
//! URL `/uploads/<kind>/<userId>/<file>`, which the server serves statically.

use std::path::{Path, PathBuf};

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing::{info, warn};
use uuid::Uuid;

use models::user_profile;

use super::profile_service::{find_profile, refresh_completion};
use crate::errors::ServiceError;

/// URL prefix under which the upload root is served.
pub const URL_PREFIX: &str = "/uploads";
const DEFAULT_EXTENSION: &str = ".jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    ProfilePicture,
    Banner,
}

impl ImageKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            ImageKind::ProfilePicture => "profile-pictures",
            ImageKind::Banner => "banner-images",
        }
    }

    fn current(&self, profile: &user_profile::Model) -> Option<String> {
        match self {
            ImageKind::ProfilePicture => profile.profile_picture_url.clone(),
            ImageKind::Banner => profile.header_image.clone(),
        }
    }

    fn set(&self, am: &mut user_profile::ActiveModel, url: Option<String>) {
        match self {
            ImageKind::ProfilePicture => am.profile_picture_url = Set(url),
            ImageKind::Banner => am.header_image = Set(url),
        }
    }
}

/// Extension of the uploaded file name with its dot, `.jpg` when absent or odd.
pub fn extension_of(original_filename: Option<&str>) -> String {
    original_filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &Path { &self.root }

    fn user_dir(&self, kind: ImageKind, user_id: i32) -> PathBuf {
        self.root.join(kind.dir_name()).join(user_id.to_string())
    }

    /// Store the bytes, point the profile at the new URL and return it.
    pub async fn save_image(
        &self,
        db: &DatabaseConnection,
        user_id: i32,
        kind: ImageKind,
        original_filename: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, ServiceError> {
        let profile = find_profile(db, user_id).await?;
        let dir = self.user_dir(kind, user_id);
        tokio::fs::create_dir_all(&dir).await?;
        let file_name = format!("{}{}", Uuid::new_v4(), extension_of(original_filename));
        tokio::fs::write(dir.join(&file_name), bytes).await?;

        let url = format!("{}/{}/{}/{}", URL_PREFIX, kind.dir_name(), user_id, file_name);
        let mut am: user_profile::ActiveModel = profile.into();
        kind.set(&mut am, Some(url.clone()));
        am.updated_at = Set(Utc::now().into());
        let profile = am.update(db).await?;
        refresh_completion(db, profile).await?;
        info!(profile_id = user_id, kind = kind.dir_name(), %url, size = bytes.len(), "image_uploaded");
        Ok(url)
    }

    /// Remove the stored file (failures are only logged) and clear the URL.
    pub async fn delete_image(&self, db: &DatabaseConnection, user_id: i32, kind: ImageKind) -> Result<(), ServiceError> {
        let profile = find_profile(db, user_id).await?;
        let Some(url) = kind.current(&profile) else {
            return Ok(());
        };
        if let Some(file_name) = url.rsplit('/').next().filter(|f| !f.is_empty()) {
            let path = self.user_dir(kind, user_id).join(file_name);
            if let Err(e) = tokio::fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %e, "could not delete image file");
            }
        }
        let mut am: user_profile::ActiveModel = profile.into();
        kind.set(&mut am, None);
        am.updated_at = Set(Utc::now().into());
        let profile = am.update(db).await?;
        refresh_completion(db, profile).await?;
        info!(profile_id = user_id, kind = kind.dir_name(), "image_deleted");
        Ok(())
    }
}

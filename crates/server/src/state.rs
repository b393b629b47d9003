use std::sync::Arc;

use sea_orm::DatabaseConnection;

use configs::AppConfig;
use service::auth::email::EmailSender;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::{AuthConfig, AuthService};
use service::connection::repo::seaorm::SeaOrmConnectionRepository;
use service::connection::ConnectionService;
use service::profile::UploadStore;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub connections: Arc<ConnectionService<SeaOrmConnectionRepository>>,
    pub uploads: UploadStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig, mailer: Arc<dyn EmailSender>) -> Self {
        let auth_repo = Arc::new(SeaOrmAuthRepository { db: db.clone() });
        let auth = AuthService::new(auth_repo, mailer, AuthConfig::from_settings(&config.auth));
        let connection_repo = Arc::new(SeaOrmConnectionRepository { db: db.clone() });
        Self {
            uploads: UploadStore::new(config.uploads.dir.clone()),
            auth: Arc::new(auth),
            connections: Arc::new(ConnectionService::new(connection_repo)),
            config: Arc::new(config),
            db,
        }
    }
}

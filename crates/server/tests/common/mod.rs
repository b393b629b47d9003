#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

use configs::{AppConfig, DatabaseConfig};
use server::routes;
use server::state::AppState;
use service::auth::email::mock::MockEmailSender;

pub struct TestApp {
    pub router: Router,
    pub mailer: Arc<MockEmailSender>,
    pub uploads: tempfile::TempDir,
}

pub fn test_config(upload_dir: &str) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.database = DatabaseConfig::sqlite_memory();
    cfg.auth.jwt_secret = "test-secret".into();
    cfg.uploads.dir = upload_dir.to_string();
    cfg
}

pub async fn build_app_with(configure: impl FnOnce(&mut AppConfig)) -> anyhow::Result<TestApp> {
    let uploads = tempfile::tempdir()?;
    let mut cfg = test_config(&uploads.path().to_string_lossy());
    configure(&mut cfg);
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    let mailer = Arc::new(MockEmailSender::default());
    let state = AppState::new(db, cfg, mailer.clone());
    Ok(TestApp { router: routes::build_router(state), mailer, uploads })
}

pub async fn build_app() -> anyhow::Result<TestApp> {
    build_app_with(|_| {}).await
}

impl TestApp {
    pub async fn call(&self, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
        let resp = self.router.clone().oneshot(req).await?;
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        Ok((status, body))
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> anyhow::Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            builder = builder.header("authorization", format!("Bearer {t}"));
        }
        let req = match body {
            Some(v) => builder.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&v)?))?,
            None => builder.body(Body::empty())?,
        };
        self.call(req).await
    }

    pub async fn get(&self, uri: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.send("GET", uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        self.send("POST", uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        self.send("PUT", uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> anyhow::Result<StatusCode> {
        Ok(self.send("DELETE", uri, None, None).await?.0)
    }
}

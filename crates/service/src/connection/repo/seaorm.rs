use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

use models::connection;

use crate::connection::domain::{Connection, ConnectionStatus};
use crate::connection::repository::ConnectionRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository implementation.
pub struct SeaOrmConnectionRepository {
    pub db: DatabaseConnection,
}

fn to_domain(m: connection::Model) -> Result<Connection, ServiceError> {
    Ok(Connection {
        id: m.id,
        requester_id: m.requester_id,
        receiver_id: m.receiver_id,
        status: m.status.parse::<ConnectionStatus>()?,
    })
}

fn to_domain_all(rows: Vec<connection::Model>) -> Result<Vec<Connection>, ServiceError> {
    rows.into_iter().map(to_domain).collect()
}

#[async_trait::async_trait]
impl ConnectionRepository for SeaOrmConnectionRepository {
    async fn find_by_pair(&self, requester_id: i64, receiver_id: i64) -> Result<Vec<Connection>, ServiceError> {
        let rows = connection::Entity::find()
            .filter(connection::Column::RequesterId.eq(requester_id))
            .filter(connection::Column::ReceiverId.eq(receiver_id))
            .order_by_asc(connection::Column::Id)
            .all(&self.db)
            .await?;
        to_domain_all(rows)
    }

    async fn create(&self, requester_id: i64, receiver_id: i64, status: ConnectionStatus) -> Result<Connection, ServiceError> {
        let created = connection::create(&self.db, requester_id, receiver_id, status).await?;
        to_domain(created)
    }

    async fn get(&self, id: i32) -> Result<Option<Connection>, ServiceError> {
        connection::Entity::find_by_id(id).one(&self.db).await?.map(to_domain).transpose()
    }

    async fn update_status(&self, id: i32, status: ConnectionStatus) -> Result<Connection, ServiceError> {
        let mut am = connection::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Connection"))?
            .into_active_model();
        am.status = Set(status.as_str().to_string());
        am.updated_at = Set(Utc::now().into());
        to_domain(am.update(&self.db).await?)
    }

    async fn list_involving(&self, user_id: i64) -> Result<Vec<Connection>, ServiceError> {
        let rows = connection::Entity::find()
            .filter(
                Condition::any()
                    .add(connection::Column::RequesterId.eq(user_id))
                    .add(connection::Column::ReceiverId.eq(user_id)),
            )
            .order_by_asc(connection::Column::Id)
            .all(&self.db)
            .await?;
        to_domain_all(rows)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = connection::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

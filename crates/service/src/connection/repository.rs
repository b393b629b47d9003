use async_trait::async_trait;

use crate::errors::ServiceError;
use super::domain::{Connection, ConnectionStatus};

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Records for the ordered pair, oldest first.
    async fn find_by_pair(&self, requester_id: i64, receiver_id: i64) -> Result<Vec<Connection>, ServiceError>;
    async fn create(&self, requester_id: i64, receiver_id: i64, status: ConnectionStatus) -> Result<Connection, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Connection>, ServiceError>;
    async fn update_status(&self, id: i32, status: ConnectionStatus) -> Result<Connection, ServiceError>;
    /// Records where the user is requester or receiver, in storage order.
    async fn list_involving(&self, user_id: i64) -> Result<Vec<Connection>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// In-memory repository for service tests
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockConnectionRepository {
        rows: Mutex<BTreeMap<i32, Connection>>, // key: id, so iteration is insertion order
        next_id: Mutex<i32>,
    }

    #[async_trait]
    impl ConnectionRepository for MockConnectionRepository {
        async fn find_by_pair(&self, requester_id: i64, receiver_id: i64) -> Result<Vec<Connection>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .values()
                .filter(|c| c.requester_id == requester_id && c.receiver_id == receiver_id)
                .cloned()
                .collect())
        }

        async fn create(&self, requester_id: i64, receiver_id: i64, status: ConnectionStatus) -> Result<Connection, ServiceError> {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let c = Connection { id: *next_id, requester_id, receiver_id, status };
            self.rows.lock().unwrap().insert(c.id, c.clone());
            Ok(c)
        }

        async fn get(&self, id: i32) -> Result<Option<Connection>, ServiceError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn update_status(&self, id: i32, status: ConnectionStatus) -> Result<Connection, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let c = rows.get_mut(&id).ok_or_else(|| ServiceError::not_found("Connection"))?;
            c.status = status;
            Ok(c.clone())
        }

        async fn list_involving(&self, user_id: i64) -> Result<Vec<Connection>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .values()
                .filter(|c| c.requester_id == user_id || c.receiver_id == user_id)
                .cloned()
                .collect())
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.rows.lock().unwrap().remove(&id).is_some())
        }
    }
}

use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::ServiceError;
use super::domain::{Connection, ConnectionRequest, ConnectionStatus, STATUS_NONE};
use super::repository::ConnectionRepository;

pub struct ConnectionService<R: ConnectionRepository> {
    repo: Arc<R>,
}

impl<R: ConnectionRepository> ConnectionService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a PENDING request from requester to receiver.
    ///
    /// Rejected when either direction already holds a PENDING or ACCEPTED record.
    #[instrument(skip(self))]
    pub async fn send_request(&self, req: &ConnectionRequest) -> Result<Connection, ServiceError> {
        let requester_id = req.requester_id.ok_or_else(|| ServiceError::validation("Requester ID is required"))?;
        let receiver_id = req.receiver_id.ok_or_else(|| ServiceError::validation("Receiver ID is required"))?;
        if requester_id == receiver_id {
            return Err(ServiceError::validation("Cannot send connection request to yourself"));
        }

        let outgoing = self.repo.find_by_pair(requester_id, receiver_id).await?;
        if outgoing.iter().any(|c| c.status == ConnectionStatus::Accepted) {
            return Err(ServiceError::validation("Already connected with this user"));
        }
        if outgoing.iter().any(|c| c.status == ConnectionStatus::Pending) {
            return Err(ServiceError::validation("Connection request already sent"));
        }

        let incoming = self.repo.find_by_pair(receiver_id, requester_id).await?;
        if incoming.iter().any(|c| c.status == ConnectionStatus::Pending) {
            return Err(ServiceError::validation("This user has already sent you a connection request"));
        }
        if incoming.iter().any(|c| c.status == ConnectionStatus::Accepted) {
            return Err(ServiceError::validation("Already connected with this user"));
        }

        let created = self.repo.create(requester_id, receiver_id, ConnectionStatus::Pending).await?;
        info!(connection_id = created.id, requester_id, receiver_id, "connection_requested");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn accept_request(&self, connection_id: Option<i32>) -> Result<Connection, ServiceError> {
        self.transition(connection_id, ConnectionStatus::Accepted).await
    }

    #[instrument(skip(self))]
    pub async fn reject_request(&self, connection_id: Option<i32>) -> Result<Connection, ServiceError> {
        self.transition(connection_id, ConnectionStatus::Rejected).await
    }

    async fn transition(&self, connection_id: Option<i32>, status: ConnectionStatus) -> Result<Connection, ServiceError> {
        let id = connection_id.ok_or_else(|| ServiceError::validation("Connection ID is required"))?;
        if self.repo.get(id).await?.is_none() {
            return Err(ServiceError::not_found("Connection"));
        }
        let updated = self.repo.update_status(id, status).await?;
        info!(connection_id = id, status = %status, "connection_status_changed");
        Ok(updated)
    }

    /// PENDING and ACCEPTED records involving the user, either direction.
    pub async fn list_connections(&self, user_id: Option<i64>) -> Result<Vec<Connection>, ServiceError> {
        let user_id = user_id.ok_or_else(|| ServiceError::validation("User ID cannot be null"))?;
        let all = self.repo.list_involving(user_id).await?;
        Ok(all.into_iter().filter(|c| c.status.is_active()).collect())
    }

    #[instrument(skip(self))]
    pub async fn remove_connection(&self, connection_id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(connection_id).await? {
            return Err(ServiceError::not_found("Connection"));
        }
        info!(connection_id, "connection_removed");
        Ok(())
    }

    /// Status of the latest record for the ordered pair, or `NONE`.
    pub async fn get_connection_status(&self, requester_id: i64, receiver_id: i64) -> Result<String, ServiceError> {
        let records = self.repo.find_by_pair(requester_id, receiver_id).await?;
        Ok(records
            .last()
            .map(|c| c.status.as_str().to_string())
            .unwrap_or_else(|| STATUS_NONE.to_string()))
    }
}

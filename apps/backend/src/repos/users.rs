//! User domain model and the credential-store capability interface.

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::domain::DomainError;

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Fields for a user about to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Credential store: persistence for user identity.
///
/// Implementations must be safe under concurrent use from multiple
/// requests. `save` enforces email uniqueness at write time, so a
/// concurrent duplicate signup fails even when both passed the
/// `exists_by_email` pre-check.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    async fn save(&self, user: NewUser) -> Result<User, DomainError>;
}

//! SeaORM adapter for the user store.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::users;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;
use crate::repos::users::{NewUser, User, UserStore};

pub struct SeaUserStore {
    conn: DatabaseConnection,
}

impl SeaUserStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl UserStore for SeaUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .map(|model| model.map(User::from))
            .map_err(map_db_err)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .map(|model| model.is_some())
            .map_err(map_db_err)
    }

    async fn save(&self, user: NewUser) -> Result<User, DomainError> {
        let now = OffsetDateTime::now_utc();
        let user_active = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(user.name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // The unique index on users.email turns a concurrent duplicate
        // insert into a constraint violation, mapped to UniqueEmail here.
        user_active
            .insert(&self.conn)
            .await
            .map(User::from)
            .map_err(map_db_err)
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

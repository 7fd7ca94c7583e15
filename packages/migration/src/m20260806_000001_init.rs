use sea_orm::Statement;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::extension::postgres::Type as PgType;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Todos {
    Table,
    Id,
    Name,
    Priority,
    Completed,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TodoPriorityEnum {
    #[iden = "todo_priority"]
    Type,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // todo_priority enum (PostgreSQL only; guarded so re-runs are harmless)
        if manager.get_database_backend() == sea_orm::DatabaseBackend::Postgres {
            let exists = manager
                .get_connection()
                .query_one(Statement::from_string(
                    sea_orm::DatabaseBackend::Postgres,
                    "SELECT 1 FROM pg_type WHERE typname = 'todo_priority'".to_string(),
                ))
                .await?
                .is_some();

            if !exists {
                manager
                    .create_type(
                        PgType::create()
                            .as_enum(TodoPriorityEnum::Type)
                            .values(["low", "medium", "high"])
                            .to_owned(),
                    )
                    .await?;
            }
        }

        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index on users.email: this constraint, not the application
        // pre-check, is what makes concurrent duplicate signups fail.
        manager
            .create_index(
                Index::create()
                    .name("ux_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // todos
        manager
            .create_table(
                Table::create()
                    .table(Todos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Todos::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Todos::Name).string().not_null())
                    .col(
                        ColumnDef::new(Todos::Priority)
                            .custom(TodoPriorityEnum::Type)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Todos::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Todos::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Todos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Todos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_todos_user_id")
                            .from(Todos::Table, Todos::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_todos_user_id")
                    .table(Todos::Table)
                    .col(Todos::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_todos_completed")
                    .table(Todos::Table)
                    .col(Todos::Completed)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Todos::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        if manager.get_database_backend() == sea_orm::DatabaseBackend::Postgres {
            manager
                .drop_type(
                    PgType::drop()
                        .name(TodoPriorityEnum::Type)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}

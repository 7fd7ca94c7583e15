pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20260806_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260806_000001_init::Migration)]
    }
}

/// Count the number of migrations that have been applied to the database.
/// Returns 0 if the migration table doesn't exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0), // Migration table doesn't exist yet
        Err(e) => Err(e),
    }
}

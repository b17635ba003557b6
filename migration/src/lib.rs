pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20261016_000001_users;
mod m20261016_000002_qrcodes;
mod m20261016_000003_scan_logs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_users::Migration),
            Box::new(m20261016_000002_qrcodes::Migration),
            Box::new(m20261016_000003_scan_logs::Migration),
        ]
    }
}

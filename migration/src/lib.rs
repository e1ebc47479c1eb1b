pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_role_table;
mod m20261001_000002_create_user_group_table;
mod m20261001_000003_create_user_table;
mod m20261001_000004_create_user_has_user_group_table;
mod m20261001_000005_create_api_key_table;
mod m20261001_000006_create_api_key_has_user_group_table;
mod m20261001_000007_create_log_login_table;
mod m20261001_000008_create_log_login_failure_table;
mod m20261001_000009_create_log_request_table;
mod m20261001_000010_create_date_dimension_table;
mod m20261001_000011_create_healthz_table;
mod m20261001_000012_seed_role_table;

pub use m20261001_000012_seed_role_table::ROLES;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_role_table::Migration),
            Box::new(m20261001_000002_create_user_group_table::Migration),
            Box::new(m20261001_000003_create_user_table::Migration),
            Box::new(m20261001_000004_create_user_has_user_group_table::Migration),
            Box::new(m20261001_000005_create_api_key_table::Migration),
            Box::new(m20261001_000006_create_api_key_has_user_group_table::Migration),
            Box::new(m20261001_000007_create_log_login_table::Migration),
            Box::new(m20261001_000008_create_log_login_failure_table::Migration),
            Box::new(m20261001_000009_create_log_request_table::Migration),
            Box::new(m20261001_000010_create_date_dimension_table::Migration),
            Box::new(m20261001_000011_create_healthz_table::Migration),
            Box::new(m20261001_000012_seed_role_table::Migration),
        ]
    }
}

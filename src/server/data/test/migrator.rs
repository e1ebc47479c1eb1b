use ::migration::{Migrator, MigratorTrait, SchemaManager};
use sea_orm::{Database, DbErr, EntityTrait, PaginatorTrait};

/// Tests the ordered migrations against an empty database.
///
/// Expected: every table is created, the five roles are seeded and `down` drops the schema
#[tokio::test]
async fn migrates_up_and_down() -> Result<(), DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    Migrator::up(&db, None).await?;

    let manager = SchemaManager::new(&db);
    for table in [
        "role",
        "user_group",
        "user",
        "user_has_user_group",
        "api_key",
        "api_key_has_user_group",
        "log_login",
        "log_login_failure",
        "log_request",
        "date_dimension",
        "healthz",
    ] {
        assert!(manager.has_table(table).await?, "missing table {}", table);
    }

    assert_eq!(entity::prelude::Role::find().count(&db).await?, 5);
    assert!(entity::prelude::Role::find_by_id("ROLE_ROOT".to_string())
        .one(&db)
        .await?
        .is_some());

    // Nothing left to apply
    Migrator::up(&db, None).await?;
    assert_eq!(entity::prelude::Role::find().count(&db).await?, 5);

    Migrator::down(&db, None).await?;

    assert!(!manager.has_table("role").await?);
    assert!(!manager.has_table("user").await?);
    assert!(!manager.has_table("log_request").await?);

    Ok(())
}

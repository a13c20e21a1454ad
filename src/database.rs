use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Connect to the store and sync the `recipe` table schema from the entity
/// registry. There is no separate migration step.
pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    // The connect/acquire timeouts bound how long a request can wait on the
    // store; expiry surfaces as a 503 via AppError.
    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(60))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("recipe_service::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}

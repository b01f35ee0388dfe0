use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(connect_options(db_url)).await?;
    db.get_schema_registry("transformer_registry::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}

fn connect_options(db_url: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    if is_in_memory(db_url) {
        // Each pooled connection would open its own private database, and the
        // data is gone once the single connection closes.
        opt.max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
    } else {
        opt.max_connections(100)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(8))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(8))
            .max_lifetime(Duration::from_secs(8));
    }
    opt.sqlx_logging(true);

    opt
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.starts_with("sqlite:") && (db_url.contains(":memory:") || db_url.contains("mode=memory"))
}

use rocket_db_pools::{mongodb::Client, Database};

/// MongoDB connection pool, configured under `[default.databases.cafe]`.
#[derive(Database)]
#[database("cafe")]
pub struct CafeDb(Client);

pub mod config;
pub mod task;
pub mod timer;

use pomotodo_core::{Config, Database, Store};

/// Open the configured database as a record store.
pub fn open_store(config: &Config) -> Result<Store, Box<dyn std::error::Error>> {
    let db = Database::open_at(config.db_path()?)?;
    Ok(Store::new(db))
}

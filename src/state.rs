use anyhow::Context;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use crate::config::Config;
use crate::db::Database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: Arc<RwLock<Database>>,
    /// Held across snapshot, write and rename so disk writes land in order.
    persist_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!("Failed to create data dir {}", config.data_dir.display())
        })?;

        let db_path = config.db_path();
        let mut db = if db_path.exists() {
            let data = std::fs::read_to_string(&db_path)
                .with_context(|| format!("Failed to read {}", db_path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("Failed to parse {}", db_path.display()))?
        } else {
            Database::default()
        };

        let seeded = config.seed_demo_data && db.is_empty();
        if seeded {
            crate::seed::seed_demo_data(&mut db);
            tracing::info!(
                "Seeded demo data: {} users, {} gadgets, {} reviews",
                db.users.len(),
                db.gadgets.len(),
                db.reviews.len()
            );
        }

        let state = Self {
            config,
            db: Arc::new(RwLock::new(db)),
            persist_lock: Arc::new(Mutex::new(())),
        };
        if seeded {
            state.try_persist()?;
        }
        Ok(state)
    }

    /// Persist the database to disk (atomic write via temp file + rename).
    pub fn try_persist(&self) -> anyhow::Result<()> {
        let _guard = self.persist_lock.lock();
        let data = {
            let db = self.db.read();
            serde_json::to_string_pretty(&*db).context("Failed to serialize database")?
        };
        let db_path = self.config.db_path();
        let tmp_path = db_path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &data)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, &db_path)
            .with_context(|| format!("Failed to replace {}", db_path.display()))?;
        Ok(())
    }

    /// Persist after a mutation. The in-memory state stays authoritative, so a
    /// failed write is logged rather than surfaced to the client.
    pub fn persist(&self) {
        if let Err(e) = self.try_persist() {
            tracing::error!("Failed to persist database: {e:#}");
        }
    }
}

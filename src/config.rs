use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the JSON data file is stored
    pub data_dir: PathBuf,
    /// Server bind address
    pub bind_addr: String,
    /// Seed demo users, gadgets and reviews into an empty store on startup
    pub seed_demo_data: bool,
    /// Default size of the featured gadgets list
    pub featured_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            bind_addr: "127.0.0.1:8000".to_string(),
            seed_demo_data: true,
            featured_limit: 4,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("WISETECH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(addr) = std::env::var("WISETECH_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(val) = std::env::var("WISETECH_SEED") {
            config.seed_demo_data = parse_flag(&val).unwrap_or(config.seed_demo_data);
        }
        if let Ok(val) = std::env::var("WISETECH_FEATURED_LIMIT") {
            if let Ok(v) = val.parse() {
                config.featured_limit = v;
            }
        }

        config
    }

    /// Build a config rooted at `data_dir` with every other field defaulted.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("wisetech.json")
    }
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

use std::env;

use crate::utilities::constants::{CATALOG_URL, WORK_DIR};

#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub catalog_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: WORK_DIR.to_string(),
            catalog_url: CATALOG_URL.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.update_from_env();
        config
    }

    fn update_from_env(&mut self) {
        if let Ok(work_dir) = env::var("WORK_DIR") {
            if !work_dir.is_empty() {
                self.work_dir = work_dir;
            }
        }
        if let Ok(catalog_url) = env::var("CATALOG_URL") {
            if !catalog_url.is_empty() {
                self.catalog_url = catalog_url;
            }
        }
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: Config = Config::new();
}

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory the personalization stores persist their JSON blobs into.
    pub data_dir: String,
    /// Path of the static catalog file.
    pub catalog_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "./data/store".to_string()),
            catalog_path: env::var("CATALOG_PATH")
                .unwrap_or_else(|_| "./data/subscriptions.json".to_string()),
        }
    }
}

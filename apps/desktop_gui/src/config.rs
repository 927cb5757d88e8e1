use std::{collections::HashMap, fs, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    let path = base.join("stockroom").join("inventory.db");
    format!("sqlite://{}", path.to_string_lossy().replace('\\', "/"))
}

/// Resolves the database URL: built-in default, then `stockroom.toml`, then
/// environment variables, then the CLI flag. Later layers win.
pub fn load_settings(cli_database_url: Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("stockroom.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("database_url") {
                settings.database_url = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("DATABASE_URL") {
        settings.database_url = v;
    }
    if let Ok(v) = std::env::var("STOCKROOM__DATABASE_URL") {
        settings.database_url = v;
    }

    if let Some(v) = cli_database_url {
        settings.database_url = v;
    }

    settings.database_url = normalize_database_url(&settings.database_url);
    settings
}

fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return default_database_url();
    }

    if raw_database_url.starts_with("sqlite::memory:") || raw_database_url.contains("://") {
        return raw_database_url.to_string();
    }

    let path = raw_database_url
        .strip_prefix("sqlite:")
        .unwrap_or(raw_database_url);
    format!("sqlite://{}", path.replace('\\', "/"))
}

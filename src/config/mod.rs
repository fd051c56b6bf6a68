use crate::errors::{AppError, AppResult};
use crate::portal::Credential;
use crate::ui::messages::success;
use crate::utils::path::resolve_in;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod sections;

pub use sections::{
    AccountConfig, ListingConfig, PortalConfig, ReconcileConfig, RowLayout, SheetBackend,
    SheetColumns, SheetConfig,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub portal: PortalConfig,
    #[serde(default = "sections::default_accounts")]
    pub accounts: Vec<AccountConfig>,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            portal: PortalConfig::default(),
            accounts: sections::default_accounts(),
            listing: ListingConfig::default(),
            sheet: SheetConfig::default(),
            reconcile: ReconcileConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("ticketrecon")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".ticketrecon")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("ticketrecon.conf")
    }

    /// Return the full path of the SQLite run log
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("ticketrecon.sqlite")
    }

    /// Load configuration from the standard location, or defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    /// Load configuration from `path`, or defaults if the file does not exist
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    /// Initialize configuration and run-log files.
    /// Returns the path of the run-log database.
    pub fn init_all(
        config_path: &Path,
        custom_db: Option<String>,
        is_test: bool,
    ) -> AppResult<PathBuf> {
        let dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_dir);
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => resolve_in(&dir, &name),
            None => dir.join("ticketrecon.sqlite"),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(config_path)?;
            file.write_all(yaml.as_bytes())?;
            success(format!("Config file: {}", config_path.display()));
        }

        Ok(db_path)
    }

    /// Resolve every configured account into a credential pair.
    ///
    /// All accounts are resolved up front: a single missing variable is a
    /// configuration error and nothing is scraped.
    pub fn credentials(&self) -> AppResult<Vec<Credential>> {
        self.credentials_with(|name| env::var(name).ok())
    }

    /// Same as [`Config::credentials`] with an explicit variable lookup.
    pub fn credentials_with<F>(&self, lookup: F) -> AppResult<Vec<Credential>>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.accounts.is_empty() {
            return Err(AppError::Configuration(
                "no accounts configured".to_string(),
            ));
        }

        let mut missing = Vec::new();
        let mut out = Vec::with_capacity(self.accounts.len());

        for account in &self.accounts {
            let email = lookup(&account.email_env).filter(|v| !v.trim().is_empty());
            let password = lookup(&account.password_env).filter(|v| !v.is_empty());

            match (email, password) {
                (Some(email), Some(password)) => out.push(Credential::new(email.trim(), password)),
                (email, password) => {
                    if email.is_none() {
                        missing.push(account.email_env.clone());
                    }
                    if password.is_none() {
                        missing.push(account.password_env.clone());
                    }
                }
            }
        }

        if !missing.is_empty() {
            return Err(AppError::Configuration(format!(
                "missing environment variables: {}",
                missing.join(", ")
            )));
        }

        Ok(out)
    }
}

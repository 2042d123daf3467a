use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use dotenv::dotenv;

use crate::domain::validation::SchemaConfig;
use crate::errors::AppError;

pub const DEFAULT_CONTACTS_PATH: &str = "./.instance/contacts.json";

pub const CONTACTS_PATH_VAR: &str = "CONTACTS_PATH";
pub const NAME_MIN_VAR: &str = "CONTACT_NAME_MIN";
pub const NAME_MAX_VAR: &str = "CONTACT_NAME_MAX";
pub const PHONE_PATTERN_VAR: &str = "CONTACT_PHONE_PATTERN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub contacts_path: PathBuf,
    pub schema: SchemaConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contacts_path: PathBuf::from(DEFAULT_CONTACTS_PATH),
            schema: SchemaConfig::default(),
        }
    }
}

impl Config {
    /// Read settings from the process environment, after loading `.env` if
    /// one is present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup(CONTACTS_PATH_VAR) {
            config.contacts_path = PathBuf::from(path);
        }
        if let Some(min) = lookup(NAME_MIN_VAR) {
            config.schema.min_name_len = parse_var(NAME_MIN_VAR, &min)?;
        }
        if let Some(max) = lookup(NAME_MAX_VAR) {
            config.schema.max_name_len = parse_var(NAME_MAX_VAR, &max)?;
        }
        if let Some(pattern) = lookup(PHONE_PATTERN_VAR) {
            config.schema.phone_pattern = pattern;
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{key}={value:?}: {e}")))
}

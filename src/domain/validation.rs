use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::contact::NewContact;
use crate::errors::AppError;

pub const DEFAULT_MIN_NAME_LEN: usize = 3;
pub const DEFAULT_MAX_NAME_LEN: usize = 30;
pub const DEFAULT_PHONE_PATTERN: &str = r"^\d{10}$";

// Dot-separated atext on the left, at least two hostname labels on the right.
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?$";
const MAX_EMAIL_LEN: usize = 254;
const FIELDS: [&str; 3] = ["name", "email", "phone"];

/// Tunable strictness of the contact schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaConfig {
    pub min_name_len: usize,
    pub max_name_len: usize,
    pub phone_pattern: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            min_name_len: DEFAULT_MIN_NAME_LEN,
            max_name_len: DEFAULT_MAX_NAME_LEN,
            phone_pattern: DEFAULT_PHONE_PATTERN.to_string(),
        }
    }
}

/// The one schema every write goes through. Reports the first violated
/// constraint, checking `name`, `email`, `phone` and then unknown keys.
#[derive(Debug, Clone)]
pub struct ContactSchema {
    config: SchemaConfig,
    phone: Regex,
    email: Regex,
}

impl ContactSchema {
    pub fn new(config: SchemaConfig) -> Result<Self, AppError> {
        if config.min_name_len > config.max_name_len {
            return Err(AppError::Config(format!(
                "minimum name length {} exceeds maximum {}",
                config.min_name_len, config.max_name_len
            )));
        }

        Ok(Self {
            phone: Regex::new(&config.phone_pattern)?,
            email: Regex::new(EMAIL_PATTERN)?,
            config,
        })
    }

    pub fn validate(&self, body: &Value) -> Result<NewContact, AppError> {
        let Some(fields) = body.as_object() else {
            return Err(AppError::Validation(
                "\"value\" must be of type object".to_string(),
            ));
        };

        let name = required_string(fields, "name")?;
        self.check_name(name)?;

        let email = required_string(fields, "email")?;
        self.check_email(email)?;

        let phone = required_string(fields, "phone")?;
        self.check_phone(phone)?;

        if let Some(key) = fields.keys().find(|k| !FIELDS.contains(&k.as_str())) {
            return Err(AppError::Validation(format!("\"{key}\" is not allowed")));
        }

        debug!(name, "contact body passed validation");
        Ok(NewContact {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        })
    }

    fn check_name(&self, name: &str) -> Result<(), AppError> {
        let len = name.chars().count();

        if len < self.config.min_name_len {
            return Err(AppError::Validation(format!(
                "\"name\" length must be at least {} characters long",
                self.config.min_name_len
            )));
        }

        if len > self.config.max_name_len {
            return Err(AppError::Validation(format!(
                "\"name\" length must be less than or equal to {} characters long",
                self.config.max_name_len
            )));
        }
        Ok(())
    }

    fn check_email(&self, email: &str) -> Result<(), AppError> {
        if email.len() > MAX_EMAIL_LEN || !self.email.is_match(email) {
            return Err(AppError::Validation(
                "\"email\" must be a valid email".to_string(),
            ));
        }
        Ok(())
    }

    fn check_phone(&self, phone: &str) -> Result<(), AppError> {
        if !self.phone.is_match(phone) {
            return Err(AppError::Validation(format!(
                "\"phone\" with value \"{}\" fails to match the required pattern: /{}/",
                phone, self.config.phone_pattern
            )));
        }
        Ok(())
    }
}

fn required_string<'a>(fields: &'a Map<String, Value>, key: &str) -> Result<&'a str, AppError> {
    match fields.get(key) {
        None => Err(AppError::Validation(format!("\"{key}\" is required"))),
        Some(Value::String(s)) if s.is_empty() => Err(AppError::Validation(format!(
            "\"{key}\" is not allowed to be empty"
        ))),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(AppError::Validation(format!("\"{key}\" must be a string"))),
    }
}

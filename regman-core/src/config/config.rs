use crate::config::hash_algo::PasswordStorage;
use crate::is_default;
use anyhow::Result;
use derive_setters::Setters;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STUDENT_FILE: &str = "students.txt";
pub const DEFAULT_COURSE_FILE: &str = "courses.txt";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@gmail.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

#[derive(Default, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Setters)]
pub struct Config {
    #[serde(default, skip_serializing_if = "is_default")]
    pub storage: StorageInfo,
    #[serde(default, skip_serializing_if = "is_default")]
    pub auth: AuthInfo,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        if pretty {
            Ok(serde_json::to_string_pretty(self)?)
        } else {
            Ok(serde_json::to_string(self)?)
        }
    }
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

/// Locations of the two flat data files.
#[derive(Default, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Setters)]
#[setters(strip_option, into)]
pub struct StorageInfo {
    #[serde(default, skip_serializing_if = "is_default")]
    pub student_file: Option<String>,
    #[serde(default, skip_serializing_if = "is_default")]
    pub course_file: Option<String>,
}

impl StorageInfo {
    pub fn get_student_file(&self) -> &str {
        self.student_file.as_deref().unwrap_or(DEFAULT_STUDENT_FILE)
    }
    pub fn get_course_file(&self) -> &str {
        self.course_file.as_deref().unwrap_or(DEFAULT_COURSE_FILE)
    }
}

#[derive(Default, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Setters)]
#[setters(strip_option, into)]
pub struct AuthInfo {
    #[serde(default, skip_serializing_if = "is_default")]
    pub admin_email: Option<String>,
    /// Stored form of the admin password, digested with `password_storage`.
    #[serde(default, skip_serializing_if = "is_default")]
    pub admin_password: Option<String>,
    #[serde(default, skip_serializing_if = "is_default")]
    pub password_storage: Option<PasswordStorage>,
}

impl AuthInfo {
    pub fn get_admin_email(&self) -> &str {
        self.admin_email.as_deref().unwrap_or(DEFAULT_ADMIN_EMAIL)
    }
    pub fn get_password_storage(&self) -> PasswordStorage {
        self.password_storage.unwrap_or_default()
    }
    pub fn get_admin_password(&self) -> String {
        match self.admin_password.as_ref() {
            Some(password) => password.clone(),
            None => self
                .get_password_storage()
                .into_digest()
                .apply(DEFAULT_ADMIN_PASSWORD),
        }
    }
}

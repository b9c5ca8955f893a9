use anyhow::anyhow;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Component, Path, PathBuf};

use crate::config;
use crate::config::config_module::ConfigModule;
use regman_auth::auth::{AdminCredentials, PasswordDigest};

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// Validated, fully defaulted settings the registration manager runs with.
#[derive(Debug, Clone)]
pub struct Blueprint {
    pub storage: Storage,
    pub auth: Auth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storage {
    pub student_file: String,
    pub course_file: String,
}

#[derive(Debug, Clone)]
pub struct Auth {
    pub admin: AdminCredentials,
    /// Applied to student passwords before they are stored or compared.
    pub digest: PasswordDigest,
}

impl From<&config::StorageInfo> for Storage {
    fn from(storage: &config::StorageInfo) -> Self {
        Storage {
            student_file: storage.get_student_file().to_string(),
            course_file: storage.get_course_file().to_string(),
        }
    }
}

impl TryFrom<&config::AuthInfo> for Auth {
    type Error = anyhow::Error;

    fn try_from(auth: &config::AuthInfo) -> Result<Self, Self::Error> {
        let digest = auth.get_password_storage().into_digest();
        let admin = AdminCredentials::init(
            auth.get_admin_email().to_string(),
            auth.get_admin_password(),
            digest,
        )?;
        Ok(Auth { admin, digest })
    }
}

impl TryFrom<ConfigModule> for Blueprint {
    type Error = anyhow::Error;

    fn try_from(config_module: ConfigModule) -> Result<Self, Self::Error> {
        validate_config(&config_module)?;

        Ok(Self {
            storage: Storage::from(&config_module.storage),
            auth: Auth::try_from(&config_module.auth)?,
        })
    }
}

fn validate_config(config: &ConfigModule) -> anyhow::Result<()> {
    let student_file = config.storage.get_student_file();
    let course_file = config.storage.get_course_file();

    if student_file.trim().is_empty() {
        return Err(anyhow!("student_file must not be empty"));
    }
    if course_file.trim().is_empty() {
        return Err(anyhow!("course_file must not be empty"));
    }
    if lexical_path(student_file) == lexical_path(course_file) {
        return Err(anyhow!(
            "student_file and course_file must point to different files: {}",
            student_file
        ));
    }

    let email = config.auth.get_admin_email();
    if !EMAIL.is_match(email) {
        return Err(anyhow!("Invalid admin_email: {}", email));
    }

    if let Some(password) = config.auth.admin_password.as_ref() {
        if password.is_empty() {
            return Err(anyhow!("admin_password must not be empty"));
        }
    }

    Ok(())
}

/// Folds `.` and `..` segments without touching the filesystem, so two
/// spellings of one path compare equal.
fn lexical_path(path: &str) -> PathBuf {
    let mut clean = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match clean.components().next_back() {
                Some(Component::Normal(_)) => {
                    clean.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => clean.push(".."),
            },
            other => clean.push(other.as_os_str()),
        }
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::hash_algo::PasswordStorage;
    use crate::config::{AuthInfo, Config, StorageInfo};

    fn blueprint(config: Config) -> anyhow::Result<Blueprint> {
        Blueprint::try_from(ConfigModule::from(config))
    }

    #[test]
    fn test_default_blueprint() {
        let blueprint = blueprint(Config::default()).unwrap();
        assert_eq!(
            blueprint.storage,
            Storage {
                student_file: "students.txt".to_string(),
                course_file: "courses.txt".to_string(),
            }
        );
        assert_eq!(blueprint.auth.digest, PasswordDigest::Sha256);
        assert!(blueprint.auth.admin.authenticate("admin@gmail.com", "admin"));
    }

    #[test]
    fn test_custom_admin() {
        let auth = AuthInfo::default()
            .admin_email("dean@uni.edu")
            .admin_password("letmein")
            .password_storage(PasswordStorage::Plaintext);
        let blueprint = blueprint(Config::default().auth(auth)).unwrap();

        assert_eq!(blueprint.auth.digest, PasswordDigest::Plaintext);
        assert!(blueprint.auth.admin.authenticate("dean@uni.edu", "letmein"));
        assert!(!blueprint.auth.admin.authenticate("admin@gmail.com", "admin"));
    }

    #[test]
    fn test_same_files_rejected() {
        let storage = StorageInfo::default()
            .student_file("data.txt")
            .course_file("data.txt");
        let err = blueprint(Config::default().storage(storage)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "student_file and course_file must point to different files: data.txt"
        );
    }

    #[test]
    fn test_aliased_files_rejected() {
        for (student_file, course_file) in [
            ("data.txt", "./data.txt"),
            ("db/data.txt", "db/../db/./data.txt"),
            ("db//data.txt", "db/data.txt"),
        ] {
            let storage = StorageInfo::default()
                .student_file(student_file)
                .course_file(course_file);
            assert!(
                blueprint(Config::default().storage(storage)).is_err(),
                "{} and {} should be rejected",
                student_file,
                course_file
            );
        }

        let storage = StorageInfo::default()
            .student_file("../students.txt")
            .course_file("students.txt");
        assert!(blueprint(Config::default().storage(storage)).is_ok());
    }

    #[test]
    fn test_lexical_path() {
        assert_eq!(lexical_path("./a/./b"), PathBuf::from("a/b"));
        assert_eq!(lexical_path("a/../b"), PathBuf::from("b"));
        assert_eq!(lexical_path("../../a"), PathBuf::from("../../a"));
    }

    #[test]
    fn test_empty_file_rejected() {
        let storage = StorageInfo::default().student_file(" ");
        assert!(blueprint(Config::default().storage(storage)).is_err());
    }

    #[test]
    fn test_invalid_email_rejected() {
        for email in ["admin", "admin@", "a b@c.d", "@gmail.com"] {
            let auth = AuthInfo::default().admin_email(email);
            let err = blueprint(Config::default().auth(auth)).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid admin_email: {}", email));
        }
    }

    #[test]
    fn test_empty_admin_password_rejected() {
        let auth = AuthInfo::default().admin_password("");
        assert!(blueprint(Config::default().auth(auth)).is_err());
    }
}

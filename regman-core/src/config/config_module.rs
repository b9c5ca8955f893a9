use crate::config::Config;
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// A [`Config`] together with the directory it was read from.
#[derive(Default, Debug, Clone)]
pub struct ConfigModule {
    pub config: Config,
    pub base_dir: Option<PathBuf>,
}

impl Deref for ConfigModule {
    type Target = Config;
    fn deref(&self) -> &Self::Target {
        &self.config
    }
}

impl From<Config> for ConfigModule {
    fn from(value: Config) -> Self {
        Self {
            config: value,
            base_dir: None,
        }
    }
}

impl ConfigModule {
    /// Makes relative data-file paths relative to the config file's directory.
    pub fn resolve(self, parent: Option<&Path>) -> Self {
        let base_dir = match parent {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => return self,
        };

        let mut config = self.config;
        let student_file = join(&base_dir, config.storage.get_student_file());
        let course_file = join(&base_dir, config.storage.get_course_file());
        config.storage.student_file = Some(student_file);
        config.storage.course_file = Some(course_file);

        ConfigModule {
            config,
            base_dir: Some(base_dir),
        }
    }
}

fn join(base_dir: &Path, file: &str) -> String {
    let path = Path::new(file);
    if file.trim().is_empty() || path.is_absolute() {
        file.to_string()
    } else {
        base_dir.join(path).to_string_lossy().into_owned()
    }
}

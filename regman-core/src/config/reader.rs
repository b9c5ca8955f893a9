use crate::config::config_module::ConfigModule;
use crate::config::Config;
use crate::runtime::TargetRuntime;
use anyhow::Context;
use std::path::Path;

/// Reads the configuration from a file and resolves the data-file paths to create a ConfigModule.
pub struct ConfigReader {
    runtime: TargetRuntime,
}

/// Response of a file read operation
#[derive(Debug)]
struct FileRead {
    content: String,
    path: String,
}

impl ConfigReader {
    pub fn init(runtime: TargetRuntime) -> Self {
        Self { runtime }
    }

    /// Reads the config file and returns serialized config
    pub async fn read<T: AsRef<str>>(&self, file: T) -> anyhow::Result<ConfigModule> {
        let file = self.read_file(file).await?;
        let config = Config::from_json(&file.content)
            .with_context(|| format!("Invalid config file: {}", file.path))?;
        let parent = Path::new(&file.path).parent();
        let config_module = ConfigModule::from(config).resolve(parent);

        Ok(config_module)
    }

    /// Falls back to the default config when no path is given.
    pub async fn read_or_default<T: AsRef<str>>(
        &self,
        file: Option<T>,
    ) -> anyhow::Result<ConfigModule> {
        match file {
            Some(file) => self.read(file).await,
            None => {
                log::debug!("No config file given, using defaults");
                Ok(ConfigModule::default())
            }
        }
    }

    async fn read_file<T: AsRef<str>>(&self, file: T) -> anyhow::Result<FileRead> {
        let content = self
            .runtime
            .file
            .read(file.as_ref())
            .await
            .with_context(|| format!("Unable to read config file: {}", file.as_ref()))?;

        Ok(FileRead {
            content,
            path: file.as_ref().to_string(),
        })
    }
}

use crate::cli::commands::{Cli, Command};
use crate::cli::rt;
use crate::cli::session::Session;
use anyhow::anyhow;
use clap::Parser;
use regman_core::app_ctx::AppContext;
use regman_core::blueprint::Blueprint;
use regman_core::config::config_module::ConfigModule;
use regman_core::config::reader::ConfigReader;
use regman_core::config::{AuthInfo, Config, StorageInfo};
use regman_core::registry::RegistrationManager;
use regman_core::runtime::TargetRuntime;
use std::sync::Arc;
use tokio::io::BufReader;

pub async fn fork_run() -> anyhow::Result<()> {
    logger_init();
    let cli = Cli::parse();
    let runtime = rt::init();

    run(cli, runtime).await
}

async fn run(cli: Cli, runtime: TargetRuntime) -> anyhow::Result<()> {
    let config_reader = ConfigReader::init(runtime.clone());
    match cli.command {
        Command::Start { config_path } => {
            let config = config_reader.read_or_default(config_path).await?;
            let app_context = app_context(config, runtime)?;
            let manager = RegistrationManager::load(Arc::new(app_context)).await?;

            let input = BufReader::new(tokio::io::stdin());
            let mut session = Session::new(manager, input, tokio::io::stdout());
            session.run().await?;
        }
        Command::Check { config_path } => {
            let config = config_reader.read(config_path).await?;
            let blueprint = Blueprint::try_from(config);
            match blueprint {
                Ok(_) => {
                    log::info!("Config is valid");
                }
                Err(e) => {
                    log::error!("Invalid config: {}", e);
                    return Err(e);
                }
            }
        }
        Command::Init {
            config_path,
            email,
            password,
            storage,
            student_file,
            course_file,
            force,
            print,
        } => {
            if !force && runtime.file.exists(&config_path).await? {
                return Err(anyhow!(
                    "{} already exists, pass --force to overwrite it",
                    config_path
                ));
            }

            let password_storage = storage.unwrap_or_default();
            let config = Config {
                storage: StorageInfo {
                    student_file,
                    course_file,
                },
                auth: AuthInfo {
                    admin_email: Some(email),
                    admin_password: Some(password_storage.into_digest().apply(password)),
                    password_storage: Some(password_storage),
                },
            };
            // validate before anything lands on disk
            Blueprint::try_from(ConfigModule::from(config.clone()))?;

            let json = config.to_json(true)?;
            if print {
                display(&json);
            }

            runtime
                .file
                .write(&config_path, json.as_bytes())
                .await
                .map_err(|e| anyhow!("Unable to write config with error: {}", e))?;
            log::info!("Config written to {}", config_path);
        }
        Command::Schema => {
            display(Config::json_schema()?);
        }
    }
    Ok(())
}

fn app_context(config: ConfigModule, runtime: TargetRuntime) -> anyhow::Result<AppContext> {
    let blueprint = Blueprint::try_from(config)?;
    Ok(AppContext { blueprint, runtime })
}

fn display<T: AsRef<str>>(content: T) {
    println!("{}", content.as_ref());
}

fn logger_init() {
    // set the log level
    const LONG_ENV_FILTER_VAR_NAME: &str = "REGMAN_LOG_LEVEL";
    // Select which env variable to use for the log level filter. This is because filter_or doesn't allow picking between multiple env_var for the filter value
    let filter_env_name =
        std::env::var(LONG_ENV_FILTER_VAR_NAME).unwrap_or(LONG_ENV_FILTER_VAR_NAME.to_string());

    // use the log level from the env if there is one, otherwise stay quiet enough for the prompts.
    let env = env_logger::Env::new().filter_or(filter_env_name, "warn");

    let _ = env_logger::Builder::from_env(env).try_init();
}

use clap::{Parser, Subcommand};
use regman_core::config::hash_algo::PasswordStorage;

const VERSION: &str = match option_env!("APP_VERSION") {
    Some(version) => version,
    _ => "0.1.0-dev",
};
#[derive(Parser)]
#[command(name = "regman", version = VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Starts the interactive registration console
    Start {
        /// Path for the configuration file. Defaults are used when omitted.
        config_path: Option<String>,
    },
    /// Checks the configuration file for errors
    Check {
        /// Path for the configuration file.
        #[arg(required = true)]
        config_path: String,
    },
    /// Initializes the configuration file
    /// It stores the admin credentials and the data file locations
    Init {
        /// Path where the configuration file is written.
        #[arg(required = true)]
        config_path: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// How passwords are stored: `sha256` or `plaintext`.
        #[arg(short, long)]
        storage: Option<PasswordStorage>,
        #[arg(long)]
        student_file: Option<String>,
        #[arg(long)]
        course_file: Option<String>,
        /// Overwrite an existing configuration file.
        #[arg(short, long)]
        force: bool,
        /// Also print the written configuration.
        #[arg(long)]
        print: bool,
    },
    /// Prints the JSON schema of the configuration file
    Schema,
}

mod config;
pub mod config_module;
pub mod hash_algo;
pub mod reader;

pub use config::*;

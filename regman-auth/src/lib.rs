pub mod auth;
pub mod local_crypto;

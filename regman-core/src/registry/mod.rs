mod manager;
pub mod outcome;
pub mod records;

pub use manager::RegistrationManager;

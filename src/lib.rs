pub mod config;
pub mod database;
pub mod errors;

pub use config::DatabaseConfig;
pub use errors::DatabaseError;

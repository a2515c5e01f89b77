pub mod config;
pub mod driver;
pub mod http;
pub mod publish;
pub mod record;
pub mod scrapers;

pub mod error;

pub use error::ResultSyncError;

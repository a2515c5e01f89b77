pub mod defaults;
pub mod loader;
pub mod schema;
pub mod settings;
pub mod validator;

pub use loader::ConfigLoader;
pub use schema::*;
pub use settings::RunSettings;
pub use validator::ConfigValidator;

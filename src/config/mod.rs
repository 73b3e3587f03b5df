//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::SpendwisePaths;
pub use settings::Settings;

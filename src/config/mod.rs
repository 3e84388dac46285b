//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::RosterPaths;
pub use settings::Settings;

pub mod filename;
pub mod logger;

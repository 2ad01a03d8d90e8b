pub mod app_config;
pub mod exempt_paths;

pub use app_config::AppConfig;
pub use exempt_paths::ExemptPaths;

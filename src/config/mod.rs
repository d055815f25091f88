//! Configuration loading and management for the payroll engine.
//!
//! This module loads the listener settings and the seeded administrator
//! account from a YAML file.
//!
//! # Example
//!
//! ```
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::from_yaml_str("server:\n  port: 3000\n").unwrap();
//! assert_eq!(config.admin().name, "System Admin");
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AdminSeed, AppConfig, ServerConfig};

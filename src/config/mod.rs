//! Configuration loading for the paystub service.
//!
//! The service reads a single YAML file with `server`, `auth`, `mail` and
//! `assets` sections.
//!
//! # Example
//!
//! ```no_run
//! use paystub_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/paystubs.yaml").unwrap();
//! println!("Outbox: {}", config.config().mail.outbox_dir.display());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, AssetsConfig, AuthConfig, MailConfig, ServerConfig};

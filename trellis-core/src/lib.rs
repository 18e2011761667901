//! # Trellis Core Library (`trellis-core`)
//!
//! `trellis-core` is the foundational layer of the Trellis framework. It
//! provides the value types, configuration handling, logging bootstrap, and
//! error taxonomy shared by the business-object substrate in
//! `trellis-domain`.
//!
//! ## Purpose
//!
//! - **Error Handling**: a unified error system through [`CoreError`] and
//!   the specific [`ConfigError`] and [`LoggingError`] types.
//! - **Core Value Types**: the normalized entity identifier
//!   [`EntityId`] and the notification batching policy [`BindingMode`].
//! - **Configuration Management**: TOML-based loading with default
//!   fallbacks and validation via [`ConfigLoader`] and [`CoreConfig`].
//! - **Logging**: a flexible bootstrap on top of `tracing`, configurable
//!   for console and rolling-file output in text or JSON format.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trellis_core::config::ConfigLoader;
//! use trellis_core::error::CoreError;
//! use trellis_core::logging::init_logging;
//!
//! fn main() -> Result<(), CoreError> {
//!     let config = ConfigLoader::load()?;
//!     init_logging(&config.logging, false)?;
//!     tracing::info!("Trellis core initialized.");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

// Re-export key types for convenience
pub use config::{BindingConfig, ConfigLoader, CoreConfig, LoggingConfig};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_logging, init_minimal_logging};
pub use types::{BindingMode, EntityId};

//! Configuration management for the Trellis core layer.
//!
//! - [`types`] defines the configuration schema ([`CoreConfig`],
//!   [`LoggingConfig`], [`BindingConfig`]).
//! - [`defaults`] provides default values for absent fields.
//! - [`loader`] implements locating, parsing, and validating the
//!   configuration file ([`ConfigLoader`]).

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{BindingConfig, CoreConfig, LoggingConfig};

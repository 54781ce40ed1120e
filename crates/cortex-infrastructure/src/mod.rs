//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns that support the application and domain
//! layers: configuration loading, structured logging, and the composition
//! root that wires concrete providers into the application context.
//!
//! ## Module Categories
//!
//! ### Configuration & Composition
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered TOML/env configuration (figment) |
//! | [`di`] | Composition root (`bootstrap::build`) |
//! | [`constants`] | Centralized configuration defaults |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod utils;

pub use error_ext::ErrorContext;
pub use utils::TimedOperation;

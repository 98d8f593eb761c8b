//! # Poul Common
//!
//! Shared error type and logging bootstrap used by every crate in the
//! Poul Le Fun workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{PoulError, Result};
pub use logging::{init_default_logging, init_logging, LoggingConfig};

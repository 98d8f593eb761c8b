//! Display text for the Poul Le Fun tournament front end
//!
//! This crate owns every user-visible string of the application. It provides:
//!
//! - A static, language-keyed [`Catalog`] of nested display templates
//! - [`LocaleState`], the single active locale with a gated switching seam
//! - [`resolve`], a pure dot-path lookup with `{{name}}` substitution that
//!   never fails the caller
//! - [`I18nManager`], the facade UI collaborators hold on to
//! - [`CatalogAudit`], a cross-locale consistency report
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use poul_i18n::{params, Catalog, I18nManager, LocaleState};
//!
//! let manager = I18nManager::new(Catalog::builtin(), Arc::new(LocaleState::default()));
//!
//! assert_eq!(manager.t("common.save"), "Enregistrer");
//! assert_eq!(
//!     manager.t_with("nameBank.chicksReady", &params!["count" => 4]),
//!     "🐥 Poussins prêts: 4"
//! );
//! assert_eq!(manager.t("common.nope"), "common.nope");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod audit;
pub mod catalog;
pub mod error;
pub mod locale;
pub mod manager;
pub mod params;
pub mod resolver;
pub mod state;

pub use audit::{CatalogAudit, LocaleAudit, PlaceholderMismatch};
pub use catalog::{Catalog, CatalogBuilder, Node};
pub use error::{I18nError, I18nResult, ResolveIssue};
pub use locale::{Language, LocaleTag, DEFAULT_LOCALE};
pub use manager::I18nManager;
pub use params::{ParamValue, Params};
pub use resolver::{interpolate, placeholders, resolve, resolve_detailed, Interpolated, Resolution};
pub use state::{LocaleRequest, LocaleState, SwitchPolicy};

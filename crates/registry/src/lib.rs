//! Widget catalog.
//!
//! Widgets come from two places:
//!
//! - [`builtins`]: a static registry compiled into the process, built once on
//!   first access.
//! - Hosted widgets (apps and extensions), fetched through a [`WidgetProvider`]
//!   and memoized per access scope in a [`CatalogCache`].
//!
//! [`CatalogResolver`] fronts both for one [`CatalogScope`], and can produce a
//! synchronous [`WidgetCatalog`] snapshot for the renderable resolver.

pub mod builtins;
pub mod cache;
pub mod catalog;
pub mod provider;
pub mod resolver;

pub use builtins::{BUILTINS, BuiltinRegistry};
pub use cache::{CatalogCache, WidgetLoader};
pub use catalog::WidgetCatalog;
pub use provider::{CatalogScope, ProviderError, WidgetProvider};
pub use resolver::CatalogResolver;

//! Renderable widget resolution.
//!
//! Turns synchronized controls, sidebar references and editor slots into
//! [`Renderable`] descriptions against a [`WidgetCatalog`] snapshot. Resolution
//! is synchronous and never fails: lookup and compatibility problems are
//! reported as data through [`Problem`].
//!
//! [`WidgetCatalog`]: vellum_registry::WidgetCatalog

mod params;
pub mod renderable;
mod slots;

pub use params::merge_defaults;
pub use renderable::{Parameters, Problem, RenderOptions, Renderable, Renderables, build_renderable, build_renderables};
pub use slots::{build_editor_renderables, build_sidebar_renderables};

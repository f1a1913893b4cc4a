//! Editor configuration data model.
//!
//! Every crate in the workspace speaks these types:
//!
//! - [`Field`] / [`FieldType`]: content type fields and their normalized type
//! - [`WidgetNamespace`] / [`WidgetKey`]: the identity of a widget
//! - [`Control`]: one field's widget assignment
//! - [`WidgetRef`]: a positional widget reference in the sidebar or editor slots
//! - [`ConfigurationEntity`]: the per-content-type editor configuration
//! - [`WidgetDescriptor`]: catalog metadata for a widget
//! - [`TargetState`]: a caller-declared desired configuration
//!
//! Serialized names follow the stored JSON shape (`fieldId`, `widgetNamespace`,
//! `widgetId`, ...).

pub mod control;
pub mod descriptor;
pub mod entity;
pub mod field;
pub mod target;
pub mod widget;

pub use control::Control;
pub use descriptor::{InstallationParameters, ParameterDefinition, WidgetDescriptor, WidgetRenderer};
pub use entity::{ConfigurationEntity, ContentType};
pub use field::{Field, FieldItems, FieldType};
pub use target::{ControlTarget, EditorTarget, SidebarTarget, TargetState, TypeTarget};
pub use widget::{ParseWidgetKeyError, Settings, WidgetKey, WidgetNamespace, WidgetRef};

//! Caller-declared desired editor configuration.
//!
//! A target state is only ever produced by the validating parser in
//! `vellum-reconcile`; these types carry no deserialization of their own.

use std::collections::BTreeMap;

use crate::widget::Settings;

/// Desired configuration per content type id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetState {
	pub types: BTreeMap<String, TypeTarget>,
}

impl TargetState {
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	pub fn get(&self, type_id: &str) -> Option<&TypeTarget> {
		self.types.get(type_id)
	}
}

/// Desired configuration for one content type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeTarget {
	pub controls: Option<Vec<ControlTarget>>,
	pub sidebar: Option<SidebarTarget>,
	pub editor: Option<EditorTarget>,
}

/// Attach the acting widget to the field `field_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlTarget {
	pub field_id: String,
	pub settings: Option<Settings>,
}

/// Attach the acting widget to the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarTarget {
	/// `true`: append with no settings.
	Append,
	/// An object: insert at `position` (append when absent) with optional settings.
	Placed { position: Option<usize>, settings: Option<Settings> },
}

/// Make the acting widget the entry editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorTarget {
	/// `true`: no settings.
	Enabled,
	/// An object carrying settings.
	Configured { settings: Option<Settings> },
}

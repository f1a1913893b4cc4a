//! Target-state validation.
//!
//! A small recursive-descent checker over the caller's JSON document. It is
//! pure and fails fast: the first invalid sub-structure is reported with its
//! path and nothing else is examined. A document that passes is returned as a
//! typed [`TargetState`].
//!
//! Accepted shape:
//!
//! ```text
//! null | {} | {
//!   "EditorInterface": {
//!     "<typeId>": {
//!       "controls"?: [{ "fieldId": "<non-empty>", "settings"?: {..} }],
//!       "sidebar"?:  true | { "position"?: <uint>, "settings"?: {..} },
//!       "editor"?:   true | { "settings"?: {..} }
//!     }
//!   }
//! }
//! ```

use std::fmt;

use serde_json::{Map, Value};
use vellum_primitives::{ControlTarget, EditorTarget, Settings, SidebarTarget, TargetState, TypeTarget};


/// The single recognized top-level key.
pub const EDITOR_INTERFACE_KEY: &str = "EditorInterface";

/// A malformed target state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid target state at `{path}`: {reason}")]
pub struct ValidationError {
	/// Slash-separated location of the offending value, e.g. `EditorInterface/blogPost/controls/0/fieldId`.
	pub path: String,
	pub reason: String,
}

/// Checks `value` without keeping the parsed result.
pub fn validate(value: &Value) -> Result<(), ValidationError> {
	parse_target_state(value).map(|_| ())
}

/// Validates `value` and converts it into a [`TargetState`].
pub fn parse_target_state(value: &Value) -> Result<TargetState, ValidationError> {
	let root = Path::root();
	let document = match value {
		Value::Null => return Ok(TargetState::default()),
		Value::Object(document) => document,
		_ => return Err(root.error("target state must be an object")),
	};

	if let Some(key) = document.keys().find(|key| *key != EDITOR_INTERFACE_KEY) {
		return Err(root.child(key).error(format!("unrecognized key; only `{EDITOR_INTERFACE_KEY}` is allowed")));
	}

	let mut state = TargetState::default();
	let path = root.child(EDITOR_INTERFACE_KEY);
	let per_type = match document.get(EDITOR_INTERFACE_KEY) {
		None | Some(Value::Null) => return Ok(state),
		Some(Value::Object(per_type)) => per_type,
		Some(_) => return Err(path.error("must be an object keyed by content type id")),
	};

	for (type_id, target) in per_type {
		let target = type_target(target, &path.child(type_id))?;
		state.types.insert(type_id.clone(), target);
	}
	Ok(state)
}

fn type_target(value: &Value, path: &Path) -> Result<TypeTarget, ValidationError> {
	let Value::Object(entry) = value else {
		return Err(path.error("content type target must be an object"));
	};

	let controls = match entry.get("controls") {
		None => None,
		Some(Value::Array(items)) => {
			let path = path.child("controls");
			let controls = items
				.iter()
				.enumerate()
				.map(|(i, item)| control_target(item, &path.child(i)))
				.collect::<Result<Vec<_>, _>>()?;
			Some(controls)
		}
		Some(_) => return Err(path.child("controls").error("must be an array")),
	};

	let sidebar = match entry.get("sidebar") {
		None => None,
		Some(Value::Bool(true)) => Some(SidebarTarget::Append),
		Some(Value::Object(sidebar)) => Some(sidebar_target(sidebar, &path.child("sidebar"))?),
		Some(_) => return Err(path.child("sidebar").error("must be `true` or an object")),
	};

	let editor = match entry.get("editor") {
		None => None,
		Some(Value::Bool(true)) => Some(EditorTarget::Enabled),
		Some(Value::Object(editor)) => {
			let path = path.child("editor");
			Some(EditorTarget::Configured {
				settings: settings(editor, &path)?,
			})
		}
		Some(_) => return Err(path.child("editor").error("must be `true` or an object")),
	};

	Ok(TypeTarget { controls, sidebar, editor })
}

fn control_target(value: &Value, path: &Path) -> Result<ControlTarget, ValidationError> {
	let Value::Object(control) = value else {
		return Err(path.error("control target must be an object"));
	};
	let field_id = match control.get("fieldId") {
		Some(Value::String(id)) if !id.is_empty() => id.clone(),
		Some(Value::String(_)) => return Err(path.child("fieldId").error("must not be empty")),
		Some(_) => return Err(path.child("fieldId").error("must be a string")),
		None => return Err(path.child("fieldId").error("is required")),
	};
	Ok(ControlTarget {
		field_id,
		settings: settings(control, path)?,
	})
}

fn sidebar_target(sidebar: &Map<String, Value>, path: &Path) -> Result<SidebarTarget, ValidationError> {
	let position = match sidebar.get("position") {
		None => None,
		Some(Value::Number(n)) => match n.as_u64().and_then(|p| usize::try_from(p).ok()) {
			Some(position) => Some(position),
			None => return Err(path.child("position").error("must be a non-negative integer")),
		},
		Some(_) => return Err(path.child("position").error("must be a non-negative integer")),
	};
	Ok(SidebarTarget::Placed {
		position,
		settings: settings(sidebar, path)?,
	})
}

/// Reads the optional `settings` object of `parent`.
fn settings(parent: &Map<String, Value>, path: &Path) -> Result<Option<Settings>, ValidationError> {
	match parent.get("settings") {
		None => Ok(None),
		Some(Value::Object(settings)) => Ok(Some(settings.clone())),
		Some(_) => Err(path.child("settings").error("must be an object")),
	}
}

/// Location inside the document being validated.
#[derive(Debug, Clone, Default)]
struct Path(Vec<String>);

impl Path {
	fn root() -> Self {
		Self::default()
	}

	fn child(&self, segment: impl ToString) -> Self {
		let mut segments = self.0.clone();
		segments.push(segment.to_string());
		Self(segments)
	}

	fn error(&self, reason: impl Into<String>) -> ValidationError {
		ValidationError {
			path: self.to_string(),
			reason: reason.into(),
		}
	}
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0.is_empty() {
			return f.write_str("<root>");
		}
		f.write_str(&self.0.join("/"))
	}
}

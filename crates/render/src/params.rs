//! Parameter default merging.

use vellum_primitives::{ParameterDefinition, Settings};

/// Fills in declared defaults for parameters `explicit` does not set.
///
/// Explicit values always win, including explicit `null`. Definitions
/// without a default stay absent.
pub fn merge_defaults(explicit: Option<&Settings>, definitions: &[ParameterDefinition]) -> Settings {
	let mut merged = explicit.cloned().unwrap_or_default();
	for definition in definitions {
		if merged.contains_key(&definition.id) {
			continue;
		}
		if let Some(default) = &definition.default {
			merged.insert(definition.id.clone(), default.clone());
		}
	}
	merged
}

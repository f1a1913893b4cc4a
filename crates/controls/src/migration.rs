//! Builtin widget migrations.
//!
//! Retired builtin editors are rewritten to their replacements when a control
//! is synchronized. Rules are ordered and the first match wins.

use serde::Deserialize;
use vellum_primitives::{Control, FieldType, WidgetNamespace};

/// Rewrites builtin widget `from` to `to`, optionally only for some field types.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationRule {
	pub from: String,
	pub to: String,
	#[serde(default)]
	pub field_types: Option<Vec<FieldType>>,
}

impl MigrationRule {
	pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
		Self {
			from: from.into(),
			to: to.into(),
			field_types: None,
		}
	}

	pub fn for_types(mut self, field_types: &[FieldType]) -> Self {
		self.field_types = Some(field_types.to_vec());
		self
	}

	/// Whether this rule rewrites `widget_id` on a field of `field_type`.
	pub fn matches(&self, widget_id: &str, field_type: Option<FieldType>) -> bool {
		if self.from != widget_id {
			return false;
		}
		match (&self.field_types, field_type) {
			(None, _) => true,
			(Some(types), Some(field_type)) => types.contains(&field_type),
			(Some(_), None) => false,
		}
	}
}

/// Ordered migration rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationTable {
	rules: Vec<MigrationRule>,
}

impl MigrationTable {
	/// A table with no rules.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Rules for every retired builtin field editor.
	pub fn builtin() -> Self {
		use FieldType::*;
		Self {
			rules: vec![
				MigrationRule::new("sectionHeading", "singleLine"),
				MigrationRule::new("ooyalaEditor", "singleLine"),
				MigrationRule::new("kalturaEditor", "singleLine"),
				MigrationRule::new("ooyalaMultiAssetEditor", "listInput"),
				MigrationRule::new("kalturaMultiVideoEditor", "listInput"),
				MigrationRule::new("entryCardEditor", "entryLinkEditor").for_types(&[Entry]),
				MigrationRule::new("entryCardsEditor", "entryLinksEditor").for_types(&[Entries]),
				MigrationRule::new("assetGalleryEditor", "assetLinksEditor").for_types(&[Assets]),
			],
		}
	}

	/// Appends rules after the existing ones.
	pub fn with_rules(mut self, rules: impl IntoIterator<Item = MigrationRule>) -> Self {
		self.rules.extend(rules);
		self
	}

	pub fn rules(&self) -> &[MigrationRule] {
		&self.rules
	}

	/// Finds the first rule that applies to a builtin `widget_id`.
	pub fn find(&self, widget_id: &str, field_type: Option<FieldType>) -> Option<&MigrationRule> {
		self.rules.iter().find(|rule| rule.matches(widget_id, field_type))
	}

	/// Applies the first matching rule to `control`. Only builtin controls migrate.
	///
	/// Returns whether the control was rewritten.
	pub fn apply(&self, control: &mut Control, field_type: Option<FieldType>) -> bool {
		if control.widget_namespace != Some(WidgetNamespace::Builtin) {
			return false;
		}
		let Some(widget_id) = control.widget_id.as_deref() else {
			return false;
		};
		let Some(rule) = self.find(widget_id, field_type) else {
			return false;
		};
		tracing::debug!(field = %control.field_id, from = %rule.from, to = %rule.to, "migrating builtin widget");
		control.widget_id = Some(rule.to.clone());
		true
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	use vellum_primitives::WidgetKey;

	use super::*;

	fn table() -> MigrationTable {
		MigrationTable::empty()
			.with_rules([MigrationRule::new("oldMarkdown", "markdown")])
			.with_rules([MigrationRule::new("cards", "links").for_types(&[FieldType::Entries])])
			.with_rules([MigrationRule::new("oldMarkdown", "multipleLine")])
	}

	#[rstest]
	#[case::plain_rule(WidgetKey::builtin("oldMarkdown"), Some(FieldType::Text), Some("markdown"))]
	#[case::typed_rule_matches(WidgetKey::builtin("cards"), Some(FieldType::Entries), Some("links"))]
	#[case::typed_rule_other_type(WidgetKey::builtin("cards"), Some(FieldType::Entry), None)]
	#[case::typed_rule_unknown_type(WidgetKey::builtin("cards"), None, None)]
	#[case::extension_untouched(WidgetKey::extension("oldMarkdown"), Some(FieldType::Text), None)]
	#[case::app_untouched(WidgetKey::app("oldMarkdown"), Some(FieldType::Text), None)]
	#[case::no_rule(WidgetKey::builtin("markdown"), Some(FieldType::Text), None)]
	fn apply_rewrites_only_matching_builtins(#[case] key: WidgetKey, #[case] field_type: Option<FieldType>, #[case] expected: Option<&str>) {
		let mut control = Control::assigned("f", &key);
		let migrated = table().apply(&mut control, field_type);
		assert_eq!(migrated, expected.is_some());
		assert_eq!(control.widget_id.as_deref(), Some(expected.unwrap_or(key.id.as_str())));
		assert_eq!(control.widget_namespace, Some(key.namespace));
	}

	#[test]
	fn first_matching_rule_wins() {
		assert_eq!(table().find("oldMarkdown", None).map(|r| r.to.as_str()), Some("markdown"));
	}

	#[test]
	fn builtin_rules_target_registered_widgets() {
		for rule in MigrationTable::builtin().rules() {
			assert!(
				vellum_registry::BUILTINS.get(&WidgetKey::builtin(rule.to.as_str())).is_some(),
				"{} migrates to unknown {}",
				rule.from,
				rule.to
			);
			assert!(vellum_registry::BUILTINS.deprecated_ids().contains(&rule.from));
		}
	}
}

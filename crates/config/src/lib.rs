//! Configuration for the Vellum engine.
//!
//! Configuration is written in TOML and tunes the parts of the engine that
//! are data rather than code:
//!
//! - **Controls**: extra retired builtin ids and migration rules
//! - **Sidebar**: the baseline sidebar seeded into unconfigured content types
//! - **Log**: the default tracing filter for the `vellum` binary
//!
//! # Configuration Files
//!
//! The binary looks for configuration in this order:
//!
//! 1. the path given with `--config`
//! 2. `$XDG_CONFIG_HOME/vellum/config.toml` (or `~/.config/vellum/config.toml`)
//! 3. built-in defaults
//!
//! ```toml
//! [controls]
//! deprecated_builtins = ["legacyPicker"]
//!
//! [[controls.migrations]]
//! from = "legacyPicker"
//! to = "dropdown"
//! field_types = ["Symbol"]
//!
//! [sidebar]
//! baseline = [
//!     { widgetNamespace = "sidebar-builtin", widgetId = "publication-widget" },
//!     { widgetNamespace = "app", widgetId = "seo-panel" },
//! ]
//!
//! [log]
//! filter = "vellum=debug"
//! ```

pub mod error;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use vellum_controls::{ControlSynchronizer, MigrationRule};
use vellum_primitives::WidgetRef;
use vellum_registry::BUILTINS;

pub use error::{ConfigError, Result};

/// Filter used when neither the environment nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "vellum=info";

/// Parsed engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
	pub controls: ControlsConfig,
	pub sidebar: SidebarConfig,
	pub log: LogConfig,
}

/// `[controls]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlsConfig {
	/// Ids treated as retired builtins during namespace inference.
	pub deprecated_builtins: Vec<String>,
	/// Rules applied after the builtin migration table.
	pub migrations: Vec<MigrationRule>,
}

/// `[sidebar]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarConfig {
	/// Replaces the builtin default sidebar when set.
	pub baseline: Option<Vec<WidgetRef>>,
}

/// `[log]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
	pub filter: Option<String>,
}

impl EngineConfig {
	/// Parse a TOML string into an [`EngineConfig`].
	pub fn parse(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// Loads `explicit` if given, else the discovered user config, else defaults.
	pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
		match explicit.map(Path::to_path_buf).or_else(Self::discover) {
			Some(path) => Self::load(path),
			None => Ok(Self::default()),
		}
	}

	/// The user config file, if one exists.
	pub fn discover() -> Option<PathBuf> {
		let path = dirs::config_dir()?.join("vellum").join("config.toml");
		path.is_file().then_some(path)
	}

	/// Merge another config into this one.
	///
	/// Values from `other` override values in `self`; its migration rules are
	/// tried before the existing ones.
	pub fn merge(&mut self, other: EngineConfig) {
		for id in other.controls.deprecated_builtins {
			if !self.controls.deprecated_builtins.contains(&id) {
				self.controls.deprecated_builtins.push(id);
			}
		}
		let mut migrations = other.controls.migrations;
		migrations.append(&mut self.controls.migrations);
		self.controls.migrations = migrations;

		if other.sidebar.baseline.is_some() {
			self.sidebar.baseline = other.sidebar.baseline;
		}
		if other.log.filter.is_some() {
			self.log.filter = other.log.filter;
		}
	}

	/// A control synchronizer with this config's rules layered over the builtin ones.
	pub fn synchronizer(&self) -> ControlSynchronizer {
		ControlSynchronizer::new()
			.with_migrations(self.controls.migrations.iter().cloned())
			.with_deprecated(self.controls.deprecated_builtins.iter().cloned())
	}

	/// The configured baseline sidebar, or the builtin default.
	pub fn baseline_sidebar(&self) -> Vec<WidgetRef> {
		self.sidebar.baseline.clone().unwrap_or_else(|| BUILTINS.default_sidebar())
	}

	pub fn log_filter(&self) -> &str {
		self.log.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
	}
}

//! Vellum command line driver.
//!
//! Runs the reconciler and renderable resolver against a JSON space file:
//! - `apply` merges a widget's target state into every content type
//! - `remove` strips every reference to a widget
//! - `uninstall` strips references and deletes the installation
//! - `render` prints the resolved form, sidebar and editor slots

mod space;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use vellum_config::EngineConfig;
use vellum_primitives::{ConfigurationEntity, WidgetKey};
use vellum_reconcile::{EntityStore, NoopTelemetry, Reconciler, TelemetrySink};
use vellum_registry::{CatalogCache, CatalogResolver};
use vellum_render::{RenderOptions, Renderable, Renderables, build_editor_renderables, build_renderables, build_sidebar_renderables};

use crate::space::FileSpace;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(about = "Reconcile and render widget editor configuration")]
struct Args {
	/// Configuration file (defaults to $XDG_CONFIG_HOME/vellum/config.toml)
	#[arg(short, long, value_name = "PATH", global = true)]
	config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Apply a widget's target state to every content type
	Apply {
		#[arg(long, value_name = "PATH")]
		space: PathBuf,
		/// Acting widget as `namespace/id`
		#[arg(long)]
		widget: WidgetKey,
		/// Target state JSON document
		#[arg(long, value_name = "PATH")]
		target: PathBuf,
	},
	/// Remove every reference to a widget
	Remove {
		#[arg(long, value_name = "PATH")]
		space: PathBuf,
		#[arg(long)]
		widget: WidgetKey,
	},
	/// Remove every reference to a widget and delete its installation
	Uninstall {
		#[arg(long, value_name = "PATH")]
		space: PathBuf,
		/// Defaults to the widget recorded on the installation
		#[arg(long)]
		widget: Option<WidgetKey>,
		#[arg(long)]
		installation: String,
	},
	/// Print the renderables of one content type
	Render {
		#[arg(long, value_name = "PATH")]
		space: PathBuf,
		#[arg(long)]
		content_type: String,
	},
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();
	let config = EngineConfig::load_or_default(args.config.as_deref())?;

	setup_tracing(&config, args.verbose);

	match args.command {
		Command::Apply { space, widget, target } => {
			let target = read_json(&target).await?;
			let (_, reconciler) = open(&space, &config).await?;
			let written = reconciler.apply_target_state(&target, &widget).await?;
			print_written(&written)?;
		}
		Command::Remove { space, widget } => {
			let (_, reconciler) = open(&space, &config).await?;
			let written = reconciler.remove_all_references(&widget).await?;
			print_written(&written)?;
		}
		Command::Uninstall {
			space,
			widget,
			installation,
		} => {
			let (store, reconciler) = open(&space, &config).await?;
			let widget = match widget {
				Some(widget) => widget,
				None => store
					.installation_widget(&installation)
					.await
					.ok_or_else(|| format!("unknown installation {installation}"))?,
			};
			let written = reconciler.uninstall(&installation, &widget).await?;
			print_written(&written)?;
		}
		Command::Render { space, content_type } => {
			let store = Arc::new(FileSpace::open(&space).await?);
			let output = render(&store, &config, &content_type).await?;
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
	}

	Ok(())
}

fn setup_tracing(config: &EngineConfig, verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("vellum=debug,info")
		} else {
			EnvFilter::new(config.log_filter())
		}
	});

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn open(path: &Path, config: &EngineConfig) -> Result<(Arc<FileSpace>, Reconciler), Box<dyn std::error::Error>> {
	let store = Arc::new(FileSpace::open(path).await?);
	let telemetry: Arc<dyn TelemetrySink> = Arc::new(NoopTelemetry);
	let reconciler = Reconciler::new(store.clone(), telemetry)
		.with_synchronizer(config.synchronizer())
		.with_baseline_sidebar(config.baseline_sidebar());
	Ok((store, reconciler))
}

async fn read_json(path: &Path) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
	let content = tokio::fs::read_to_string(path).await?;
	Ok(serde_json::from_str(&content)?)
}

fn print_written(written: &[ConfigurationEntity]) -> Result<(), serde_json::Error> {
	info!(count = written.len(), "editor interfaces written");
	println!("{}", serde_json::to_string_pretty(written)?);
	Ok(())
}

/// Output of `vellum render`.
#[derive(Serialize)]
struct RenderOutput {
	controls: Renderables,
	sidebar: Vec<Arc<Renderable>>,
	editors: Vec<Arc<Renderable>>,
}

async fn render(store: &Arc<FileSpace>, config: &EngineConfig, content_type: &str) -> Result<RenderOutput, Box<dyn std::error::Error>> {
	let stored = store
		.editor_interfaces()
		.await?
		.into_iter()
		.find(|s| s.content_type.id == content_type)
		.ok_or_else(|| format!("unknown content type {content_type}"))?;

	let mut entity = stored.entity;
	entity.controls = config.synchronizer().synchronize(&stored.content_type.fields, &entity.controls);
	let baseline = config.baseline_sidebar();

	let keys = entity
		.controls
		.iter()
		.filter_map(|c| c.key())
		.chain(entity.sidebar.as_deref().unwrap_or(&baseline).iter().map(|w| w.key()))
		.chain(entity.editor_slots().iter().map(|w| w.key()))
		.collect::<Vec<_>>();

	let resolver = CatalogResolver::new(Arc::new(CatalogCache::new(store.clone())), store.scope());
	let catalog = resolver.snapshot(keys).await;
	let options = RenderOptions::from_catalog(&catalog);

	Ok(RenderOutput {
		controls: build_renderables(&entity.controls, &catalog, &options),
		sidebar: build_sidebar_renderables(entity.sidebar.as_deref(), &baseline, &catalog, &options),
		editors: build_editor_renderables(&entity, &catalog, &options),
	})
}

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use configurator::{
    Catalog, Configurator, FsAssetLoader, HeadlessViewer, Intent, Projection, SelectionState,
    SurfaceState, VariantApplier,
};
use serde::Serialize;

use crate::cli::{OutputFormat, print_projection};
use crate::settings::ResolvedConfig;

/// Result of playing a script of steps.
#[derive(Debug, Serialize)]
pub(crate) struct RunOutcome {
    pub(crate) projection: Projection,
    pub(crate) surfaces: Vec<SurfaceState>,
    /// Steps the configurator refused.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) rejected: Vec<String>,
    /// Every texture request landed before the timeout.
    pub(crate) settled: bool,
}

/// Drives a headless configurator through scripted intents.
pub(crate) struct ScriptWorkflow {
    configurator: Configurator<HeadlessViewer>,
    settle_timeout: Duration,
}

impl ScriptWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
        let catalog = Arc::new(load_catalog(&config)?);

        let mut applier = VariantApplier::new(Arc::new(FsAssetLoader::new(&config.assets_root)))
            .with_options(config.apply);
        for (category, key) in config.surfaces {
            applier = applier.with_surface_key(category, key);
        }

        let state = SelectionState::with_defaults(catalog, config.defaults);
        let mut configurator = Configurator::new(state, applier, HeadlessViewer::kitchen());
        configurator
            .viewer_ready()
            .context("failed to bind viewer surfaces")?;

        Ok(Self {
            configurator,
            settle_timeout: config.settle_timeout,
        })
    }

    /// Print the projection every time a step changes it.
    pub(crate) fn trace(&mut self, format: OutputFormat) {
        self.configurator
            .subscribe(Box::new(move |projection: &Projection| {
                if let Err(err) = print_projection(format, projection) {
                    log::warn!("failed to print projection: {err}");
                }
            }));
    }

    pub(crate) fn run(mut self, steps: &[Intent]) -> RunOutcome {
        let mut rejected = Vec::new();
        for step in steps {
            if !self.configurator.dispatch(step.clone()) {
                rejected.push(step.to_string());
            }
            self.configurator.pump();
        }
        let settled = self.configurator.settle(self.settle_timeout);

        let projection = self.configurator.projection();
        let surfaces = self.configurator.into_viewer().surfaces().to_vec();
        RunOutcome {
            projection,
            surfaces,
            rejected,
            settled,
        }
    }
}

pub(crate) fn load_catalog(config: &ResolvedConfig) -> Result<Catalog> {
    match &config.catalog_path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => Catalog::builtin().context("built-in catalog is invalid"),
    }
}

/// Parse scripted steps, failing on the first malformed one.
pub(crate) fn parse_steps(steps: &[String]) -> Result<Vec<Intent>> {
    steps
        .iter()
        .map(|step| {
            step.parse::<Intent>()
                .with_context(|| format!("invalid step '{step}'"))
        })
        .collect()
}

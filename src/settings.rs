use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, ensure};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use configurator::{ApplyOptions, Category, HexColor, SelectionDefaults, app_dirs};

use crate::cli::CliArgs;

const DEFAULT_SETTLE_TIMEOUT_MS: u64 = 2_000;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    catalog: CatalogSection,
    defaults: DefaultsSection,
    apply: ApplySection,
    surfaces: BTreeMap<String, String>,
    logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CatalogSection {
    path: Option<PathBuf>,
    assets_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DefaultsSection {
    category: Option<String>,
    cupboards_colour: Option<String>,
    wall_colour: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApplySection {
    discard_superseded: Option<bool>,
    settle_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LoggingSection {
    filter: Option<String>,
}

#[derive(Debug)]
pub struct ResolvedConfig {
    /// `None` selects the built-in kitchen catalog.
    pub catalog_path: Option<PathBuf>,
    pub assets_root: PathBuf,
    pub defaults: SelectionDefaults,
    pub apply: ApplyOptions,
    pub settle_timeout: Duration,
    pub surfaces: Vec<(Category, String)>,
    pub log_filter: Option<String>,
}

impl ResolvedConfig {
    pub fn print_summary(&self) {
        println!("Effective configuration:");
        match &self.catalog_path {
            Some(path) => println!("  Catalog: {}", path.display()),
            None => println!("  Catalog: (built-in kitchen)"),
        }
        println!("  Assets root: {}", self.assets_root.display());
        println!("  Start category: {}", self.defaults.category);
        println!("  Cupboards colour: {}", self.defaults.cupboards_colour);
        println!("  Wall colour: {}", self.defaults.wall_colour);
        println!(
            "  Discard superseded textures: {}",
            bool_to_word(self.apply.discard_superseded)
        );
        println!("  Settle timeout: {} ms", self.settle_timeout.as_millis());
        for (category, key) in &self.surfaces {
            println!("  Surface for {category}: {key}");
        }
        println!(
            "  Log filter: {}",
            self.log_filter.as_deref().unwrap_or("(default)")
        );
    }
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let builder = build_config(cli)?;
    let mut raw: RawConfig = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("configurator")
            .separator("__")
            .try_parsing(true),
    );

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".configurator.toml"));
        files.push(current_dir.join("configurator.toml"));
    }

    files
}

impl RawConfig {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(path) = cli.catalog.clone() {
            self.catalog.path = Some(path);
        }
        if let Some(root) = cli.assets_root.clone() {
            self.catalog.assets_root = Some(root);
        }
        if let Some(category) = cli.category {
            self.defaults.category = Some(category.as_str().to_string());
        }
        if let Some(colour) = cli.cupboards_colour.clone() {
            self.defaults.cupboards_colour = Some(colour);
        }
        if let Some(colour) = cli.wall_colour.clone() {
            self.defaults.wall_colour = Some(colour);
        }
        if let Some(value) = cli.discard_superseded {
            self.apply.discard_superseded = Some(value);
        }
        if let Some(value) = cli.settle_timeout_ms {
            self.apply.settle_timeout_ms = Some(value);
        }
        if let Some(filter) = cli.log_filter.clone() {
            self.logging.filter = Some(filter);
        }
    }

    fn resolve(self) -> Result<ResolvedConfig> {
        let current_dir = env::current_dir().context("failed to determine working directory")?;

        let catalog_path = self
            .catalog
            .path
            .map(|path| absolutize(&current_dir, path));
        if let Some(path) = &catalog_path {
            ensure!(path.is_file(), "catalog file {} does not exist", path.display());
        }

        let assets_root = match self.catalog.assets_root {
            Some(root) => absolutize(&current_dir, root),
            None => catalog_path
                .as_deref()
                .and_then(Path::parent)
                .map(Path::to_path_buf)
                .unwrap_or_else(|| current_dir.clone()),
        };

        let mut defaults = SelectionDefaults::default();
        if let Some(category) = self.defaults.category {
            defaults.category = category
                .parse()
                .with_context(|| format!("invalid defaults.category '{category}'"))?;
        }
        if let Some(colour) = self.defaults.cupboards_colour {
            defaults.cupboards_colour = parse_colour("defaults.cupboards_colour", &colour)?;
        }
        if let Some(colour) = self.defaults.wall_colour {
            defaults.wall_colour = parse_colour("defaults.wall_colour", &colour)?;
        }

        let mut apply = ApplyOptions::default();
        if let Some(value) = self.apply.discard_superseded {
            apply.discard_superseded = value;
        }
        let settle_timeout = Duration::from_millis(
            self.apply
                .settle_timeout_ms
                .unwrap_or(DEFAULT_SETTLE_TIMEOUT_MS),
        );

        let mut surfaces = Vec::with_capacity(self.surfaces.len());
        for (category, key) in self.surfaces {
            let parsed: Category = category
                .parse()
                .with_context(|| format!("invalid surfaces key '{category}'"))?;
            let key = key.trim().to_string();
            ensure!(!key.is_empty(), "surface key for {parsed} must not be empty");
            surfaces.push((parsed, key));
        }

        let log_filter = self
            .logging
            .filter
            .map(|filter| filter.trim().to_string())
            .filter(|filter| !filter.is_empty());

        Ok(ResolvedConfig {
            catalog_path,
            assets_root,
            defaults,
            apply,
            settle_timeout,
            surfaces,
            log_filter,
        })
    }
}

fn absolutize(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path
    }
}

fn parse_colour(field: &str, value: &str) -> Result<HexColor> {
    HexColor::parse_lenient(value).with_context(|| format!("invalid {field}"))
}

fn bool_to_word(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::tempdir;

    use super::*;

    fn cli(args: &[&str]) -> CliArgs {
        let mut argv = vec!["configurator", "--no-config"];
        argv.extend_from_slice(args);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn defaults_apply_without_any_source() {
        let resolved = RawConfig::default().resolve().unwrap();
        assert!(resolved.catalog_path.is_none());
        assert_eq!(resolved.defaults, SelectionDefaults::default());
        assert!(resolved.apply.discard_superseded);
        assert_eq!(resolved.settle_timeout, Duration::from_millis(2_000));
        assert!(resolved.surfaces.is_empty());
    }

    #[test]
    fn config_file_sections_are_read() {
        let dir = tempdir().unwrap();
        let catalog = dir.path().join("catalog.toml");
        fs::write(&catalog, "").unwrap();
        let config = dir.path().join("settings.toml");
        fs::write(
            &config,
            format!(
                r##"
                [catalog]
                path = "{}"

                [defaults]
                category = "Wall Colour"
                cupboards_colour = "#AABBCC"

                [apply]
                discard_superseded = false
                settle_timeout_ms = 50

                [surfaces]
                floor = "Floor.001"

                [logging]
                filter = "debug"
                "##,
                catalog.display().to_string().replace('\\', "/")
            ),
        )
        .unwrap();

        let resolved = load(&cli(&["--config", config.to_str().unwrap()])).unwrap();

        assert_eq!(resolved.catalog_path.as_deref(), Some(catalog.as_path()));
        assert_eq!(resolved.assets_root, dir.path());
        assert_eq!(resolved.defaults.category, Category::WallColour);
        assert_eq!(resolved.defaults.cupboards_colour.as_str(), "#aabbcc");
        assert!(!resolved.apply.discard_superseded);
        assert_eq!(resolved.settle_timeout, Duration::from_millis(50));
        assert_eq!(
            resolved.surfaces,
            vec![(Category::Floor, "Floor.001".to_string())]
        );
        assert_eq!(resolved.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn cli_overrides_take_precedence() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("settings.toml");
        fs::write(
            &config,
            "[defaults]\ncategory = \"floor\"\n[apply]\nsettle_timeout_ms = 50\n",
        )
        .unwrap();

        let args = cli(&[
            "--config",
            config.to_str().unwrap(),
            "--category",
            "stools",
            "--settle-timeout-ms",
            "10",
            "--wall-colour",
            "336699",
        ]);
        let mut raw = RawConfig::default();
        raw.apply_cli_overrides(&args);
        assert_eq!(raw.defaults.category.as_deref(), Some("stools"));

        let resolved = load(&args).unwrap();
        assert_eq!(resolved.defaults.category, Category::Stools);
        assert_eq!(resolved.settle_timeout, Duration::from_millis(10));
        assert_eq!(resolved.defaults.wall_colour.as_str(), "#336699");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(load(&cli(&["--config", missing.to_str().unwrap()])).is_err());
    }

    #[test]
    fn invalid_values_are_reported() {
        let mut raw = RawConfig::default();
        raw.defaults.category = Some("ceiling".into());
        let err = raw.resolve().unwrap_err();
        assert!(err.to_string().contains("defaults.category"));

        let mut raw = RawConfig::default();
        raw.defaults.wall_colour = Some("white".into());
        assert!(raw.resolve().is_err());

        let mut raw = RawConfig::default();
        raw.surfaces.insert("floor".into(), "  ".into());
        assert!(raw.resolve().is_err());
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        let dir = tempdir().unwrap();
        let mut raw = RawConfig::default();
        raw.catalog.path = Some(dir.path().join("nope.toml"));
        assert!(raw.resolve().is_err());
    }
}

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, ColorChoice, Parser};

use super::options::{CategoryArg, OutputFormat};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `configurator` binary.
#[derive(Parser, Debug)]
#[command(
    name = "configurator",
    version,
    long_version = long_version(),
    about = "Play configurator steps against a headless kitchen scene",
    after_help = "Steps: category:<cat>  select:<cat>=<name>  colour:<cat>=<hex>  search:<text>",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        value_name = "STEP",
        help = "Intents to dispatch in order, e.g. select:floor=Vogue"
    )]
    pub(crate) steps: Vec<String>,
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "CONFIGURATOR_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        long,
        value_name = "FILE",
        help = "Load the catalog from a TOML file (default: built-in kitchen catalog)"
    )]
    pub(crate) catalog: Option<PathBuf>,
    #[arg(
        short = 'a',
        long = "assets-root",
        value_name = "PATH",
        help = "Directory textures are resolved against (default: catalog directory)"
    )]
    pub(crate) assets_root: Option<PathBuf>,
    #[arg(
        short = 'C',
        long,
        value_enum,
        help = "Category that starts active (default: floor)"
    )]
    pub(crate) category: Option<CategoryArg>,
    #[arg(
        long = "cupboards-colour",
        value_name = "HEX",
        help = "Starting cupboard colour (default: #d3d3d3)"
    )]
    pub(crate) cupboards_colour: Option<String>,
    #[arg(
        long = "wall-colour",
        value_name = "HEX",
        help = "Starting custom wall colour (default: #ffffff)"
    )]
    pub(crate) wall_colour: Option<String>,
    #[arg(
        long = "discard-superseded",
        value_parser = BoolishValueParser::new(),
        help = "Drop texture results overtaken by a newer selection (default: enabled)"
    )]
    pub(crate) discard_superseded: Option<bool>,
    #[arg(
        long = "settle-timeout-ms",
        value_name = "MS",
        help = "How long to wait for textures before printing (default: 2000)"
    )]
    pub(crate) settle_timeout_ms: Option<u64>,
    #[arg(
        long = "log-filter",
        value_name = "FILTER",
        help = "env_logger filter, overridden by RUST_LOG (default: warn)"
    )]
    pub(crate) log_filter: Option<String>,
    #[arg(
        short = 'e',
        long = "each-step",
        help = "Print the projection after every step, not just the last (default: disabled)"
    )]
    pub(crate) each_step: bool,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'l',
        long = "list-categories",
        help = "List the catalog's categories and variants, then exit (default: disabled)"
    )]
    pub(crate) list_categories: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how to print the result"
    )]
    pub(crate) output: OutputFormat,
}

mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_catalog, print_outcome};
use configurator::logging;
use settings::ResolvedConfig;
use workflow::ScriptWorkflow;

fn main() -> Result<()> {
    let cli = parse_cli();
    let resolved = settings::load(&cli)?;
    logging::initialize(resolved.log_filter.as_deref());

    if cli.list_categories {
        let catalog = workflow::load_catalog(&resolved)?;
        return print_catalog(cli.output, &catalog);
    }

    if cli.print_config {
        resolved.print_summary();
    }

    let steps = workflow::parse_steps(&cli.steps)?;
    run_script(cli.output, cli.each_step, resolved, &steps)
}

/// Play the steps and print the outcome in the chosen format.
fn run_script(
    format: OutputFormat,
    each_step: bool,
    settings: ResolvedConfig,
    steps: &[configurator::Intent],
) -> Result<()> {
    let mut workflow = ScriptWorkflow::from_config(settings)?;
    if each_step {
        workflow.trace(format);
    }
    let outcome = workflow.run(steps);
    print_outcome(format, &outcome)
}

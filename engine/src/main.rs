// Entry point: load the transfers file once, then hand over to the interactive menu
use anyhow::Context;
use clap::Parser;
use engine::analysis::region::RegionMapper;
use engine::cli::args::Cli;
use engine::cli::session::Session;
use engine::data::csv_parser::PnateCsvParser;
use engine::data::dataset::Dataset;
use std::io;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;

    // Logs go to stderr so they never interleave with the report table on stdout
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(settings.tracing_level()?)
        .init();

    info!(path = %settings.csv_path.display(), "Starting PNATE analysis...");

    let records = PnateCsvParser::load_records(&settings.csv_path, settings.delimiter)
        .with_context(|| format!("Failed to load '{}'", settings.csv_path.display()))?;
    let base = Dataset::new(records).without_entities_containing(&settings.excluded_entity_keyword);
    info!(rows = base.len(), "Dataset ready");

    let mapper = RegionMapper::new();
    let unmapped = base.state_codes().iter().filter(|code| mapper.region_for(code).is_none()).count();
    info!(states = mapper.state_count(), unmapped, "Region table ready");
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(&base, &mapper, stdin.lock(), stdout.lock())
        .with_export_dir(settings.export_dir.as_deref())
        .run()?;

    Ok(())
}

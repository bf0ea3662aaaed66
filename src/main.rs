//! Juris batch evaluation entrypoint.
//!
//! Usage: `juris <responses.json> [report.json]`. The report goes to stdout
//! unless an output path is given.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use mimalloc::MiMalloc;

use juris::batch::{BatchItem, BatchRunner};
use juris::config::Config;
use juris::embedding::build_embedder;
use juris::registry::{ReferenceData, ReferenceStore};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: juris <responses.json> [report.json]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let input = match args.next() {
        Some(arg) if arg == "-h" || arg == "--help" => {
            println!("{USAGE}");
            return Ok(());
        }
        Some(arg) => PathBuf::from(arg),
        None => anyhow::bail!(USAGE),
    };
    let output = args.next().map(PathBuf::from);

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let reference = ReferenceData::from_config(&config)?;
    let store = Arc::new(ReferenceStore::new(reference));
    let embedder = Arc::new(build_embedder(&config));

    let items = BatchItem::load_all(&input)?;
    tracing::info!(
        input = %input.display(),
        responses = items.len(),
        concurrency = config.batch_concurrency,
        "Evaluating batch"
    );

    let runner = BatchRunner::from_config(store, embedder, &config);
    let report = runner.run_items(&items).await?;
    let json = report.to_json_pretty()?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!(output = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }

    if report.summary.failed > 0 {
        tracing::warn!(
            failed = report.summary.failed,
            "Some responses could not be evaluated"
        );
    }

    Ok(())
}

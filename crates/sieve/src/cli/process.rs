use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use sieve_core::{collect_batch, ContactPipeline, JsonFileSource, Settings};

/// Files are taken as given; directories contribute their `*.json` entries
/// in name order.
fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<String>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(input)
                .with_context(|| format!("failed to read {}", input.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| {
                    path.is_file() && path.extension().is_some_and(|ext| ext == "json")
                })
                .collect();
            entries.sort();
            files.extend(entries.iter().map(|p| p.to_string_lossy().into_owned()));
        } else {
            files.push(input.to_string_lossy().into_owned());
        }
    }

    Ok(files)
}

pub async fn run(inputs: &[PathBuf], settings: Settings, output: Option<&Path>) -> Result<()> {
    let files = expand_inputs(inputs)?;
    if files.is_empty() {
        bail!("no extraction files found");
    }

    let pipeline = ContactPipeline::new(settings.pipeline)?;
    tracing::info!(
        files = files.len(),
        workers = settings.driver.max_workers,
        "Collecting extraction results"
    );
    let outcomes = collect_batch(Arc::new(JsonFileSource), &files, &settings.driver).await;
    let batch = pipeline.process_batch(outcomes);

    let json = serde_json::to_string_pretty(&batch)?;
    match output {
        Some(path) => fs::write(path, format!("{json}\n"))
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }

    let stats = &batch.stats;
    eprintln!(
        "{} documents ({} failed): {} raw records, {} filtered, {} duplicates",
        stats.total_documents(),
        stats.documents_failed,
        stats.records_raw,
        stats.records_filtered,
        stats.duplicates,
    );

    Ok(())
}

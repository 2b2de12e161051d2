//! The `tagdrop fetch` command.

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use tagdrop_sources::config::FetchConfig;
use tagdrop_sources::source_for;

pub async fn execute(source_spec: String, timeout: Option<u64>, json: bool) -> Result<()> {
    let mut fetch_config = FetchConfig::default();
    if let Some(timeout) = timeout {
        fetch_config.timeout_secs = timeout;
    }

    let source = source_for(&source_spec, &fetch_config)?;
    let records = source
        .fetch_tags()
        .await
        .with_context(|| format!("failed to fetch {}", source.describe()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Label", "Correct", "Feedback"]);
    for record in &records {
        table.add_row(vec![
            Cell::new(&record.label),
            Cell::new(record.correct),
            Cell::new(&record.feedback),
        ]);
    }
    println!("{table}");
    println!("{} record(s) from {}", records.len(), source.describe());

    Ok(())
}

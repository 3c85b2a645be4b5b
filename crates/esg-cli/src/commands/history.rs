use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;

use super::context::AppContext;
use super::output::print_json;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List saved reports, newest first
    List,
    /// Show the display records of one entry
    Show {
        id: i64,
    },
    /// Delete one entry
    Delete {
        id: i64,
    },
    /// Export entries as JSON
    Export {
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct HistoryRow {
    id: i64,
    report_name: String,
    generated_at: String,
    final_adjusted: f64,
    combined: bool,
    categories: Vec<String>,
}

pub async fn run(ctx: &AppContext, action: HistoryAction) -> Result<()> {
    let service = ctx.report_service()?;
    match action {
        HistoryAction::List => {
            let rows: Vec<HistoryRow> = service
                .list_history()
                .await?
                .into_iter()
                .map(|entry| HistoryRow {
                    id: entry.id,
                    combined: entry.is_combined(),
                    categories: entry.category_names(),
                    report_name: entry.report_name,
                    generated_at: entry.generated_at.to_rfc3339(),
                    final_adjusted: entry.result_summary.final_adjusted,
                })
                .collect();
            print_json(&rows)
        }
        HistoryAction::Show { id } => print_json(&service.view(id).await?),
        HistoryAction::Delete { id } => {
            service.delete(id).await?;
            eprintln!("Deleted history entry {id}");
            Ok(())
        }
        HistoryAction::Export { ids, output } => {
            let document = service.export(&ids).await?;
            match output {
                Some(path) => {
                    std::fs::write(&path, serde_json::to_string_pretty(&document)?)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    let count = document.as_array().map_or(0, Vec::len);
                    eprintln!("Exported {count} entries to {}", path.display());
                    Ok(())
                }
                None => print_json(&document),
            }
        }
    }
}

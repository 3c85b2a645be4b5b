use anyhow::Result;
use clap::{Args, Subcommand};
use esg_core::selection::MetricSelection;

use super::context::AppContext;
use super::output::print_json;

#[derive(Subcommand)]
pub enum SelectionAction {
    /// Add a metric, or replace the one with the same key
    Add(AddArgs),
    /// Remove a metric by key
    Remove {
        key: String,
    },
    /// Print the working set
    List,
    /// Remove every metric
    Clear,
}

#[derive(Args)]
pub struct AddArgs {
    /// Unique key; a random one is generated when omitted
    #[arg(long)]
    key: Option<String>,
    #[arg(long, default_value = "")]
    label: String,
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value = "")]
    category_uri: String,
    #[arg(long)]
    model_uri: String,
    #[arg(long)]
    model_label: Option<String>,
    #[arg(long)]
    industry: String,
    /// Reporting date, YYYY-MM-DD
    #[arg(long)]
    year: String,
    #[arg(long)]
    company: String,
    /// Comma-separated input datasets
    #[arg(long, default_value = "")]
    input: String,
    /// Comma-separated PCA datasets
    #[arg(long, default_value = "")]
    pca: String,
}

impl From<AddArgs> for MetricSelection {
    fn from(args: AddArgs) -> Self {
        MetricSelection {
            unique_key: args
                .key
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            metric_label: args.label,
            categories_label: args.category,
            categories_uri: args.category_uri,
            model_uri: args.model_uri,
            industry: args.industry,
            metric_year: args.year,
            company: args.company,
            selected_input: args.input,
            selected_pca: args.pca,
            model_label: args.model_label,
        }
    }
}

pub async fn run(ctx: &AppContext, action: SelectionAction) -> Result<()> {
    let service = ctx.report_service()?;
    match action {
        SelectionAction::Add(args) => print_json(&service.add_selection(args.into()).await?),
        SelectionAction::Remove { key } => print_json(&service.remove_selection(&key).await?),
        SelectionAction::List => print_json(&service.list_selections().await?),
        SelectionAction::Clear => {
            service.clear_selections().await?;
            eprintln!("Selection cleared");
            Ok(())
        }
    }
}

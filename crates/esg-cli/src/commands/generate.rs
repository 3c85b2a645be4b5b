use anyhow::Result;
use clap::Args;
use serde_json::json;

use super::context::AppContext;
use super::output::print_json;

#[derive(Args)]
pub struct GenerateArgs {
    /// Merge every metric into one combined report
    #[arg(long)]
    combine: bool,
    /// Name of the combined report
    #[arg(long, requires = "combine")]
    name: Option<String>,
    /// Empty the working set after a successful save
    #[arg(long)]
    clear: bool,
}

pub async fn run(ctx: &AppContext, args: GenerateArgs) -> Result<()> {
    let service = ctx.report_service()?;
    let generated = service
        .generate_from_selection(args.combine, args.name.as_deref())
        .await?;

    let history_ids: Vec<i64> = generated.history.iter().map(|entry| entry.id).collect();
    let views = service.views_of(&generated).await;
    print_json(&json!({
        "history_ids": history_ids,
        "reports": views,
    }))?;

    match &generated.persistence_error {
        Some(err) => eprintln!("Warning: report was not saved to history: {err}"),
        None if args.clear => service.clear_selections().await?,
        None => {}
    }
    Ok(())
}

use anyhow::Result;
use esg_core::config::EsgConfig;

use super::context::AppContext;
use super::output::print_json;

pub fn init(ctx: &AppContext, force: bool) -> Result<()> {
    let path = ctx.config_service.path().display().to_string();
    if ctx.config_service.write(&EsgConfig::default(), force)? {
        eprintln!("Wrote {path}");
    } else {
        eprintln!("{path} already exists (use --force to overwrite)");
    }
    Ok(())
}

pub fn show(ctx: &AppContext) -> Result<()> {
    print_json(&ctx.config)
}

use crate::claude_sync;
use crate::cli::ui::{success, warning};
use crate::config::AppContext;
use crate::error::AppError;
use crate::store::SettingsStore;

/// Rewrite the Claude Code env block from the current settings and report
/// the outcome textually.
pub fn execute(ctx: &AppContext) -> Result<(), AppError> {
    let cfg = SettingsStore::new(ctx).load();
    if claude_sync::sync_claude_config(ctx, &cfg) {
        println!("{}", success("Claude Code config updated."));
    } else {
        println!(
            "{}",
            warning(&format!(
                "Could not update Claude Code config ({} not found in {}).",
                claude_sync::MCP_SERVER_ID,
                ctx.claude_json_path.display()
            ))
        );
    }
    Ok(())
}

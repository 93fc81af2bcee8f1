use crate::cli::ui::{error, success};
use crate::config::AppContext;
use crate::error::AppError;
use crate::probe::{ProviderProbe, StatusProber};
use crate::store::SettingsStore;

/// Print one line per provider and exit without entering the editor.
pub fn execute(ctx: &AppContext, json: bool) -> Result<(), AppError> {
    let cfg = SettingsStore::new(ctx).load();
    let results = StatusProber::default().probe(&cfg);

    if json {
        let out = serde_json::to_string_pretty(&results)
            .map_err(|e| AppError::JsonSerialize { source: e })?;
        println!("{out}");
        return Ok(());
    }

    for result in results {
        let dot = if result.healthy { "●" } else { "○" };
        let line = format!("  {} {}: {}", dot, result.provider, result.detail);
        if result.healthy {
            println!("{}", success(&line));
        } else {
            println!("{}", error(&line));
        }
    }
    Ok(())
}

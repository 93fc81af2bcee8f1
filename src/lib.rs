// Core modules
mod claude_sync;
mod config;
mod editor;
mod error;
mod probe;
pub mod schema;
mod store;

// Front ends
pub mod cli;
pub mod gui;
pub mod tui;

// Public exports
pub use claude_sync::{sync_claude_config, MCP_SERVER_ID};
pub use config::{atomic_write, atomic_write_owner_only, AppContext};
pub use editor::{
    masked_secret, summarize, Effect, FormEditor, InputIntent, Mode, Severity, StatusLine,
    TextInput,
};
pub use error::AppError;
pub use probe::{ProbeMsg, ProbeSystem, ProviderProbe, ProviderStatus, StatusProber};
pub use store::SettingsStore;

/// Auto-select the front end: windowed when a display session is detected,
/// with a terminal fallback if the window cannot be created.
pub fn run_auto(ctx: AppContext) -> Result<(), AppError> {
    let has_display =
        std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some();

    if has_display {
        match gui::run(ctx.clone()) {
            Ok(()) => return Ok(()),
            Err(err) => {
                log::warn!("windowed UI unavailable, falling back to terminal: {err}");
            }
        }
    }

    tui::run(ctx)
}

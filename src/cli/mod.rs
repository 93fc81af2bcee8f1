use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "prismmcp",
    version,
    about = "Prism-Relay MCP — settings manager for the multi-LLM query server",
    long_about = "Edit Prism-Relay provider settings (API keys, models, endpoints, timeouts), \
export them as environment variables for the MCP server, and keep the Claude Code \
config in sync.\n\nRun without arguments to auto-select the windowed or terminal editor."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Edit settings in the terminal UI
    Tui,

    /// Edit settings in the windowed UI
    Gui,

    /// Print provider status and exit
    Status {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print env vars for shell export
    Env,

    /// Sync settings into the Claude Code config
    Sync,

    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Generate shell completions
pub fn generate_completions(shell: Shell) {
    use clap::CommandFactory;
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

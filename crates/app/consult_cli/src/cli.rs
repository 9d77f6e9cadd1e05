use clap::{Parser, Subcommand};
use consult_core::DEFAULT_RECENT_LIMIT;

#[derive(Parser, Debug)]
#[command(name = "consult", version, about = "Chat with the Consult business agent")]
pub struct Cli {
    /// Base URL of the Consult API server.
    #[arg(long, global = true, env = "CONSULT_SERVER", default_value = "http://127.0.0.1:3100")]
    pub server: String,

    /// Display name used for your messages.
    #[arg(long, global = true, env = "CONSULT_AUTHOR")]
    pub author: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print version information.
    Version,

    /// Show the transcript.
    History {
        /// Number of messages to show.
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: usize,

        /// Keep polling and print new messages as they arrive.
        #[arg(long)]
        follow: bool,

        /// Poll interval for --follow, in milliseconds.
        #[arg(long, default_value_t = 2000)]
        interval_ms: u64,
    },

    /// Append a single message.
    Send {
        /// Message text.
        body: String,

        /// Store as an agent message.
        #[arg(long)]
        agent: bool,

        /// Prompt the agent message answers (agent messages only).
        #[arg(long, requires = "agent")]
        in_response_to: Option<String>,
    },

    /// Interactive chat with the agent.
    Chat {
        /// Use the short popup replies and the shorter thinking delay.
        #[arg(long)]
        compact: bool,
    },
}

use boardroom_protocol::Priority;
use boardroom_protocol::Recipient;
use boardroom_protocol::Role;
use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "boardroom")]
#[command(version, about = "Run an executive board of cooperating agents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Board file (TOML). Built-in defaults when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask every seated executive for a report and record the results.
    Reports,

    /// Send one message and drain the queue.
    Send {
        #[arg(long)]
        from: Role,

        /// Target role, or ALL to broadcast.
        #[arg(long)]
        to: Recipient,

        #[arg(long)]
        subject: String,

        #[arg(long, default_value = "")]
        body: String,

        #[arg(long, default_value = "normal")]
        priority: Priority,

        /// Ask the recipient to reply.
        #[arg(long)]
        respond: bool,
    },

    /// Deliver a message to every other active executive.
    Broadcast {
        #[arg(long)]
        from: Role,

        #[arg(long)]
        subject: String,

        #[arg(long, default_value = "")]
        body: String,

        #[arg(long, default_value = "normal")]
        priority: Priority,
    },
}

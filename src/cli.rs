use clap::{Parser, Subcommand};

use crate::runtime::Job;

#[derive(Parser, Debug)]
#[command(about = "Sync database tasks to calendar events and keep a daily review event")]
pub struct Cli {
    /// KEY=VALUE config file; falls back to $CONFIG_FILE.
    #[arg(long, global = true, env = "CONFIG_FILE")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Sync tasks, then refresh the daily review (default).
    Run,
    /// Create events for unsynced tasks only.
    Sync,
    /// Refresh the daily review event only.
    Review,
    /// Stay running and do a full run once a day.
    Daemon,
}

impl Commands {
    pub fn job(self) -> Option<Job> {
        match self {
            Commands::Run => Some(Job::Both),
            Commands::Sync => Some(Job::Sync),
            Commands::Review => Some(Job::Review),
            Commands::Daemon => None,
        }
    }
}

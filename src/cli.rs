use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "job-portal", about = "Job portal HTTP API")]
pub struct Cmd {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Apply migrations and serve the API (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
}

impl Cmd {
    pub fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Serve)
    }
}

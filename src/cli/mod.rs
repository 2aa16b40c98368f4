use clap::Parser;
use error_stack::{Result, ResultExt};
use thiserror::Error;

mod form;
mod server;

/// Command line options for vestibule.
#[derive(Debug, Parser)]
#[command(about = "Sign-up validation service", version, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(Debug, Error)]
#[error("vestibule terminated")]
pub struct CliError;

impl Cli {
    pub fn run(self) -> Result<(), CliError> {
        match self.subcommand {
            Subcommand::Server(args) => self::server::run(args).change_context(CliError),
            Subcommand::Form(args) => self::form::run(args).change_context(CliError),
        }
    }
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    /// Expose the vestibule HTTP API
    Server(self::server::ServerCommand),
    /// Drive the sign-up form state machine from the terminal
    Form(self::form::FormCommand),
}

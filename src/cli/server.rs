use clap::Parser;
use error_stack::{Result, ResultExt};
use std::net::IpAddr;
use std::num::NonZeroUsize;

use vestibule::http::StartServerError;
use vestibule::{config, http, App};

/// Expose the vestibule HTTP API
#[derive(Debug, Parser)]
pub struct ServerCommand {
    #[clap(long)]
    pub address: Option<IpAddr>,
    #[clap(long)]
    pub port: Option<u16>,
    #[clap(long)]
    pub workers: Option<NonZeroUsize>,
}

pub fn run(args: ServerCommand) -> Result<(), StartServerError> {
    let mut config = config::Server::load().change_context(StartServerError)?;
    args.override_config(&mut config);

    let level = config
        .logging
        .level
        .parse::<tracing::Level>()
        .change_context(StartServerError)
        .attach_printable_lazy(|| format!("invalid logging level {:?}", config.logging.level))?;
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(level)
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(config.workers)
        .build()
        .change_context(StartServerError)
        .attach_printable("could not build tokio runtime")?
        .block_on(http::run(App::new(config)))
}

impl ServerCommand {
    fn override_config(&self, config: &mut config::Server) {
        // override server configuration if set by the cli
        if let Some(address) = self.address {
            config.ip = address;
        }

        if let Some(port) = self.port {
            config.port = port;
        }

        if let Some(workers) = self.workers {
            config.workers = workers.get();
        }
    }
}

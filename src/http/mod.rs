use actix_web::{web, HttpServer};
use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing_actix_web::TracingLogger;

use crate::App;

pub mod controllers;
pub mod error;

pub use error::Error;

#[derive(Debug, Error)]
#[error("Failed to start HTTP server")]
pub struct StartServerError;

/// Binds and serves the API until the process is told to stop.
pub async fn run(app: App) -> Result<(), StartServerError> {
    let addr = (app.config.ip, app.config.port);
    let workers = app.config.workers;
    tracing::info!(ip = %addr.0, port = addr.1, workers, "starting HTTP server");

    HttpServer::new(move || {
        actix_web::App::new()
            .app_data(web::Data::new(app.clone()))
            .wrap(TracingLogger::default())
            .configure(controllers::configure)
    })
    .workers(workers)
    .bind(addr)
    .change_context(StartServerError)
    .attach_printable("could not bind the listen address")?
    .run()
    .await
    .change_context(StartServerError)
}

use thiserror::Error;

mod server;

pub use server::{Form, Logging, Server};

#[derive(Debug, Error)]
#[error("Failed to load configuration")]
pub struct ParseError;

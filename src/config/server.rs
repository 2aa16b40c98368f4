use error_stack::{Report, Result};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

use super::ParseError;
use crate::util::figment::AttachFigmentError;

#[derive(Debug, Deserialize)]
pub struct Server {
    /// Address the HTTP server listens on.
    ///
    /// **Environment variables**:
    /// - `VESTIBULE_IP`
    #[serde(default = "Server::default_ip")]
    pub ip: IpAddr,
    /// Port the HTTP server listens on.
    ///
    /// **Environment variables**:
    /// - `VESTIBULE_PORT`
    #[serde(default = "Server::default_port")]
    pub port: u16,
    /// Amount of actix worker threads.
    ///
    /// **Environment variables**:
    /// - `VESTIBULE_WORKERS`
    #[serde(default = "Server::default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub form: Form,
}

#[derive(Debug, Deserialize)]
pub struct Logging {
    /// Maximum level emitted to the console.
    ///
    /// **Environment variables**:
    /// - `VESTIBULE_LOGGING_LEVEL`
    #[serde(default = "Logging::default_level")]
    pub level: String,
}

/// Knobs for the client-side form state machine.
#[derive(Debug, Deserialize)]
pub struct Form {
    /// Quiet window between the last keystroke and the availability probe.
    ///
    /// **Environment variables**:
    /// - `VESTIBULE_FORM_DEBOUNCE_MS`
    #[serde(default = "Form::default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Server {
    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();

        let config = Self::figment()
            .extract::<Self>()
            .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

        Ok(config)
    }
}

impl Server {
    const DEFAULT_CONFIG_FILE: &'static str = "vestibule.yml";

    /// Creates the default [`figment::Figment`] used to load server
    /// configuration: the optional config file first, environment
    /// variables on top.
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Yaml},
            Figment,
        };

        Figment::new()
            .merge(Yaml::file(Self::DEFAULT_CONFIG_FILE))
            // The env provider splits on underscores, which mangles the
            // nested keys; map those by hand.
            .merge(Env::prefixed("VESTIBULE_").map(|v| match v.as_str() {
                "LOGGING_LEVEL" => "logging.level".into(),
                "FORM_DEBOUNCE_MS" => "form.debounce_ms".into(),
                _ => v.as_str().replace('_', ".").into(),
            }))
    }

    const fn default_ip() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    const fn default_port() -> u16 {
        3000
    }

    const fn default_workers() -> usize {
        1
    }

    #[cfg(test)]
    pub(crate) fn test() -> Self {
        Self {
            ip: Self::default_ip(),
            port: Self::default_port(),
            workers: Self::default_workers(),
            logging: Logging::default(),
            form: Form::default(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

impl Logging {
    fn default_level() -> String {
        "info".to_owned()
    }
}

impl Default for Form {
    fn default() -> Self {
        Self {
            debounce_ms: Self::default_debounce_ms(),
        }
    }
}

impl Form {
    const fn default_debounce_ms() -> u64 {
        500
    }
}

use super::Result;
use crate::error::{ConfigError, NetError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 10235;
pub const DEFAULT_ACCEPT_TIMEOUT_MS: u64 = 500;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSettings,
}

/// Connection settings shared by the sample servers and clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub reuse_address: bool,
    pub accept_timeout_ms: u64,
    pub tcp_nodelay: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: false,
            reuse_address: true,
            accept_timeout_ms: DEFAULT_ACCEPT_TIMEOUT_MS,
            tcp_nodelay: true,
        }
    }
}

impl ServerSettings {
    pub fn accept_timeout(&self) -> Duration {
        Duration::from_millis(self.accept_timeout_ms.max(1))
    }

    /// Resolve `host:port` to the first matching socket address
    /// Resolve `host:port` on the runtime's resolver so lookups never block a worker thread
    pub async fn socket_address(&self) -> std::result::Result<SocketAddr, NetError> {
        let address = format!("{}:{}", self.host, self.port);
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|_| NetError::InvalidAddress(address.clone()))?
            .next()
            .ok_or(NetError::InvalidAddress(address))
    }

    /// Apply `server <host>`, `port <n>` and `debug` tokens in order.
    /// Unrecognized tokens are skipped and returned.
    pub fn apply_args<S: AsRef<str>>(&mut self, args: &[S]) -> Result<Vec<String>> {
        let mut unknown = Vec::new();
        let mut tokens = args.iter().map(AsRef::as_ref);

        while let Some(token) = tokens.next() {
            match token {
                "server" => {
                    self.host = tokens
                        .next()
                        .ok_or_else(|| missing_value("server"))?
                        .to_string();
                }
                "port" => {
                    let value = tokens.next().ok_or_else(|| missing_value("port"))?;
                    self.port = parse_port(value)?;
                }
                "debug" => self.debug = true,
                other => unknown.push(other.to_string()),
            }
        }

        Ok(unknown)
    }
}

fn missing_value(field: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: String::new(),
        reason: "a value must follow the argument".to_string(),
    }
}

pub fn parse_port(value: &str) -> Result<u16> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|err| ConfigError::InvalidValue {
            field: "port".to_string(),
            value: value.to_string(),
            reason: err.to_string(),
        })
}

fn parse_bool(field: &str, value: &str) -> Result<bool> {
    value
        .trim()
        .parse::<bool>()
        .map_err(|err| ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: err.to_string(),
        })
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            log::debug!("No configuration at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|err| ConfigError::Parse {
            message: err.to_string(),
        })?;

        Ok(config)
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|err| ConfigError::Serialize {
            message: err.to_string(),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| ConfigError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::ConfigDirNotFound)?;

        Ok(config_dir.join("cp-commons").join("config.toml"))
    }

    /// Set a dotted key such as `server.port` from its string form
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "server.host" => {
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: key.to_string(),
                        value: value.to_string(),
                        reason: "host cannot be blank".to_string(),
                    });
                }
                self.server.host = value.trim().to_string();
            }
            "server.port" => self.server.port = parse_port(value)?,
            "server.debug" => self.server.debug = parse_bool(key, value)?,
            "server.reuse_address" => self.server.reuse_address = parse_bool(key, value)?,
            "server.tcp_nodelay" => self.server.tcp_nodelay = parse_bool(key, value)?,
            "server.accept_timeout_ms" => {
                self.server.accept_timeout_ms =
                    value
                        .trim()
                        .parse()
                        .map_err(|err: std::num::ParseIntError| ConfigError::InvalidValue {
                            field: key.to_string(),
                            value: value.to_string(),
                            reason: err.to_string(),
                        })?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

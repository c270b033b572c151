//! Server configuration.
//!
//! Values are resolved in three layers: built-in defaults, then environment
//! variables, then command-line flags.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::session::DEFAULT_MAX_SESSIONS;

/// Socket address to bind, e.g. `0.0.0.0:8080`.
pub const ENV_ADDR: &str = "HEROCLASH_ADDR";
/// Port override, applied after `HEROCLASH_ADDR`.
pub const ENV_PORT: &str = "HEROCLASH_PORT";
/// Path to the hero snapshot file.
pub const ENV_DATA: &str = "HEROCLASH_DATA";
/// Idle session lifetime in seconds.
pub const ENV_SESSION_TTL: &str = "HEROCLASH_SESSION_TTL_SECS";
/// Cap on concurrently open sessions.
pub const ENV_MAX_SESSIONS: &str = "HEROCLASH_MAX_SESSIONS";

/// Help text printed for `--help` and on argument errors.
pub const USAGE: &str = "\
heroclash-server - superhero comparison HTTP server

USAGE:
    heroclash-server [OPTIONS]

OPTIONS:
    -p, --port <PORT>             Port to listen on [default: 3000]
        --bind <ADDR>             Socket address to bind [default: 127.0.0.1:3000]
    -d, --data <FILE>             Hero snapshot JSON file [default: ./data/superheroes.json]
        --session-ttl <SECS>      Idle seconds before a session is dropped [default: 1800]
        --max-sessions <N>        Maximum open sessions [default: 4096]
    -h, --help                    Print help information

ENVIRONMENT:
    HEROCLASH_ADDR, HEROCLASH_PORT, HEROCLASH_DATA,
    HEROCLASH_SESSION_TTL_SECS, HEROCLASH_MAX_SESSIONS
    RUST_LOG                      Log filter [default: heroclash=info,tower_http=info]
";

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to
    pub addr: SocketAddr,
    /// Hero snapshot file
    pub data_path: PathBuf,
    /// Idle time after which a session is dropped
    pub session_ttl: Duration,
    /// Cap on concurrently open sessions
    pub max_sessions: usize,
    /// How often idle sessions are swept
    pub sweep_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_path: PathBuf::from("./data/superheroes.json"),
            session_ttl: Duration::from_secs(30 * 60),
            max_sessions: DEFAULT_MAX_SESSIONS,
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the server with this configuration.
    Run(ServerConfig),
    /// Print usage and exit.
    Help,
}

fn invalid(key: &str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.trim().parse().map_err(|e| invalid(key, value, e))
}

fn parse_addr(key: &str, value: &str) -> Result<SocketAddr, ConfigError> {
    value.trim().parse().map_err(|e| invalid(key, value, e))
}

fn parse_secs(key: &str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid(key, value, "must be greater than zero")),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(invalid(key, value, e)),
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(invalid(key, value, "must be greater than zero")),
        Ok(n) => Ok(n),
        Err(e) => Err(invalid(key, value, e)),
    }
}

impl ServerConfig {
    /// Applies environment overrides read through `lookup`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(v) = lookup(ENV_ADDR) {
            self.addr = parse_addr(ENV_ADDR, &v)?;
        }
        if let Some(v) = lookup(ENV_PORT) {
            self.addr.set_port(parse_port(ENV_PORT, &v)?);
        }
        if let Some(v) = lookup(ENV_DATA) {
            self.data_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_SESSION_TTL) {
            self.session_ttl = parse_secs(ENV_SESSION_TTL, &v)?;
        }
        if let Some(v) = lookup(ENV_MAX_SESSIONS) {
            self.max_sessions = parse_count(ENV_MAX_SESSIONS, &v)?;
        }
        Ok(())
    }

    /// Applies command-line flags (without the program name).
    pub fn apply_args<I>(mut self, args: I) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next().ok_or_else(|| ConfigError::MissingValue {
                    flag: flag.to_string(),
                })
            };
            match arg.as_str() {
                "--port" | "-p" => {
                    let v = value("--port")?;
                    self.addr.set_port(parse_port("--port", &v)?);
                }
                "--bind" => {
                    let v = value("--bind")?;
                    self.addr = parse_addr("--bind", &v)?;
                }
                "--data" | "-d" => {
                    self.data_path = PathBuf::from(value("--data")?);
                }
                "--session-ttl" => {
                    let v = value("--session-ttl")?;
                    self.session_ttl = parse_secs("--session-ttl", &v)?;
                }
                "--max-sessions" => {
                    let v = value("--max-sessions")?;
                    self.max_sessions = parse_count("--max-sessions", &v)?;
                }
                "--help" | "-h" => return Ok(Command::Help),
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }
        Ok(Command::Run(self))
    }

    /// Resolves defaults, the process environment and `std::env::args`.
    pub fn from_env_and_args() -> Result<Command, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_args(std::env::args().skip(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    fn run(config: ServerConfig, raw: &[&str]) -> ServerConfig {
        match config.apply_args(args(raw)).unwrap() {
            Command::Run(config) => config,
            Command::Help => panic!("expected run"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.session_ttl, Duration::from_secs(1800));
        assert_eq!(config.max_sessions, DEFAULT_MAX_SESSIONS);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_ADDR, "0.0.0.0:8080"),
            (ENV_PORT, "9090"),
            (ENV_DATA, "/srv/heroes.json"),
            (ENV_SESSION_TTL, "60"),
        ]
        .into_iter()
        .collect();

        let mut config = ServerConfig::default();
        config
            .apply_env(|key| env.get(key).map(|v| (*v).to_string()))
            .unwrap();
        assert_eq!(config.addr, "0.0.0.0:9090".parse().unwrap());
        assert_eq!(config.data_path, PathBuf::from("/srv/heroes.json"));
        assert_eq!(config.session_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_env_invalid_value() {
        let mut config = ServerConfig::default();
        let err = config
            .apply_env(|key| (key == ENV_PORT).then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_PORT));
    }

    #[test]
    fn test_flags_override_env() {
        let mut config = ServerConfig::default();
        config
            .apply_env(|key| (key == ENV_PORT).then(|| "4000".to_string()))
            .unwrap();
        let config = run(config, &["-p", "5000", "--data", "heroes.json", "--max-sessions", "8"]);
        assert_eq!(config.addr.port(), 5000);
        assert_eq!(config.data_path, PathBuf::from("heroes.json"));
        assert_eq!(config.max_sessions, 8);
    }

    #[test]
    fn test_help_flag() {
        let command = ServerConfig::default().apply_args(args(&["--help"])).unwrap();
        assert_eq!(command, Command::Help);
    }

    #[test]
    fn test_flag_errors() {
        let err = ServerConfig::default().apply_args(args(&["--port"])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue { .. }));

        let err = ServerConfig::default().apply_args(args(&["--verbose"])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownArgument(ref a) if a == "--verbose"));

        let err = ServerConfig::default()
            .apply_args(args(&["--session-ttl", "0"]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}

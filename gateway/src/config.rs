//! Gateway configuration
//!
//! Flags first, `FETCHGATE_*` environment variables as fallback, then
//! built-in defaults. No config file.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "fetchgate")]
#[command(version = "0.1.0")]
#[command(about = "CORS fetch gateway with a private-host blocklist", long_about = None)]
pub struct GatewayConfig {
    /// Address to bind
    #[arg(long, env = "FETCHGATE_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "FETCHGATE_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Upstream request timeout in seconds
    #[arg(long, env = "FETCHGATE_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Also block private/reserved IP literals via CIDR containment,
    /// in addition to the legacy prefix heuristic
    #[arg(long, env = "FETCHGATE_STRICT_BLOCKLIST")]
    pub strict_blocklist: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl GatewayConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::try_parse_from(["fetchgate"]).unwrap();
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(30));
        assert!(!config.strict_blocklist);
    }

    #[test]
    fn test_flags_override() {
        let config = GatewayConfig::try_parse_from([
            "fetchgate",
            "--bind",
            "127.0.0.1",
            "--port",
            "9090",
            "--timeout-secs",
            "5",
            "--strict-blocklist",
        ])
        .unwrap();
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:9090");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(5));
        assert!(config.strict_blocklist);
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(GatewayConfig::try_parse_from(["fetchgate", "--port", "notaport"]).is_err());
    }
}

// CLI module for corpus-gateway
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;

/// corpus-gateway - Authenticated API gateway for the corpus admin dashboard
#[derive(Parser, Debug, Default)]
#[command(name = "corpus-gateway", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (defaults to ~/.corpus-gateway/config.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to bind the server to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Upstream API base URL
    #[arg(long, env = "UPSTREAM_BASE")]
    pub upstream: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub check_config: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(upstream) = &self.upstream {
            config.upstream.base_url = Some(upstream.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win() {
        let args = Args::parse_from([
            "corpus-gateway",
            "--port",
            "8088",
            "--upstream",
            "http://localhost:9000/api/v1",
        ]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.upstream_base(), Some("http://localhost:9000/api/v1"));
    }
}

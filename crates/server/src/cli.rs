//! Command-line flags for the orchestrator.

use clap::Parser;

use distcalc_core::Config;

/// Distributed calculator orchestrator: compiles expressions and dispatches tasks to agents.
#[derive(Parser, Debug)]
#[command(name = "orchestrator", version, about)]
pub struct Cli {
    /// Listen address (`*` for all interfaces). Overrides HOST.
    #[arg(long)]
    pub ip: Option<String>,

    /// Listen port. Overrides PORT.
    #[arg(long)]
    pub port: Option<u16>,
}

impl Cli {
    /// Layer the flags over a config built from the environment.
    pub fn apply(&self, config: &mut Config) {
        if let Some(ip) = &self.ip {
            config.server.host = ip.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["orchestrator", "--ip", "*", "--port", "9090"]);
        let mut config = Config::for_profile("DCCLI");
        cli.apply(&mut config);
        assert_eq!(config.server.listen_address(), "0.0.0.0:9090");
    }

    #[test]
    fn absent_flags_keep_config() {
        let cli = Cli::parse_from(["orchestrator"]);
        let mut config = Config::for_profile("DCCLI");
        let before = config.server.port;
        cli.apply(&mut config);
        assert_eq!(config.server.port, before);
    }
}

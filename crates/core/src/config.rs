use std::env;

use serde::{Deserialize, Serialize};

use crate::task::Operation;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub operations: OperationTimes,
    pub agent: AgentConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `DISTCALC_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("DISTCALC_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            operations: OperationTimes::from_env_profiled(p),
            agent: AgentConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:      listen={}", self.server.listen_address());
        tracing::info!(
            "  operations:  add={}ms sub={}ms mul={}ms div={}ms",
            self.operations.addition_ms,
            self.operations.subtraction_ms,
            self.operations.multiplication_ms,
            self.operations.division_ms
        );
        tracing::info!(
            "  agent:       url={}, computing_power={}, poll={}ms",
            self.agent.orchestrator_url,
            self.agent.computing_power,
            self.agent.poll_interval_ms
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "127.0.0.1"),
            port: profiled_env_u16(p, "PORT", 8080),
        }
    }

    /// `host:port` suitable for binding. A host of `*` listens on every interface.
    pub fn listen_address(&self) -> String {
        let host = match self.host.trim() {
            "*" | "" => "0.0.0.0",
            h => h,
        };
        format!("{}:{}", host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// ── Operation latencies ───────────────────────────────────────

pub const DEFAULT_ADDITION_MS: u64 = 1000;
pub const DEFAULT_SUBTRACTION_MS: u64 = 1000;
pub const DEFAULT_MULTIPLICATION_MS: u64 = 2000;
pub const DEFAULT_DIVISION_MS: u64 = 2000;
/// Latency for an operator the table has no entry for.
pub const DEFAULT_UNKNOWN_MS: u64 = 1000;

/// Simulated compute latency per arithmetic operator, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationTimes {
    pub addition_ms: u64,
    pub subtraction_ms: u64,
    pub multiplication_ms: u64,
    pub division_ms: u64,
}

impl OperationTimes {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            addition_ms: profiled_env_u64(p, "TIME_ADDITION_MS", DEFAULT_ADDITION_MS),
            subtraction_ms: profiled_env_u64(p, "TIME_SUBTRACTION_MS", DEFAULT_SUBTRACTION_MS),
            multiplication_ms: profiled_env_u64(p, "TIME_MULTIPLICATIONS_MS", DEFAULT_MULTIPLICATION_MS),
            division_ms: profiled_env_u64(p, "TIME_DIVISIONS_MS", DEFAULT_DIVISION_MS),
        }
    }

    /// Same latency for every operator (handy in tests).
    pub fn uniform(ms: u64) -> Self {
        Self {
            addition_ms: ms,
            subtraction_ms: ms,
            multiplication_ms: ms,
            division_ms: ms,
        }
    }

    pub fn for_operation(&self, operation: Operation) -> u64 {
        match operation {
            Operation::Add => self.addition_ms,
            Operation::Subtract => self.subtraction_ms,
            Operation::Multiply => self.multiplication_ms,
            Operation::Divide => self.division_ms,
            Operation::Literal => 0,
        }
    }

    /// Look up by operator symbol; unknown symbols get [`DEFAULT_UNKNOWN_MS`].
    pub fn for_symbol(&self, symbol: &str) -> u64 {
        Operation::from_symbol(symbol)
            .map(|op| self.for_operation(op))
            .unwrap_or(DEFAULT_UNKNOWN_MS)
    }
}

impl Default for OperationTimes {
    fn default() -> Self {
        Self {
            addition_ms: DEFAULT_ADDITION_MS,
            subtraction_ms: DEFAULT_SUBTRACTION_MS,
            multiplication_ms: DEFAULT_MULTIPLICATION_MS,
            division_ms: DEFAULT_DIVISION_MS,
        }
    }
}

// ── Agent (worker pool) ───────────────────────────────────────

pub const DEFAULT_COMPUTING_POWER: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Base URL of the orchestrator, without a trailing slash.
    pub orchestrator_url: String,
    /// Number of parallel pollers.
    pub computing_power: usize,
    /// Fixed wait between polls when no task is available.
    pub poll_interval_ms: u64,
}

impl AgentConfig {
    fn from_env_profiled(p: &str) -> Self {
        let computing_power = match profiled_env_usize(p, "COMPUTING_POWER", DEFAULT_COMPUTING_POWER) {
            0 => DEFAULT_COMPUTING_POWER,
            n => n,
        };
        Self {
            orchestrator_url: profiled_env_or(p, "ORCHESTRATOR_URL", "http://127.0.0.1:8080"),
            computing_power,
            poll_interval_ms: profiled_env_u64(p, "AGENT_POLL_INTERVAL_MS", 1000),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            orchestrator_url: "http://127.0.0.1:8080".to_string(),
            computing_power: DEFAULT_COMPUTING_POWER,
            poll_interval_ms: 1000,
        }
    }
}

use std::env;

use serde::{Deserialize, Serialize};

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
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub editor: EditorConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `VIZKIT_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("VIZKIT_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            editor: EditorConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:  origin={}, base_path={:?}", self.server.origin(), self.server.base_path);
        tracing::info!("  editor:  rules_field={}", self.editor.rules_field);
    }

    /// Return a view safe for printing (the config carries no secrets today).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": {
                "protocol": self.server.protocol,
                "hostname": self.server.hostname,
                "port": self.server.port,
                "base_path": self.server.base_path,
            },
            "editor": { "rules_field": self.editor.rules_field },
        })
    }
}

// ── Server ────────────────────────────────────────────────────

/// Where the console is reachable; used to turn relative report URLs into
/// absolute ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub protocol: String,
    pub hostname: String,
    pub port: u16,
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            hostname: "localhost".to_string(),
            port: 5601,
            base_path: String::new(),
        }
    }
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        let defaults = Self::default();
        Self {
            protocol: profiled_env_or(p, "SERVER_PROTOCOL", &defaults.protocol)
                .trim_end_matches(':')
                .to_string(),
            hostname: profiled_env_or(p, "SERVER_HOSTNAME", &defaults.hostname),
            port: profiled_env_u16(p, "SERVER_PORT", defaults.port),
            base_path: profiled_env_or(p, "SERVER_BASE_PATH", ""),
        }
    }

    /// `protocol://hostname:port` without a trailing slash.
    pub fn origin(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.hostname, self.port)
    }
}

// ── Editor ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Model field holding the rule collection.
    pub rules_field: String,
}

impl EditorConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            rules_field: profiled_env_or(p, "RULES_FIELD", "color_rules"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.origin(), "http://localhost:5601");
        assert!(server.base_path.is_empty());
    }

    #[test]
    fn profile_prefixed_key_wins() {
        // Unique names so parallel tests never observe each other.
        env::set_var("VZTEST_SERVER_HOSTNAME", "reports.internal");
        env::set_var("VZTEST_SERVER_PORT", "not-a-port");
        let config = Config::for_profile("vztest");
        assert_eq!(config.profile, "VZTEST");
        assert_eq!(config.server.hostname, "reports.internal");
        assert_eq!(config.server.port, 5601);
        env::remove_var("VZTEST_SERVER_HOSTNAME");
        env::remove_var("VZTEST_SERVER_PORT");
    }

    #[test]
    fn summary_labels_default_profile() {
        let config = Config::for_profile("");
        assert_eq!(config.profile_label(), "default");
        assert_eq!(config.redacted_summary()["profile"], "default");
    }
}

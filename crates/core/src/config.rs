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

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub chunking: ChunkingConfig,
    pub api: ApiConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `CHUNKWISE_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("CHUNKWISE_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            chunking: ChunkingConfig::from_env_profiled(p),
            api: ApiConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  chunking:    size={}, overlap={}, unit={}, module={}",
            self.chunking.chunk_size,
            self.chunking.chunk_overlap,
            self.chunking.unit,
            self.chunking.module
        );
        tracing::info!(
            "  api:         url={}, max_concurrent={}, timeout={}s",
            self.api.url,
            self.api.max_concurrent,
            self.api.upload_timeout_secs
        );
    }

}

// ── Chunking ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size in measurement units.
    pub chunk_size: usize,
    /// Characters repeated at the start of the next chunk.
    pub chunk_overlap: usize,
    /// Module tag attached to every chunk record.
    pub module: String,
    /// "tokens" or "characters"
    pub unit: String,
}

impl ChunkingConfig {
    fn from_env_profiled(p: &str) -> Self {
        let defaults = Self::default();
        Self {
            chunk_size: profiled_env_usize(p, "INGEST_CHUNK_SIZE", defaults.chunk_size),
            chunk_overlap: profiled_env_usize(p, "INGEST_CHUNK_OVERLAP", defaults.chunk_overlap),
            module: profiled_env_or(p, "INGEST_MODULE", &defaults.module),
            unit: profiled_env_or(p, "INGEST_UNIT", &defaults.unit).to_lowercase(),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 800,
            chunk_overlap: 100,
            module: "default".to_string(),
            unit: "tokens".to_string(),
        }
    }
}

// ── Embeddings API ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the embeddings API.
    pub url: String,
    /// Upper bound on in-flight upsert requests.
    pub max_concurrent: usize,
    /// Per-chunk upload timeout.
    pub upload_timeout_secs: u64,
}

impl ApiConfig {
    fn from_env_profiled(p: &str) -> Self {
        let defaults = Self::default();
        Self {
            url: profiled_env_or(p, "INGEST_API_URL", &defaults.url),
            max_concurrent: profiled_env_usize(p, "INGEST_MAX_CONCURRENT", defaults.max_concurrent),
            upload_timeout_secs: profiled_env_u64(
                p,
                "INGEST_UPLOAD_TIMEOUT_SECS",
                defaults.upload_timeout_secs,
            ),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8001".to_string(),
            max_concurrent: 5,
            upload_timeout_secs: 30,
        }
    }
}

//! Defaults and environment fallback for credentials and endpoints.
//!
//! Explicit values (CLI flags, builder calls) always win. Otherwise the
//! current variable name is consulted, then the legacy `MINMAX_*` spelling
//! still used by older deployments. Empty variables count as unset.

use std::env;

pub const DEFAULT_ENDPOINT: &str = "https://api.minimax.io/v1/t2a_v2";
pub const DEFAULT_BACKUP_ENDPOINT: &str = "https://api-uw.minimax.io/v1/t2a_v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const API_KEY_ENV: &str = "MINIMAX_API_KEY";
pub const LEGACY_API_KEY_ENV: &str = "MINMAX_API_KEY";
pub const ENDPOINT_ENV: &str = "MINIMAX_TTS_ENDPOINT";
pub const LEGACY_ENDPOINT_ENV: &str = "MINMAX_TTS_ENDPOINT";
pub const BACKUP_ENDPOINT_ENV: &str = "MINIMAX_TTS_BACKUP_ENDPOINT";

/// Read a process environment variable, treating empty values as unset.
pub fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn first_set(
    explicit: Option<String>,
    names: &[&str],
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    explicit
        .filter(|v| !v.trim().is_empty())
        .or_else(|| names.iter().find_map(|name| lookup(name)))
        .map(|v| v.trim().to_string())
}

/// Resolve the bearer credential. Returns `None` when nothing is configured.
pub fn resolve_api_key(
    explicit: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    first_set(explicit, &[API_KEY_ENV, LEGACY_API_KEY_ENV], lookup)
}

pub fn resolve_endpoint(explicit: Option<String>, lookup: impl Fn(&str) -> Option<String>) -> String {
    first_set(explicit, &[ENDPOINT_ENV, LEGACY_ENDPOINT_ENV], lookup)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
}

pub fn resolve_backup_endpoint(
    explicit: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> String {
    first_set(explicit, &[BACKUP_ENDPOINT_ENV], lookup)
        .unwrap_or_else(|| DEFAULT_BACKUP_ENDPOINT.to_string())
}

/// Ordered list of endpoints to try. The backup is only added when it
/// differs from the primary.
pub fn endpoint_chain(primary: &str, backup: Option<&str>) -> Vec<String> {
    let primary = primary.trim();
    let mut chain = vec![primary.to_string()];
    if let Some(backup) = backup.map(str::trim).filter(|b| !b.is_empty()) {
        if backup != primary {
            chain.push(backup.to_string());
        }
    }
    chain
}

//! Environment variable parsing with warn-level logging for invalid values.

use crate::ConfigError;

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    parse_with_default(var, std::env::var(var).ok(), default)
}

fn parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    raw: Option<String>,
    default: T,
) -> T {
    match raw {
        Some(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        None => default,
    }
}

/// Read a variable that must be present and non-blank.
pub fn env_required(var: &'static str) -> Result<String, ConfigError> {
    non_blank(var, std::env::var(var).ok())
}

fn non_blank(var: &'static str, raw: Option<String>) -> Result<String, ConfigError> {
    match raw {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_owned()),
        _ => Err(ConfigError::MissingVar(var)),
    }
}

/// Read a variable that may be absent; blank counts as absent.
pub fn env_optional(var: &str) -> Option<String> {
    std::env::var(var).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

/// Read a comma separated list, falling back to `default` when unset or empty.
pub fn env_list(var: &str, default: &[&str]) -> Vec<String> {
    split_list(env_optional(var).as_deref(), default)
}

fn split_list(raw: Option<&str>, default: &[&str]) -> Vec<String> {
    let items: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();
    if items.is_empty() { default.iter().map(|s| (*s).to_owned()).collect() } else { items }
}

/// Connection settings for the PostgREST table store.
#[derive(Clone)]
pub struct StoreSettings {
    pub url: String,
    pub key: String,
}

impl std::fmt::Debug for StoreSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSettings").field("url", &self.url).field("key", &"***").finish()
    }
}

impl StoreSettings {
    pub const URL_VAR: &'static str = "SUPABASE_URL";
    pub const KEY_VAR: &'static str = "SUPABASE_KEY";

    /// Reads `SUPABASE_URL` and `SUPABASE_KEY`.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingVar` if either is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self { url: env_required(Self::URL_VAR)?, key: env_required(Self::KEY_VAR)? })
    }
}

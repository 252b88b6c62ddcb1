//! Environment variable parsing for `TELEPROMPTER_*` settings.

/// Parse an environment variable, falling back to `default`.
///
/// An unset variable is the expected case and returns `default` silently.
/// A set but unparsable value logs a warning before falling back.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.trim().parse() {
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
        Err(_) => default,
    }
}

/// Read an optional string setting. Blank values count as unset.
#[must_use]
pub fn env_optional(var: &str) -> Option<String> {
    std::env::var(var).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

//! Identity resolution for comment authorship.
//!
//! The acting user is an opaque string. Rather than requiring `--as` on every
//! invocation, it is resolved through a chain:
//!
//! 1. `--as <user>`: explicit per-command override
//! 2. `SHIPTRACK_USER` env var: process/session level
//! 3. `user` in `~/.shiptrack/config.toml`: global default

use std::env;

use crate::config::Config;

const USER_ENV: &str = "SHIPTRACK_USER";

/// Error message shown when no user can be resolved.
pub const USER_REQUIRED: &str = "user required: pass --as <user>, \
    set SHIPTRACK_USER, or add `user = \"...\"` to ~/.shiptrack/config.toml";

/// Resolve the acting user from the tiered resolution chain.
pub fn resolve_user(explicit: Option<&str>, config: &Config) -> Result<String, String> {
    resolve_from(explicit, env::var(USER_ENV).ok().as_deref(), config)
}

fn resolve_from(
    explicit: Option<&str>,
    from_env: Option<&str>,
    config: &Config,
) -> Result<String, String> {
    [explicit, from_env, config.user.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|user| !user.is_empty())
        .map(str::to_string)
        .ok_or_else(|| USER_REQUIRED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(user: Option<&str>) -> Config {
        Config {
            user: user.map(String::from),
            ..Config::default()
        }
    }

    #[test]
    fn explicit_wins() {
        let result = resolve_from(Some("dana"), Some("env-user"), &config(Some("cfg")));
        assert_eq!(result.unwrap(), "dana");
    }

    #[test]
    fn env_beats_config() {
        let result = resolve_from(None, Some("env-user"), &config(Some("cfg")));
        assert_eq!(result.unwrap(), "env-user");
    }

    #[test]
    fn falls_back_to_config() {
        let result = resolve_from(None, Some(""), &config(Some("cfg")));
        assert_eq!(result.unwrap(), "cfg");
    }

    #[test]
    fn nothing_resolves_to_error() {
        let err = resolve_from(None, None, &config(None)).unwrap_err();
        assert_eq!(err, USER_REQUIRED);
    }
}

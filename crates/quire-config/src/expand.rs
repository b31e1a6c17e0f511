//! `${VAR}` expansion in configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// `${VAR}` fails when VAR is unset, `${VAR:-default}` falls back to the
/// default. Bare `$VAR` is left untouched.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("QUIRE_TEST_EXPAND_HOST", "0.0.0.0");
        }
        let result = expand_env("${QUIRE_TEST_EXPAND_HOST}", "server.host").unwrap();
        assert_eq!(result, "0.0.0.0");
        unsafe {
            std::env::remove_var("QUIRE_TEST_EXPAND_HOST");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        let result = expand_env("${QUIRE_TEST_NEVER_SET:-docs}", "content.dir").unwrap();
        assert_eq!(result, "docs");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("QUIRE_TEST_EXPAND_ROOT", "/srv");
        }
        let result = expand_env("${QUIRE_TEST_EXPAND_ROOT}/content", "content.dir").unwrap();
        assert_eq!(result, "/srv/content");
        unsafe {
            std::env::remove_var("QUIRE_TEST_EXPAND_ROOT");
        }
    }

    #[test]
    fn test_expand_missing_var() {
        let err = expand_env("${QUIRE_TEST_MISSING}", "server.host").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in server.host: ${QUIRE_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_literals_unchanged() {
        assert_eq!(expand_env("localhost", "server.host").unwrap(), "localhost");
        assert_eq!(expand_env("$HOME", "server.host").unwrap(), "$HOME");
    }
}

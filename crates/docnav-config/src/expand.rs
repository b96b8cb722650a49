//! Environment variable expansion for configuration strings.
//!
//! Only the braced forms are recognized:
//! - `${VAR}` - value of VAR, error if unset
//! - `${VAR:-default}` - value of VAR, or `default` if unset

use crate::ConfigError;

/// Lookup failure carrying the unset variable name.
struct UnsetVar(String);

/// Expand `${...}` references in `value`.
///
/// `field` names the configuration key for error messages. Strings without
/// `${` are returned as-is; a bare `$VAR` is left alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Expand an optional value in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(current) = value.as_deref() {
        *value = Some(expand_env(current, field)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_value_unchanged() {
        let result = expand_env("designvault", "site.search.index_name").unwrap();
        assert_eq!(result, "designvault");
    }

    #[test]
    fn test_set_var_expanded() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCNAV_EXPAND_APP_ID", "APP123");
        }
        let result = expand_env("${DOCNAV_EXPAND_APP_ID}", "site.search.app_id").unwrap();
        assert_eq!(result, "APP123");
        unsafe {
            std::env::remove_var("DOCNAV_EXPAND_APP_ID");
        }
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCNAV_EXPAND_UNSET_KEY");
        }
        let result =
            expand_env("${DOCNAV_EXPAND_UNSET_KEY:-public-key}", "site.search.api_key").unwrap();
        assert_eq!(result, "public-key");
    }

    #[test]
    fn test_unset_var_names_field_and_variable() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCNAV_EXPAND_MISSING");
        }
        let err = expand_env("${DOCNAV_EXPAND_MISSING}", "site.url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("DOCNAV_EXPAND_MISSING"));
        assert!(msg.contains("site.url"));
    }

    #[test]
    fn test_var_embedded_in_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCNAV_EXPAND_HOST", "docs.example.com");
        }
        let result = expand_env("https://${DOCNAV_EXPAND_HOST}", "site.url").unwrap();
        assert_eq!(result, "https://docs.example.com");
        unsafe {
            std::env::remove_var("DOCNAV_EXPAND_HOST");
        }
    }

    #[test]
    fn test_bare_dollar_left_alone() {
        let result = expand_env("key$with$dollars", "site.search.api_key").unwrap();
        assert_eq!(result, "key$with$dollars");
    }

    #[test]
    fn test_expand_opt_none_stays_none() {
        let mut value = None;
        expand_opt(&mut value, "site.url").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_expand_opt_expands_in_place() {
        let mut value = Some("${DOCNAV_EXPAND_OPT_UNSET:-fallback}".to_owned());
        expand_opt(&mut value, "site.search.index_name").unwrap();
        assert_eq!(value.as_deref(), Some("fallback"));
    }
}

//! Runtime configuration for the admin core.

use crate::error::{BuildError, BuildResult};
use serde::{Deserialize, Serialize};

/// Tunables for pagination, filter parsing and error reporting.
///
/// Can be deserialized from JSON; missing fields take their defaults.
///
/// ```rust
/// use tenant_admin::AdminConfig;
///
/// let config = AdminConfig::from_json_str(r#"{"default_page_size": 25}"#).unwrap();
/// assert_eq!(config.default_page_size, 25);
/// assert_eq!(config.max_page_size, Some(1000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Page size used when a list request omits `pageSize`.
    pub default_page_size: i64,

    /// Page number used when a list request omits `pageNumber`.
    pub default_page_number: i64,

    /// Ceiling for requested page sizes; larger requests are clamped. `None` disables it.
    pub max_page_size: Option<usize>,

    /// Separator for the values of an `In` criterion.
    pub in_list_delimiter: char,

    /// Report requests for unregistered entities as `Denied` instead of `UnknownEntity`.
    pub conceal_unknown_entities: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            default_page_number: 1,
            max_page_size: Some(1000),
            in_list_delimiter: ',',
            conceal_unknown_entities: true,
        }
    }
}

impl AdminConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(content: &str) -> BuildResult<Self> {
        let config: AdminConfig =
            serde_json::from_str(content).map_err(|e| BuildError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> BuildResult<()> {
        let invalid = |message: &str| {
            Err(BuildError::InvalidConfiguration {
                message: message.to_string(),
            })
        };

        if self.default_page_size < 1 {
            return invalid("default_page_size must be at least 1");
        }
        if self.default_page_number < 1 {
            return invalid("default_page_number must be at least 1");
        }
        if self.max_page_size == Some(0) {
            return invalid("max_page_size must be at least 1");
        }
        if self.in_list_delimiter.is_whitespace() {
            return invalid("in_list_delimiter cannot be whitespace");
        }

        Ok(())
    }
}

// Copyright 2024 The Papers Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Policy configuration.

use crate::errors::{PapersError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a policy.
///
/// Every field has a default, so hosts can deserialize a partial document
/// (or nothing at all) from whatever source they load settings from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Label attached to every log event the policy emits.
    pub name: String,
    /// Reject grants whose action list expands to nothing.
    pub strict_grants: bool,
}

impl PolicyConfig {
    /// Creates the default configuration with a custom name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Enables or disables strict grant validation.
    pub fn strict(mut self, strict_grants: bool) -> Self {
        self.strict_grants = strict_grants;
        self
    }

    /// Checks the configuration before a policy is built from it.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PapersError::InvalidConfig {
                field: "name".to_string(),
                message: "policy name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            strict_grants: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_config_default() {
        let config = PolicyConfig::default();
        assert_eq!(config.name, "default");
        assert!(!config.strict_grants);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_policy_config_partial_document_uses_defaults() {
        let config: PolicyConfig =
            serde_json::from_str(r#"{ "strict_grants": true }"#).expect("valid config");
        assert_eq!(config.name, "default");
        assert!(config.strict_grants);

        let empty: PolicyConfig = serde_json::from_str("{}").expect("valid config");
        assert_eq!(empty, PolicyConfig::default());
    }

    #[test]
    fn test_policy_config_serialization_round_trip() {
        let config = PolicyConfig::named("blog").strict(true);
        let serialized = serde_json::to_string(&config).expect("Failed to serialize PolicyConfig");
        let deserialized: PolicyConfig =
            serde_json::from_str(&serialized).expect("Failed to deserialize PolicyConfig");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_policy_config_rejects_blank_name() {
        let err = PolicyConfig::named("  ").validate().unwrap_err();
        assert_eq!(
            err,
            PapersError::InvalidConfig {
                field: "name".to_string(),
                message: "policy name must not be empty".to_string(),
            }
        );
    }
}

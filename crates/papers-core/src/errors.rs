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


//! Defines the error type shared by the papers crates.

use thiserror::Error;

/// Convenience alias used throughout the papers crates.
pub type Result<T> = std::result::Result<T, PapersError>;

/// The primary error type for policy configuration and enforcement.
///
/// Identifiers are captured as their `Debug` rendering so the error stays
/// independent of the host's schema types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PapersError {
    /// A role with this name is already registered on the policy.
    #[error("Role {role} has already been defined")]
    DuplicateRole {
        /// The offending role name.
        role: String,
    },

    /// A role referenced by name has not been added to the policy.
    #[error("Role {role} not found on Policy")]
    MissingRole {
        /// The missing role name.
        role: String,
    },

    /// A permission for this (action, subject type) key already exists on the role.
    #[error("A permission for {action} and {subject_type} has already been defined")]
    DuplicatePermission {
        /// The concrete (expanded) action.
        action: String,
        /// The subject type of the existing permission.
        subject_type: String,
    },

    /// A grant was rejected by strict validation.
    #[error("Invalid grant: {0}")]
    InvalidGrant(String),

    /// A policy configuration failed validation.
    #[error("Invalid configuration ({field}): {message}")]
    InvalidConfig {
        /// The configuration field at fault.
        field: String,
        /// Why it was rejected.
        message: String,
    },

    /// `authorize` was called for a decision that `can` denies.
    #[error("{action} is not permitted on {subject} for {user}")]
    AccessDenied {
        /// The attempted action.
        action: String,
        /// The subject type acted upon. Kept out of the message.
        subject_type: String,
        /// The subject instance, or `*` when none was supplied.
        subject: String,
        /// The user the decision was made for.
        user: String,
    },
}

impl PapersError {
    /// Returns `true` for errors raised while building a policy.
    pub fn is_configuration_error(&self) -> bool {
        !self.is_access_denied()
    }

    /// Returns `true` for the runtime denial raised by `authorize`.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, PapersError::AccessDenied { .. })
    }
}

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


#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Role-based authorization decisions for papers.
//!
//! This crate provides:
//! - [`Policy`]: ordered roles and the `can`/`cannot`/`authorize`/`query_for` API
//! - [`Role`]: permissions gated by a membership predicate, configured with `grant`
//! - [`Permission`]: a single (action, subject type) grant
//!
//! # Example
//!
//! ```
//! use papers_policy::{create_policy, Action, GrantOptions, Schema};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Kind { Post }
//!
//! #[derive(Debug, PartialEq)]
//! struct Post { archived: bool }
//!
//! struct User { admin: bool }
//!
//! struct Blog;
//!
//! impl Schema for Blog {
//!     type User = User;
//!     type RoleName = &'static str;
//!     type Action = std::convert::Infallible;
//!     type SubjectType = Kind;
//!     type Subject = Post;
//! }
//!
//! # fn main() -> papers_policy::Result<()> {
//! let mut policy = create_policy::<Blog>();
//! policy
//!     .add_role_with("admin", |user: &User| user.admin)?
//!     .grant(Action::Crud, Kind::Post, GrantOptions::<Blog>::new())?;
//! policy.add_role("guest")?.grant(
//!     Action::Read,
//!     Kind::Post,
//!     GrantOptions::<Blog>::new().predicate(|_, post, _, _, _| post.map_or(false, |p| !p.archived)),
//! )?;
//!
//! let guest = User { admin: false };
//! assert!(policy.can(&guest, Action::Read, &Kind::Post, Some(&Post { archived: false })));
//! assert!(policy.cannot(&guest, Action::Read, &Kind::Post, Some(&Post { archived: true })));
//! # Ok(())
//! # }
//! ```

pub mod permission;
pub mod policy;
pub mod role;

pub use papers_core::{Action, IntoActions, PapersError, PolicyConfig, Result, Schema};
pub use permission::{Permission, PermissionPredicate, PermissionQuery};
pub use policy::Policy;
pub use role::{GrantOptions, Role, RolePredicate};

/// Creates an empty policy for schema `S` with the default configuration.
pub fn create_policy<S: Schema>() -> Policy<S> {
    Policy::new()
}

/// Creates an empty policy for schema `S`, validating `config` first.
///
/// # Errors
/// Returns [`PapersError::InvalidConfig`] if the configuration is rejected.
pub fn create_policy_with<S: Schema>(config: PolicyConfig) -> Result<Policy<S>> {
    Policy::with_config(config)
}

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


//! The host-supplied type vocabulary a policy is parameterised by.

use std::fmt::Debug;

/// Bundles the types a host application plugs into the engine.
///
/// The engine never inspects users or subjects; it only hands them to the
/// predicates and queries the host registered. Identifiers (role names,
/// actions, subject types) are compared by equality and rendered with `Debug`
/// in log events and errors.
///
/// # Example
///
/// ```
/// use papers_core::Schema;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Kind { Post }
///
/// #[derive(Debug, PartialEq)]
/// struct Post { id: u32, archived: bool }
///
/// struct User { admin: bool }
///
/// struct Blog;
///
/// impl Schema for Blog {
///     type User = User;
///     type RoleName = &'static str;
///     type Action = std::convert::Infallible;
///     type SubjectType = Kind;
///     type Subject = Post;
/// }
/// ```
pub trait Schema: 'static {
    /// The caller's user type.
    type User: 'static;
    /// Names roles are registered under.
    type RoleName: Debug + PartialEq + 'static;
    /// Host-defined actions, unioned with the built-in verbs.
    type Action: Debug + Clone + PartialEq + 'static;
    /// Key naming a category of subjects.
    type SubjectType: Debug + Clone + PartialEq + 'static;
    /// A concrete subject instance. Equality drives query membership.
    type Subject: PartialEq + 'static;
}

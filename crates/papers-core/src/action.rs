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


//! The action vocabulary shared by every policy.
//!
//! A host declares its own actions (for example `archive` or `publish`) and the
//! engine unions them with a fixed set of built-in verbs. Two of the built-ins,
//! [`Action::Crud`] and [`Action::Rest`], are shorthands that are expanded into
//! concrete verbs when a permission is granted and never stored themselves.

use std::convert::Infallible;

/// An action a user attempts on a subject.
///
/// `A` is the host's own action vocabulary. Hosts without custom actions can
/// use the default, [`Infallible`], which makes [`Action::Custom`] impossible
/// to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action<A = Infallible> {
    /// Shorthand for `create`, `read`, `update` and `delete`.
    Crud,
    /// Shorthand for the seven REST verbs: `index`, `new`, `create`, `show`,
    /// `edit`, `update` and `delete`.
    Rest,
    /// List instances.
    Index,
    /// Render a form for a new instance.
    New,
    /// Create an instance. Never instance-scoped.
    Create,
    /// Read an instance.
    Read,
    /// Show a single instance.
    Show,
    /// Render a form for an existing instance.
    Edit,
    /// Update an instance.
    Update,
    /// Delete an instance.
    Delete,
    /// A host-defined action.
    Custom(A),
}

impl<A> Action<A> {
    /// Returns `true` for `crud` and `rest`.
    pub fn is_shorthand(&self) -> bool {
        matches!(self, Action::Crud | Action::Rest)
    }

    /// Expands a shorthand into the concrete actions it stands for.
    ///
    /// Every other action expands to itself.
    pub fn expand(self) -> Vec<Action<A>> {
        match self {
            Action::Rest => vec![
                Action::Index,
                Action::New,
                Action::Create,
                Action::Show,
                Action::Edit,
                Action::Update,
                Action::Delete,
            ],
            Action::Crud => vec![
                Action::Create,
                Action::Read,
                Action::Update,
                Action::Delete,
            ],
            concrete => vec![concrete],
        }
    }

    /// The name of a built-in action, or `None` for a custom one.
    pub fn builtin_name(&self) -> Option<&'static str> {
        let name = match self {
            Action::Crud => "crud",
            Action::Rest => "rest",
            Action::Index => "index",
            Action::New => "new",
            Action::Create => "create",
            Action::Read => "read",
            Action::Show => "show",
            Action::Edit => "edit",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Custom(_) => return None,
        };
        Some(name)
    }
}

impl<A: PartialEq> Action<A> {
    /// Expands every action and drops repeats, keeping the first occurrence.
    pub fn expand_all<I>(actions: I) -> Vec<Action<A>>
    where
        I: IntoIterator<Item = Action<A>>,
    {
        let mut expanded: Vec<Action<A>> = Vec::new();
        for action in actions.into_iter().flat_map(Action::expand) {
            if !expanded.contains(&action) {
                expanded.push(action);
            }
        }
        expanded
    }
}

impl<A> From<A> for Action<A> {
    fn from(action: A) -> Self {
        Action::Custom(action)
    }
}

/// Anything that can be granted in one call: a single action or a list.
pub trait IntoActions<A> {
    /// Converts into the list of (possibly shorthand) actions.
    fn into_actions(self) -> Vec<Action<A>>;
}

impl<A> IntoActions<A> for Action<A> {
    fn into_actions(self) -> Vec<Action<A>> {
        vec![self]
    }
}

impl<A> IntoActions<A> for Vec<Action<A>> {
    fn into_actions(self) -> Vec<Action<A>> {
        self
    }
}

impl<A, const N: usize> IntoActions<A> for [Action<A>; N] {
    fn into_actions(self) -> Vec<Action<A>> {
        self.into_iter().collect()
    }
}

impl<A: Clone> IntoActions<A> for &[Action<A>] {
    fn into_actions(self) -> Vec<Action<A>> {
        self.to_vec()
    }
}

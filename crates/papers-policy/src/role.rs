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


//! Roles: named bundles of permissions gated by a membership predicate.

use crate::permission::{
    predicate_fn, query_fn, Permission, PermissionPredicate, PermissionQuery,
};
use papers_core::{Action, IntoActions, PapersError, Result, Schema};
use std::fmt;
use std::sync::Arc;

/// Decides whether a role applies to a user.
pub type RolePredicate<S> = Arc<dyn Fn(&<S as Schema>::User) -> bool + Send + Sync>;

/// The optional query and predicate attached to a grant.
///
/// How the two combine is decided per concrete action by [`Role::grant`].
pub struct GrantOptions<S: Schema> {
    query: Option<PermissionQuery<S>>,
    predicate: Option<PermissionPredicate<S>>,
}

impl<S: Schema> GrantOptions<S> {
    /// No query and no predicate: an unconditional grant.
    pub fn new() -> Self {
        Self {
            query: None,
            predicate: None,
        }
    }

    /// Lists the instances the grant reaches for a user.
    pub fn query<F>(mut self, query: F) -> Self
    where
        F: Fn(&S::User) -> Vec<S::Subject> + Send + Sync + 'static,
    {
        self.query = Some(query_fn::<S, _>(query));
        self
    }

    /// Decides instance-level access for the grant.
    pub fn predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(
                &S::User,
                Option<&S::Subject>,
                &S::SubjectType,
                &Action<S::Action>,
                &Permission<S>,
            ) -> bool
            + Send
            + Sync
            + 'static,
    {
        self.predicate = Some(predicate_fn::<S, _>(predicate));
        self
    }
}

impl<S: Schema> Default for GrantOptions<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn always_granted<S: Schema>() -> PermissionPredicate<S> {
    predicate_fn::<S, _>(|_, _, _, _, _| true)
}

fn member_of_query<S: Schema>(query: PermissionQuery<S>) -> PermissionPredicate<S> {
    predicate_fn::<S, _>(move |user, subject, _, _, _| {
        subject.map_or(false, |subject| {
            query(user).iter().any(|candidate| candidate == subject)
        })
    })
}

/// A named, ordered set of permissions.
///
/// Roles are created through [`Policy::add_role`](crate::Policy::add_role)
/// and configured with [`Role::grant`].
pub struct Role<S: Schema> {
    name: S::RoleName,
    predicate: Option<RolePredicate<S>>,
    permissions: Vec<Permission<S>>,
    strict_grants: bool,
}

impl<S: Schema> Role<S> {
    pub(crate) fn new(
        name: S::RoleName,
        predicate: Option<RolePredicate<S>>,
        strict_grants: bool,
    ) -> Self {
        Self {
            name,
            predicate,
            permissions: Vec::new(),
            strict_grants,
        }
    }

    /// The name this role is registered under.
    pub fn name(&self) -> &S::RoleName {
        &self.name
    }

    /// Permissions in the order they were granted.
    pub fn permissions(&self) -> &[Permission<S>] {
        &self.permissions
    }

    /// Whether this role applies to `user`. Roles without a predicate apply to everyone.
    pub fn applies_to(&self, user: &S::User) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(user),
            None => true,
        }
    }

    /// Grants `actions` on `subject_type`.
    ///
    /// Shorthands are expanded and repeats dropped before anything is
    /// installed. Each concrete action becomes one [`Permission`]:
    ///
    /// | options            | query          | predicate                          |
    /// |--------------------|----------------|------------------------------------|
    /// | query + predicate  | as given       | as given                           |
    /// | query, `create`    | as given       | always granted                     |
    /// | query, other       | as given       | subject is in the query's result   |
    /// | predicate          | none           | as given                           |
    /// | nothing            | empty list     | always granted                     |
    ///
    /// # Errors
    /// Returns [`PapersError::DuplicatePermission`] as soon as an expanded
    /// action collides with an existing permission. Actions processed earlier
    /// in the same call stay installed. In strict mode an action list that
    /// expands to nothing is rejected with [`PapersError::InvalidGrant`].
    pub fn grant<I>(
        &mut self,
        actions: I,
        subject_type: S::SubjectType,
        options: GrantOptions<S>,
    ) -> Result<()>
    where
        I: IntoActions<S::Action>,
    {
        let actions = Action::expand_all(actions.into_actions());
        if actions.is_empty() && self.strict_grants {
            return Err(PapersError::InvalidGrant(format!(
                "no actions given for {:?} on role {:?}",
                subject_type, self.name
            )));
        }

        let GrantOptions { query, predicate } = options;

        for action in actions {
            if self.permission_exists(&action, &subject_type) {
                return Err(PapersError::DuplicatePermission {
                    action: format!("{:?}", action),
                    subject_type: format!("{:?}", subject_type),
                });
            }

            let mut permission = Permission::new(action, subject_type.clone());
            match (&query, &predicate) {
                (Some(query), Some(predicate)) => {
                    permission.query = Some(query.clone());
                    permission.predicate = Some(predicate.clone());
                }
                (Some(query), None) => {
                    permission.query = Some(query.clone());
                    // there is no existing instance to filter on create
                    permission.predicate = if matches!(permission.action(), Action::Create) {
                        Some(always_granted::<S>())
                    } else {
                        Some(member_of_query::<S>(query.clone()))
                    };
                }
                (None, Some(predicate)) => {
                    permission.predicate = Some(predicate.clone());
                }
                (None, None) => {
                    permission.query = Some(query_fn::<S, _>(|_| Vec::new()));
                    permission.predicate = Some(always_granted::<S>());
                }
            }

            tracing::debug!(
                role = ?self.name,
                action = ?permission.action(),
                subject_type = ?permission.subject_type(),
                has_query = permission.has_query(),
                "Permission granted"
            );
            self.permissions.push(permission);
        }

        Ok(())
    }

    /// The permission for `(action, subject_type)`, if granted.
    pub fn find_permission(
        &self,
        action: &Action<S::Action>,
        subject_type: &S::SubjectType,
    ) -> Option<&Permission<S>> {
        self.permissions
            .iter()
            .find(|permission| permission.matches(action, subject_type))
    }

    /// Whether a permission for `(action, subject_type)` exists.
    pub fn permission_exists(
        &self,
        action: &Action<S::Action>,
        subject_type: &S::SubjectType,
    ) -> bool {
        self.find_permission(action, subject_type).is_some()
    }
}

impl<S: Schema> fmt::Debug for Role<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Role")
            .field("name", &self.name)
            .field("has_predicate", &self.predicate.is_some())
            .field("permissions", &self.permissions)
            .finish()
    }
}

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


//! The policy: an ordered set of roles and the decision API.
//!
//! Roles are checked in the order they were added. As soon as an applicable
//! role holds a permission for the requested (action, subject type), that
//! permission decides; later roles are never consulted, even if they would
//! have answered differently. Add roles from most to least specific.

use crate::permission::Permission;
use crate::role::{Role, RolePredicate};
use papers_core::{Action, PapersError, PolicyConfig, Result, Schema};
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Root container for roles and the entry point for every decision.
pub struct Policy<S: Schema> {
    roles: Vec<Role<S>>,
    config: PolicyConfig,
}

impl<S: Schema> Policy<S> {
    /// Creates an empty policy with the default configuration.
    pub fn new() -> Self {
        Self {
            roles: Vec::new(),
            config: PolicyConfig::default(),
        }
    }

    /// Creates an empty policy after validating `config`.
    pub fn with_config(config: PolicyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            roles: Vec::new(),
            config,
        })
    }

    /// The configuration this policy was built with.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Adds a role that applies to every user.
    ///
    /// # Errors
    /// Returns [`PapersError::DuplicateRole`] if `name` is already registered.
    pub fn add_role(&mut self, name: S::RoleName) -> Result<&mut Role<S>> {
        self.insert_role(name, None)
    }

    /// Adds a role that applies to users accepted by `predicate`.
    ///
    /// # Errors
    /// Returns [`PapersError::DuplicateRole`] if `name` is already registered.
    pub fn add_role_with<F>(&mut self, name: S::RoleName, predicate: F) -> Result<&mut Role<S>>
    where
        F: Fn(&S::User) -> bool + Send + Sync + 'static,
    {
        let predicate: RolePredicate<S> = Arc::new(predicate);
        self.insert_role(name, Some(predicate))
    }

    fn insert_role(
        &mut self,
        name: S::RoleName,
        predicate: Option<RolePredicate<S>>,
    ) -> Result<&mut Role<S>> {
        if self.role(&name).is_some() {
            return Err(PapersError::DuplicateRole {
                role: format!("{:?}", name),
            });
        }

        tracing::debug!(
            policy = %self.config.name,
            role = ?name,
            priority = self.roles.len(),
            "Role added"
        );
        self.roles
            .push(Role::new(name, predicate, self.config.strict_grants));
        let index = self.roles.len() - 1;
        Ok(&mut self.roles[index])
    }

    /// The role registered under `name`.
    pub fn role(&self, name: &S::RoleName) -> Option<&Role<S>> {
        self.roles.iter().find(|role| role.name() == name)
    }

    /// Mutable access to the role registered under `name`.
    pub fn role_mut(&mut self, name: &S::RoleName) -> Option<&mut Role<S>> {
        self.roles.iter_mut().find(|role| role.name() == name)
    }

    /// All roles, in evaluation order.
    pub fn roles(&self) -> &[Role<S>] {
        &self.roles
    }

    /// Runs `configure` on each named role in turn.
    ///
    /// # Errors
    /// Returns [`PapersError::MissingRole`] for the first name that is not
    /// registered, or the first error `configure` returns. Roles configured
    /// before the failure keep their changes.
    pub fn permit<N, F>(&mut self, names: N, mut configure: F) -> Result<()>
    where
        N: IntoIterator<Item = S::RoleName>,
        F: FnMut(&mut Role<S>) -> Result<()>,
    {
        for name in names {
            let role = self
                .role_mut(&name)
                .ok_or_else(|| PapersError::MissingRole {
                    role: format!("{:?}", name),
                })?;
            configure(role)?;
        }
        Ok(())
    }

    /// Roles that apply to `user`, in evaluation order.
    pub fn applicable_roles<'a, 'u>(
        &'a self,
        user: &'u S::User,
    ) -> impl Iterator<Item = &'a Role<S>> + 'u
    where
        'a: 'u,
    {
        self.roles.iter().filter(move |role| role.applies_to(user))
    }

    /// The first applicable role holding a permission for the key, with that permission.
    fn deciding_permission(
        &self,
        user: &S::User,
        action: &Action<S::Action>,
        subject_type: &S::SubjectType,
    ) -> Option<(&Role<S>, &Permission<S>)> {
        self.applicable_roles(user).find_map(|role| {
            role.find_permission(action, subject_type)
                .map(|permission| (role, permission))
        })
    }

    /// Whether `user` may perform `action` on `subject_type` (or on `subject`).
    ///
    /// Returns `false` when no applicable role holds a matching permission.
    pub fn can(
        &self,
        user: &S::User,
        action: impl Into<Action<S::Action>>,
        subject_type: &S::SubjectType,
        subject: Option<&S::Subject>,
    ) -> bool {
        let action = action.into();
        match self.deciding_permission(user, &action, subject_type) {
            Some((role, permission)) => {
                let granted = permission.is_granted(user, &action, subject_type, subject);
                tracing::trace!(
                    policy = %self.config.name,
                    role = ?role.name(),
                    action = ?action,
                    subject_type = ?subject_type,
                    granted,
                    "Decision made"
                );
                granted
            }
            None => {
                tracing::debug!(
                    policy = %self.config.name,
                    action = ?action,
                    subject_type = ?subject_type,
                    "No applicable role grants this action"
                );
                false
            }
        }
    }

    /// The negation of [`Policy::can`].
    pub fn cannot(
        &self,
        user: &S::User,
        action: impl Into<Action<S::Action>>,
        subject_type: &S::SubjectType,
        subject: Option<&S::Subject>,
    ) -> bool {
        !self.can(user, action, subject_type, subject)
    }

    /// Like [`Policy::can`], but denial is an error.
    ///
    /// # Errors
    /// Returns [`PapersError::AccessDenied`] describing the attempt.
    pub fn authorize(
        &self,
        user: &S::User,
        action: impl Into<Action<S::Action>>,
        subject_type: &S::SubjectType,
        subject: Option<&S::Subject>,
    ) -> Result<()>
    where
        S::User: Debug,
        S::Subject: Debug,
    {
        let action = action.into();
        if self.cannot(user, action.clone(), subject_type, subject) {
            let subject = subject.map_or_else(|| "*".to_string(), |s| format!("{:?}", s));
            tracing::warn!(
                policy = %self.config.name,
                action = ?action,
                subject_type = ?subject_type,
                subject = %subject,
                "Access denied"
            );
            return Err(PapersError::AccessDenied {
                action: format!("{:?}", action),
                subject_type: format!("{:?}", subject_type),
                subject,
                user: format!("{:?}", user),
            });
        }
        Ok(())
    }

    /// The instances `user` can reach for `action` on `subject_type`.
    ///
    /// Uses the same role scan as [`Policy::can`]. Returns `None` when no
    /// applicable role holds a matching permission, or when the deciding
    /// permission has no query.
    pub fn query_for(
        &self,
        user: &S::User,
        action: impl Into<Action<S::Action>>,
        subject_type: &S::SubjectType,
    ) -> Option<Vec<S::Subject>> {
        let action = action.into();
        let (role, permission) = self.deciding_permission(user, &action, subject_type)?;
        tracing::trace!(
            policy = %self.config.name,
            role = ?role.name(),
            action = ?action,
            subject_type = ?subject_type,
            has_query = permission.has_query(),
            "Query resolved"
        );
        permission.fetch(user)
    }
}

impl<S: Schema> Default for Policy<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Schema> fmt::Debug for Policy<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("config", &self.config)
            .field("roles", &self.roles)
            .finish()
    }
}

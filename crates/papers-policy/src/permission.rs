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


//! A single (action, subject type) grant.

use papers_core::{Action, Schema};
use std::fmt;
use std::sync::Arc;

/// Decides whether a permission covers a specific subject instance.
///
/// Called with the user, the instance (if any), the subject type, the concrete
/// action and the permission being evaluated.
pub type PermissionPredicate<S> = Arc<
    dyn Fn(
            &<S as Schema>::User,
            Option<&<S as Schema>::Subject>,
            &<S as Schema>::SubjectType,
            &Action<<S as Schema>::Action>,
            &Permission<S>,
        ) -> bool
        + Send
        + Sync,
>;

/// Lists the subject instances a user can reach through a permission.
pub type PermissionQuery<S> =
    Arc<dyn Fn(&<S as Schema>::User) -> Vec<<S as Schema>::Subject> + Send + Sync>;

pub(crate) fn predicate_fn<S, F>(predicate: F) -> PermissionPredicate<S>
where
    S: Schema,
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
    Arc::new(predicate)
}

pub(crate) fn query_fn<S, F>(query: F) -> PermissionQuery<S>
where
    S: Schema,
    F: Fn(&S::User) -> Vec<S::Subject> + Send + Sync + 'static,
{
    Arc::new(query)
}

/// Grant of one action on one subject type, owned by a [`Role`](crate::Role).
pub struct Permission<S: Schema> {
    action: Action<S::Action>,
    subject_type: S::SubjectType,
    pub(crate) query: Option<PermissionQuery<S>>,
    pub(crate) predicate: Option<PermissionPredicate<S>>,
}

impl<S: Schema> Permission<S> {
    pub(crate) fn new(action: Action<S::Action>, subject_type: S::SubjectType) -> Self {
        Self {
            action,
            subject_type,
            query: None,
            predicate: None,
        }
    }

    /// The concrete action this permission grants.
    pub fn action(&self) -> &Action<S::Action> {
        &self.action
    }

    /// The subject type this permission applies to.
    pub fn subject_type(&self) -> &S::SubjectType {
        &self.subject_type
    }

    /// Whether `fetch` can list instances.
    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }

    /// Whether an instance-level predicate is installed.
    pub fn has_predicate(&self) -> bool {
        self.predicate.is_some()
    }

    /// Exact match on both action and subject type.
    pub fn matches(&self, action: &Action<S::Action>, subject_type: &S::SubjectType) -> bool {
        self.action == *action && self.subject_type == *subject_type
    }

    /// Asks the predicate whether `subject` is granted to `user`.
    ///
    /// Fails closed when no predicate is installed. `Role::grant` always
    /// installs one, so that branch is not expected to be taken.
    pub fn is_granted(
        &self,
        user: &S::User,
        action: &Action<S::Action>,
        subject_type: &S::SubjectType,
        subject: Option<&S::Subject>,
    ) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(user, subject, subject_type, action, self),
            None => false,
        }
    }

    /// Runs the query for `user`.
    ///
    /// `None` means this permission has no query, which is not the same as a
    /// query that found nothing.
    pub fn fetch(&self, user: &S::User) -> Option<Vec<S::Subject>> {
        self.query.as_ref().map(|query| query(user))
    }
}

impl<S: Schema> fmt::Debug for Permission<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Permission")
            .field("action", &self.action)
            .field("subject_type", &self.subject_type)
            .field("has_query", &self.has_query())
            .field("has_predicate", &self.has_predicate())
            .finish()
    }
}

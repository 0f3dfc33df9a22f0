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


//! Blog fixture shared by the integration suites: four roles over users and posts.

#![allow(dead_code)]

use papers_policy::{create_policy, Action, GrantOptions, Policy, Schema};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleName {
    Super,
    Admin,
    Member,
    Guest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    Archive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    User,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: u32,
    pub author: u32,
    pub archived: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u32,
    pub is_super: bool,
    pub is_admin: bool,
    pub is_member: bool,
    pub posts: Vec<Post>,
}

impl User {
    /// A user of the given role owning one live and one archived post.
    pub fn new(id: u32, role: RoleName) -> Self {
        Self {
            id,
            is_super: role == RoleName::Super,
            is_admin: role == RoleName::Admin,
            is_member: role == RoleName::Member,
            posts: vec![
                Post { id: id * 10 + 1, author: id, archived: false },
                Post { id: id * 10 + 2, author: id, archived: true },
            ],
        }
    }

    pub fn live_post(&self) -> Entity {
        Entity::Post(self.posts[0].clone())
    }

    pub fn archived_post(&self) -> Entity {
        Entity::Post(self.posts[1].clone())
    }

    pub fn as_subject(&self) -> Entity {
        Entity::User(self.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    User(User),
    Post(Post),
}

pub struct Blog;

impl Schema for Blog {
    type User = User;
    type RoleName = RoleName;
    type Action = PostAction;
    type SubjectType = Kind;
    type Subject = Entity;
}

pub type Grant = GrantOptions<Blog>;

pub const ARCHIVE: Action<PostAction> = Action::Custom(PostAction::Archive);

pub struct Users {
    pub super_user: User,
    pub admin: User,
    pub member: User,
    pub guest: User,
}

impl Users {
    pub fn new() -> Self {
        Self {
            super_user: User::new(1, RoleName::Super),
            admin: User::new(2, RoleName::Admin),
            member: User::new(3, RoleName::Member),
            guest: User::new(4, RoleName::Guest),
        }
    }

    pub fn all(&self) -> [&User; 4] {
        [&self.super_user, &self.admin, &self.member, &self.guest]
    }
}

fn is_self(user: &User, subject: Option<&Entity>) -> bool {
    matches!(subject, Some(Entity::User(other)) if other.id == user.id)
}

fn own_posts(user: &User) -> Vec<Entity> {
    user.posts.iter().cloned().map(Entity::Post).collect()
}

/// Builds the four-role blog policy. Roles are added from most to least privileged.
pub fn blog_policy() -> Policy<Blog> {
    let mut policy = create_policy::<Blog>();

    policy
        .add_role_with(RoleName::Super, |u: &User| u.is_super)
        .expect("super role");
    policy
        .add_role_with(RoleName::Admin, |u: &User| u.is_admin)
        .expect("admin role");
    policy
        .add_role_with(RoleName::Member, |u: &User| u.is_member)
        .expect("member role");
    policy.add_role(RoleName::Guest).expect("guest role");

    policy
        .permit([RoleName::Super], |role| {
            role.grant(Action::Crud, Kind::User, Grant::new())?;
            role.grant([Action::Crud, ARCHIVE], Kind::Post, Grant::new())
        })
        .expect("super grants");

    policy
        .permit([RoleName::Admin], |role| {
            role.grant([Action::Crud, ARCHIVE], Kind::Post, Grant::new())?;
            role.grant(
                Action::Read,
                Kind::User,
                Grant::new().predicate(|u, subject, _, _, _| is_self(u, subject)),
            )
        })
        .expect("admin grants");

    policy
        .permit([RoleName::Member], |role| {
            role.grant(
                Action::Read,
                Kind::User,
                Grant::new().predicate(|u, subject, _, _, _| is_self(u, subject)),
            )?;
            role.grant(
                Action::Read,
                Kind::Post,
                Grant::new().predicate(|u, subject, _, _, _| {
                    matches!(subject, Some(Entity::Post(p)) if p.author == u.id || !p.archived)
                }),
            )?;
            role.grant(Action::Update, Kind::Post, Grant::new().query(own_posts))?;
            role.grant(
                ARCHIVE,
                Kind::Post,
                Grant::new()
                    .query(|u| {
                        own_posts(u)
                            .into_iter()
                            .filter(|e| matches!(e, Entity::Post(p) if !p.archived))
                            .collect()
                    })
                    .predicate(|u, subject, _, _, _| {
                        matches!(subject, Some(Entity::Post(p)) if p.author == u.id && !p.archived)
                    }),
            )
        })
        .expect("member grants");

    policy
        .permit([RoleName::Guest], |role| {
            role.grant(
                Action::Read,
                Kind::Post,
                Grant::new().predicate(|_, subject, _, _, _| {
                    matches!(subject, Some(Entity::Post(p)) if !p.archived)
                }),
            )
        })
        .expect("guest grants");

    policy
}

/// Installs a test subscriber once; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

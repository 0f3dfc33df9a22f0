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

//! Core papers types shared by the policy engine and its hosts.
//!
//! This crate provides:
//! - The [`Action`] vocabulary with its `crud`/`rest` shorthands
//! - The [`Schema`] trait hosts implement to plug in their own types
//! - [`PolicyConfig`]
//! - [`PapersError`]

pub mod action;
pub mod config;
pub mod errors;
pub mod schema;

pub use action::{Action, IntoActions};
pub use config::PolicyConfig;
pub use errors::{PapersError, Result};
pub use schema::Schema;

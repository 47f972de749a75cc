// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite persistence for the forum server.
//!
//! Each concern has a store trait ([`UserStore`], [`PermissionStore`],
//! [`ContentStore`]) and a sqlx-backed repository implementing it. The
//! engine only ever sees the traits.

pub mod content;
pub mod error;
pub mod permission;
pub mod pool;
mod rows;
pub mod user;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use content::{
	ContentRepository, ContentStore, NewReply, NewTopic, SortOrder, TopicFilter, TopicPage,
	TopicStats,
};
pub use error::{DbError, Result};
pub use permission::{PermissionRepository, PermissionStore};
pub use pool::{create_pool, run_migrations};
pub use user::{NewUser, UserRepository, UserStore};

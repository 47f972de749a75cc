// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access control and content state for the forum server.
//!
//! Components, leaf to root:
//!
//! - [`TokenAuthority`]: accounts, login, token to [`Principal`](forum_server_auth::Principal)
//! - [`PermissionResolver`]: stored grant or the default level
//! - [`AccessGuard`]: read/write/admin decisions on a category
//! - [`ContentStateMachine`]: topic lock, best reply, votes
//! - [`ForumService`]: the token-taking operations built from the above

pub mod authority;
pub mod content;
pub mod error;
pub mod guard;
pub mod resolver;
pub mod service;
pub mod views;

pub use authority::TokenAuthority;
pub use content::ContentStateMachine;
pub use error::{ForumError, Result};
pub use guard::{AccessGuard, AccessSummary};
pub use resolver::{GrantSet, PermissionResolver};
pub use service::{ForumService, ForumStores};
pub use views::{ReplyView, TopicListing, TopicQuery, TopicView, TOPICS_PAGE_SIZE};

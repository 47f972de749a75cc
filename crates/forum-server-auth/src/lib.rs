// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity, tokens and category access policy for the forum server.
//!
//! This crate holds everything about *who* is asking and *what* they may do
//! that can be decided without touching storage:
//!
//! - [`types`]: ID newtypes, [`PermissionLevel`] and [`Principal`]
//! - [`model`]: categories, topics, replies and votes as loaded from storage
//! - [`user`]: user accounts and registration input validation
//! - [`password`]: Argon2id password hashing
//! - [`token`]: the [`TokenCodec`] seam and its HS256 JWT implementation
//! - [`abac`]: the pure category access policy ([`abac::is_allowed`])
//!
//! Looking up stored grants, users and content is the job of
//! `forum-server-db`; combining the two is the job of `forum-server-engine`.

pub mod abac;
mod argon2_config;
pub mod model;
pub mod password;
pub mod token;
pub mod types;
pub mod user;

pub use model::{Category, CategoryGrant, Reply, Topic, VoteValue};
pub use password::{hash_password, verify_password, PasswordError};
pub use token::{Claims, IssuedToken, JwtTokenCodec, TokenCodec, TokenError, TOKEN_TYPE};
pub use types::{
	CategoryId, InvalidPermissionLevel, PermissionLevel, Principal, ReplyId, TopicId, UserId,
};
pub use user::{
	validate_email, validate_password, validate_username, User, UserProfile, MIN_PASSWORD_LEN,
};

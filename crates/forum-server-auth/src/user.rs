// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User accounts and registration input rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Principal, UserId};

pub const MIN_PASSWORD_LEN: usize = 8;

/// A forum account as stored.
///
/// `password_hash` is an Argon2id PHC string and is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,
	pub username: String,
	pub email: String,
	#[serde(skip_serializing, default)]
	pub password_hash: String,
	pub is_admin: bool,
	pub created_at: DateTime<Utc>,
}

impl User {
	/// The identity this user acts as once authenticated.
	pub fn principal(&self) -> Principal {
		Principal {
			id: self.id,
			is_admin: self.is_admin,
		}
	}

	pub fn to_profile(&self) -> UserProfile {
		UserProfile {
			id: self.id,
			username: self.username.clone(),
			is_admin: self.is_admin,
			created_at: self.created_at,
		}
	}
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
	pub id: UserId,
	pub username: String,
	pub is_admin: bool,
	pub created_at: DateTime<Utc>,
}

/// Validates a username.
/// Rules:
/// - 3-39 characters
/// - Alphanumeric and underscores only
/// - Cannot start with underscore
/// - Cannot be all numeric
pub fn validate_username(username: &str) -> Result<(), &'static str> {
	if username.len() < 3 {
		return Err("Username must be at least 3 characters");
	}
	if username.len() > 39 {
		return Err("Username must be at most 39 characters");
	}
	if !username
		.chars()
		.all(|c| c.is_ascii_alphanumeric() || c == '_')
	{
		return Err("Username can only contain letters, numbers, and underscores");
	}
	if username.starts_with('_') {
		return Err("Username cannot start with underscore");
	}
	if username.chars().all(|c| c.is_ascii_digit()) {
		return Err("Username cannot be all numbers");
	}
	Ok(())
}

/// Minimal shape check; delivery is what actually proves an address.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
	match email.split_once('@') {
		Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
		_ => Err("Email must contain a local part and a domain"),
	}
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
	if password.chars().count() < MIN_PASSWORD_LEN {
		return Err("Password must be at least 8 characters");
	}
	Ok(())
}

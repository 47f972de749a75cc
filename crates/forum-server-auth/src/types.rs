// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for authentication and authorization.
//!
//! This module defines the foundational types used throughout the forum:
//!
//! - **ID newtypes**: Type-safe wrappers around the integer row ids of each
//!   entity ([`UserId`], [`CategoryId`], [`TopicId`], [`ReplyId`]) preventing
//!   accidental mixing
//! - **Permission levels**: The ordered per-category grant ([`PermissionLevel`])
//! - **Principal**: The authenticated identity of one request ([`Principal`])
//!
//! All ID types serialize transparently as integers.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(i64);

		impl $name {
			/// Create a new ID from a row id.
			pub const fn new(id: i64) -> Self {
				Self(id)
			}

			/// Get the inner row id.
			pub const fn get(self) -> i64 {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<i64> for $name {
			fn from(id: i64) -> Self {
				Self(id)
			}
		}

		impl From<$name> for i64 {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(CategoryId, "Unique identifier for a category.");
define_id_type!(TopicId, "Unique identifier for a topic.");
define_id_type!(ReplyId, "Unique identifier for a reply.");

// =============================================================================
// Permission Levels
// =============================================================================

/// Per-category access tier granted to a user.
///
/// The levels are totally ordered. For hidden categories a higher level
/// grants a superset of the capabilities of the lower ones; for public
/// categories they do not affect access at all.
///
/// Exchanged as the integers 0–3. Anything else is rejected when parsing,
/// so an out-of-range value can never reach a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum PermissionLevel {
	/// Explicit deny; overrides the default grant.
	NoAccess = 0,
	/// Baseline access every authenticated user holds without a grant.
	Normal = 1,
	/// May see hidden categories.
	Read = 2,
	/// May post in hidden categories.
	Write = 3,
}

/// Error returned when an integer outside 0–3 is offered as a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid permission level {0}: expected 0 (no access) to 3 (write)")]
pub struct InvalidPermissionLevel(pub i64);

impl PermissionLevel {
	/// Level held by a user who has no stored grant for a category.
	pub const DEFAULT: PermissionLevel = PermissionLevel::Normal;

	/// Returns all levels in ascending order.
	pub fn all() -> &'static [PermissionLevel] {
		&[
			PermissionLevel::NoAccess,
			PermissionLevel::Normal,
			PermissionLevel::Read,
			PermissionLevel::Write,
		]
	}

	/// Applies the default grant to the result of a grant lookup.
	///
	/// A missing row means [`PermissionLevel::DEFAULT`], never
	/// [`PermissionLevel::NoAccess`]; a stored `NoAccess` is returned as is.
	pub fn or_default_grant(stored: Option<PermissionLevel>) -> PermissionLevel {
		match stored {
			Some(level) => level,
			None => PermissionLevel::DEFAULT,
		}
	}

	pub fn as_i64(self) -> i64 {
		self as i64
	}
}

impl TryFrom<i64> for PermissionLevel {
	type Error = InvalidPermissionLevel;

	fn try_from(value: i64) -> Result<Self, Self::Error> {
		match value {
			0 => Ok(PermissionLevel::NoAccess),
			1 => Ok(PermissionLevel::Normal),
			2 => Ok(PermissionLevel::Read),
			3 => Ok(PermissionLevel::Write),
			other => Err(InvalidPermissionLevel(other)),
		}
	}
}

impl From<PermissionLevel> for i64 {
	fn from(level: PermissionLevel) -> Self {
		level.as_i64()
	}
}

impl fmt::Display for PermissionLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PermissionLevel::NoAccess => write!(f, "no_access"),
			PermissionLevel::Normal => write!(f, "normal"),
			PermissionLevel::Read => write!(f, "read"),
			PermissionLevel::Write => write!(f, "write"),
		}
	}
}

// =============================================================================
// Principal
// =============================================================================

/// The authenticated identity of a single operation.
///
/// Derived from a valid token on every request and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	pub id: UserId,
	pub is_admin: bool,
}

impl Principal {
	pub fn user(id: UserId) -> Self {
		Self {
			id,
			is_admin: false,
		}
	}

	pub fn admin(id: UserId) -> Self {
		Self { id, is_admin: true }
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Forum content as loaded from storage.
//!
//! Categories own topics and topics own replies. Visibility is decided on the
//! owning category only, so a topic or reply is readable exactly when its
//! category is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, PermissionLevel, ReplyId, TopicId, UserId};

/// A category of topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
	pub id: CategoryId,
	pub name: String,
	pub description: Option<String>,
	/// Hidden categories require an explicit `Read`/`Write` grant.
	pub hidden: bool,
	/// Locked categories accept no new topics.
	pub locked: bool,
	pub created_at: DateTime<Utc>,
}

/// An explicit permission grant for one user on one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGrant {
	pub category_id: CategoryId,
	pub user_id: UserId,
	pub level: PermissionLevel,
}

/// A topic inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
	pub id: TopicId,
	pub category_id: CategoryId,
	pub author_id: UserId,
	pub title: String,
	pub content: String,
	/// Once set, never cleared. Locked topics accept no new replies.
	pub locked: bool,
	pub created_at: DateTime<Utc>,
}

impl Topic {
	pub fn is_authored_by(&self, user_id: UserId) -> bool {
		self.author_id == user_id
	}
}

/// A reply to a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
	pub id: ReplyId,
	pub topic_id: TopicId,
	pub author_id: UserId,
	pub content: String,
	/// At most one reply per topic has this set.
	pub is_best: bool,
	pub created_at: DateTime<Utc>,
}

impl Reply {
	pub fn belongs_to(&self, topic_id: TopicId) -> bool {
		self.topic_id == topic_id
	}
}

/// A user's vote on a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", from = "i64")]
pub enum VoteValue {
	Down = -1,
	Neutral = 0,
	Up = 1,
}

impl VoteValue {
	/// Maps a raw vote to a value; anything other than -1 or 1 counts as
	/// neutral.
	pub fn coerce(raw: i64) -> Self {
		match raw {
			1 => VoteValue::Up,
			-1 => VoteValue::Down,
			_ => VoteValue::Neutral,
		}
	}

	pub fn as_i64(self) -> i64 {
		self as i64
	}
}

impl From<i64> for VoteValue {
	fn from(raw: i64) -> Self {
		VoteValue::coerce(raw)
	}
}

impl From<VoteValue> for i64 {
	fn from(value: VoteValue) -> Self {
		value.as_i64()
	}
}

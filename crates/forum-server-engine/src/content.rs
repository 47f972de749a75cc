// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! State transitions on topics and replies.
//!
//! - Topic lock: `open -> locked`, one way.
//! - Best reply: at most one per topic, moved only by the topic author.
//! - Votes: one per user per reply, last write wins; the score is always
//!   recomputed from the stored votes.
//!
//! Authorization against the owning category happens before these are
//! called. The checks here are the ones that belong to the state itself.

use std::sync::Arc;

use forum_server_auth::{Category, Principal, Reply, ReplyId, Topic, TopicId, VoteValue};
use forum_server_db::{ContentStore, DbError};
use tracing::instrument;

use crate::error::{ForumError, Result};

#[derive(Clone)]
pub struct ContentStateMachine {
	content: Arc<dyn ContentStore>,
}

impl ContentStateMachine {
	pub fn new(content: Arc<dyn ContentStore>) -> Self {
		Self { content }
	}

	/// Rejects new topics in a locked category.
	pub fn ensure_accepts_topics(&self, category: &Category) -> Result<()> {
		if category.locked {
			tracing::debug!(category_id = %category.id, "category locked");
			return Err(ForumError::CategoryLocked);
		}
		Ok(())
	}

	/// Rejects new replies on a locked topic.
	pub fn ensure_accepts_replies(&self, topic: &Topic) -> Result<()> {
		if topic.locked {
			tracing::debug!(topic_id = %topic.id, "topic locked");
			return Err(ForumError::TopicLocked);
		}
		Ok(())
	}

	/// Locks a topic. Locking a locked topic succeeds without a write.
	#[instrument(skip(self), fields(topic_id = %topic_id))]
	pub async fn lock_topic(&self, topic_id: TopicId) -> Result<Topic> {
		let mut topic = self
			.content
			.get_topic(topic_id)
			.await?
			.ok_or(ForumError::TopicNotFound)?;

		if topic.locked {
			return Ok(topic);
		}

		if !self.content.set_topic_locked(topic_id).await? {
			return Err(ForumError::TopicNotFound);
		}
		topic.locked = true;
		Ok(topic)
	}

	/// Marks `reply_id` as the best reply of `topic_id`, unmarking any other.
	///
	/// # Errors
	/// - `TopicNotFound` if the topic does not exist
	/// - `ReplyNotAccessible` if `principal` did not author the topic
	/// - `ReplyNotFound` if the reply does not exist
	/// - `ReplyNotAccessible` if the reply belongs to another topic
	#[instrument(skip(self, principal), fields(user_id = %principal.id, topic_id = %topic_id, reply_id = %reply_id))]
	pub async fn select_best_reply(
		&self,
		principal: &Principal,
		topic_id: TopicId,
		reply_id: ReplyId,
	) -> Result<Reply> {
		let topic = self
			.content
			.get_topic(topic_id)
			.await?
			.ok_or(ForumError::TopicNotFound)?;

		if !topic.is_authored_by(principal.id) {
			tracing::debug!(author_id = %topic.author_id, "best reply by non-author");
			return Err(ForumError::ReplyNotAccessible);
		}

		let mut reply = self
			.content
			.get_reply(reply_id)
			.await?
			.ok_or(ForumError::ReplyNotFound)?;

		if !reply.belongs_to(topic_id) {
			tracing::debug!(reply_topic_id = %reply.topic_id, "best reply from another topic");
			return Err(ForumError::ReplyNotAccessible);
		}

		match self.content.select_best_reply(topic_id, reply_id).await {
			Ok(()) => {}
			// The conditional set matched nothing; the store rolled back.
			Err(DbError::NotFound(_)) => return Err(ForumError::ReplyNotAccessible),
			Err(e) => return Err(e.into()),
		}

		reply.is_best = true;
		Ok(reply)
	}

	/// Records `principal`'s vote on `reply` and returns the new score.
	///
	/// Values other than -1 and 1 are recorded as 0.
	#[instrument(skip(self, principal, reply), fields(user_id = %principal.id, reply_id = %reply.id))]
	pub async fn set_vote(&self, principal: &Principal, reply: &Reply, raw_value: i64) -> Result<i64> {
		let value = VoteValue::coerce(raw_value);
		self.content.upsert_vote(reply.id, principal.id, value).await?;
		self.score(reply.id).await
	}

	pub async fn score(&self, reply_id: ReplyId) -> Result<i64> {
		Ok(self.content.sum_votes(reply_id).await?)
	}
}

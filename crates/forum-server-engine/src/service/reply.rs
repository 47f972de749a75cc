// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::HashMap;

use forum_server_auth::{Reply, ReplyId, TopicId};
use forum_server_db::NewReply;
use tracing::instrument;

use super::{require_text, ForumService};
use crate::error::Result;
use crate::views::ReplyView;

impl ForumService {
	/// Replies to a topic.
	///
	/// # Errors
	/// `TopicNotFound`, then `TopicLocked` (before any grant is consulted),
	/// then `CategoryNotFound` or `AccessDenied` without write access.
	#[instrument(skip(self, token, content), fields(topic_id = %topic_id))]
	pub async fn create_reply(&self, token: &str, topic_id: TopicId, content: &str) -> Result<Reply> {
		let principal = self.authority.resolve(token).await?;
		let topic = self.load_topic(topic_id).await?;
		self.state.ensure_accepts_replies(&topic)?;

		let category = self.load_category(topic.category_id).await?;
		self.guard.require_write(&category, &principal).await?;

		let content = require_text("content", content, None)?;
		Ok(self
			.stores
			.content
			.create_reply(&NewReply {
				topic_id,
				author_id: principal.id,
				content,
			})
			.await?)
	}

	#[instrument(skip(self, token), fields(reply_id = %reply_id))]
	pub async fn get_reply(&self, token: &str, reply_id: ReplyId) -> Result<ReplyView> {
		let principal = self.authority.resolve(token).await?;
		let reply = self.readable_reply(&principal, reply_id).await?;
		let score = self.state.score(reply_id).await?;
		Ok(ReplyView { reply, score })
	}

	/// Replies of a readable topic, oldest first, with their scores.
	#[instrument(skip(self, token), fields(topic_id = %topic_id))]
	pub async fn list_replies(&self, token: &str, topic_id: TopicId) -> Result<Vec<ReplyView>> {
		let principal = self.authority.resolve(token).await?;
		self.readable_topic(&principal, topic_id).await?;

		let replies = self.stores.content.list_replies(topic_id).await?;
		let scores: HashMap<ReplyId, i64> = self
			.stores
			.content
			.sum_votes_for_topic(topic_id)
			.await?
			.into_iter()
			.collect();

		Ok(replies
			.into_iter()
			.map(|reply| {
				let score = scores.get(&reply.id).copied().unwrap_or(0);
				ReplyView { reply, score }
			})
			.collect())
	}

	/// Records the caller's vote on a reply they can read and returns the
	/// reply's new score.
	#[instrument(skip(self, token), fields(reply_id = %reply_id))]
	pub async fn vote(&self, token: &str, reply_id: ReplyId, value: i64) -> Result<i64> {
		let principal = self.authority.resolve(token).await?;
		let reply = self.readable_reply(&principal, reply_id).await?;
		self.state.set_vote(&principal, &reply, value).await
	}

	/// Marks a reply as the best answer to its topic. Only the topic author
	/// may do this.
	#[instrument(skip(self, token), fields(topic_id = %topic_id, reply_id = %reply_id))]
	pub async fn select_best_reply(
		&self,
		token: &str,
		topic_id: TopicId,
		reply_id: ReplyId,
	) -> Result<Reply> {
		let principal = self.authority.resolve(token).await?;
		self.state
			.select_best_reply(&principal, topic_id, reply_id)
			.await
	}
}

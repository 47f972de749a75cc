// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Categories, topics, replies and votes.
//!
//! Every mutation here is a single statement or a single transaction, so a
//! failure never leaves a transition half applied.

mod category;
mod reply;
mod topic;

use async_trait::async_trait;
use forum_server_auth::{
	Category, CategoryId, Reply, ReplyId, Topic, TopicId, UserId, VoteValue,
};
use sqlx::sqlite::SqlitePool;

use crate::error::DbError;

pub use reply::NewReply;
pub use topic::{NewTopic, SortOrder, TopicFilter, TopicPage, TopicStats};

#[async_trait]
pub trait ContentStore: Send + Sync {
	// Categories
	async fn create_category(
		&self,
		name: &str,
		description: Option<&str>,
	) -> Result<Category, DbError>;
	async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, DbError>;
	async fn list_categories(&self) -> Result<Vec<Category>, DbError>;
	/// Returns false when the category does not exist.
	async fn set_category_hidden(&self, id: CategoryId, hidden: bool) -> Result<bool, DbError>;
	/// Returns false when the category does not exist.
	async fn set_category_locked(&self, id: CategoryId, locked: bool) -> Result<bool, DbError>;

	// Topics
	async fn create_topic(&self, topic: &NewTopic) -> Result<Topic, DbError>;
	async fn get_topic(&self, id: TopicId) -> Result<Option<Topic>, DbError>;
	async fn list_topics_in_category(&self, category_id: CategoryId) -> Result<Vec<Topic>, DbError>;
	async fn search_topics(&self, filter: &TopicFilter) -> Result<TopicPage, DbError>;
	/// Sets the lock flag. Returns false when the topic does not exist.
	async fn set_topic_locked(&self, id: TopicId) -> Result<bool, DbError>;
	async fn topic_stats(&self, id: TopicId) -> Result<TopicStats, DbError>;

	// Replies
	async fn create_reply(&self, reply: &NewReply) -> Result<Reply, DbError>;
	async fn get_reply(&self, id: ReplyId) -> Result<Option<Reply>, DbError>;
	async fn list_replies(&self, topic_id: TopicId) -> Result<Vec<Reply>, DbError>;
	/// Clears the current best reply of `topic_id` and marks `reply_id`, as
	/// one transaction.
	async fn select_best_reply(&self, topic_id: TopicId, reply_id: ReplyId) -> Result<(), DbError>;

	// Votes
	async fn upsert_vote(
		&self,
		reply_id: ReplyId,
		user_id: UserId,
		value: VoteValue,
	) -> Result<(), DbError>;
	async fn sum_votes(&self, reply_id: ReplyId) -> Result<i64, DbError>;
	/// Scores of every reply in a topic that has at least one vote.
	async fn sum_votes_for_topic(&self, topic_id: TopicId) -> Result<Vec<(ReplyId, i64)>, DbError>;
}

/// Repository for forum content.
#[derive(Clone)]
pub struct ContentRepository {
	pool: SqlitePool,
}

impl ContentRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}
}

#[async_trait]
impl ContentStore for ContentRepository {
	async fn create_category(
		&self,
		name: &str,
		description: Option<&str>,
	) -> Result<Category, DbError> {
		self.create_category(name, description).await
	}

	async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, DbError> {
		self.get_category(id).await
	}

	async fn list_categories(&self) -> Result<Vec<Category>, DbError> {
		self.list_categories().await
	}

	async fn set_category_hidden(&self, id: CategoryId, hidden: bool) -> Result<bool, DbError> {
		self.set_category_hidden(id, hidden).await
	}

	async fn set_category_locked(&self, id: CategoryId, locked: bool) -> Result<bool, DbError> {
		self.set_category_locked(id, locked).await
	}

	async fn create_topic(&self, topic: &NewTopic) -> Result<Topic, DbError> {
		self.create_topic(topic).await
	}

	async fn get_topic(&self, id: TopicId) -> Result<Option<Topic>, DbError> {
		self.get_topic(id).await
	}

	async fn list_topics_in_category(&self, category_id: CategoryId) -> Result<Vec<Topic>, DbError> {
		self.list_topics_in_category(category_id).await
	}

	async fn search_topics(&self, filter: &TopicFilter) -> Result<TopicPage, DbError> {
		self.search_topics(filter).await
	}

	async fn set_topic_locked(&self, id: TopicId) -> Result<bool, DbError> {
		self.set_topic_locked(id).await
	}

	async fn topic_stats(&self, id: TopicId) -> Result<TopicStats, DbError> {
		self.topic_stats(id).await
	}

	async fn create_reply(&self, reply: &NewReply) -> Result<Reply, DbError> {
		self.create_reply(reply).await
	}

	async fn get_reply(&self, id: ReplyId) -> Result<Option<Reply>, DbError> {
		self.get_reply(id).await
	}

	async fn list_replies(&self, topic_id: TopicId) -> Result<Vec<Reply>, DbError> {
		self.list_replies(topic_id).await
	}

	async fn select_best_reply(&self, topic_id: TopicId, reply_id: ReplyId) -> Result<(), DbError> {
		self.select_best_reply(topic_id, reply_id).await
	}

	async fn upsert_vote(
		&self,
		reply_id: ReplyId,
		user_id: UserId,
		value: VoteValue,
	) -> Result<(), DbError> {
		self.upsert_vote(reply_id, user_id, value).await
	}

	async fn sum_votes(&self, reply_id: ReplyId) -> Result<i64, DbError> {
		self.sum_votes(reply_id).await
	}

	async fn sum_votes_for_topic(&self, topic_id: TopicId) -> Result<Vec<(ReplyId, i64)>, DbError> {
		self.sum_votes_for_topic(topic_id).await
	}
}

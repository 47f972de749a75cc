// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::Utc;
use forum_server_auth::{Reply, ReplyId, TopicId, UserId, VoteValue};
use sqlx::Row;

use super::ContentRepository;
use crate::error::DbError;
use crate::rows::parse_timestamp;

/// Fields needed to create a reply.
#[derive(Debug, Clone)]
pub struct NewReply {
	pub topic_id: TopicId,
	pub author_id: UserId,
	pub content: String,
}

impl ContentRepository {
	#[tracing::instrument(skip(self, reply), fields(topic_id = %reply.topic_id, author_id = %reply.author_id))]
	pub async fn create_reply(&self, reply: &NewReply) -> Result<Reply, DbError> {
		let created_at = Utc::now();
		let result = sqlx::query(
			r#"
			INSERT INTO replies (topic_id, author_id, content, is_best, created_at)
			VALUES (?, ?, ?, 0, ?)
			"#,
		)
		.bind(reply.topic_id.get())
		.bind(reply.author_id.get())
		.bind(&reply.content)
		.bind(created_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		let id = ReplyId::new(result.last_insert_rowid());
		tracing::info!(reply_id = %id, topic_id = %reply.topic_id, "reply created");

		Ok(Reply {
			id,
			topic_id: reply.topic_id,
			author_id: reply.author_id,
			content: reply.content.clone(),
			is_best: false,
			created_at,
		})
	}

	#[tracing::instrument(skip(self), fields(reply_id = %id))]
	pub async fn get_reply(&self, id: ReplyId) -> Result<Option<Reply>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, topic_id, author_id, content, is_best, created_at
			FROM replies
			WHERE id = ?
			"#,
		)
		.bind(id.get())
		.fetch_optional(&self.pool)
		.await?;

		row.as_ref().map(parse_reply_row).transpose()
	}

	/// Replies of one topic, oldest first.
	#[tracing::instrument(skip(self), fields(topic_id = %topic_id))]
	pub async fn list_replies(&self, topic_id: TopicId) -> Result<Vec<Reply>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, topic_id, author_id, content, is_best, created_at
			FROM replies
			WHERE topic_id = ?
			ORDER BY id ASC
			"#,
		)
		.bind(topic_id.get())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(parse_reply_row).collect()
	}

	/// Moves the best-reply mark of a topic to `reply_id`.
	///
	/// Clearing the old mark and setting the new one happen in one
	/// transaction. The set is conditional on the reply belonging to the
	/// topic; if it matches no row the transaction is rolled back and the
	/// previous best reply stays marked.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if `reply_id` is not a reply of `topic_id`.
	#[tracing::instrument(skip(self), fields(topic_id = %topic_id, reply_id = %reply_id))]
	pub async fn select_best_reply(&self, topic_id: TopicId, reply_id: ReplyId) -> Result<(), DbError> {
		let mut tx = self.pool.begin().await?;

		sqlx::query("UPDATE replies SET is_best = 0 WHERE topic_id = ? AND is_best = 1")
			.bind(topic_id.get())
			.execute(&mut *tx)
			.await?;

		let result = sqlx::query("UPDATE replies SET is_best = 1 WHERE id = ? AND topic_id = ?")
			.bind(reply_id.get())
			.bind(topic_id.get())
			.execute(&mut *tx)
			.await?;

		if result.rows_affected() != 1 {
			tx.rollback().await?;
			return Err(DbError::NotFound(format!(
				"reply {reply_id} in topic {topic_id}"
			)));
		}

		tx.commit().await?;
		tracing::info!(%topic_id, %reply_id, "best reply selected");
		Ok(())
	}

	/// Records a user's vote, replacing any earlier vote by the same user.
	#[tracing::instrument(skip(self), fields(reply_id = %reply_id, user_id = %user_id, value = value.as_i64()))]
	pub async fn upsert_vote(
		&self,
		reply_id: ReplyId,
		user_id: UserId,
		value: VoteValue,
	) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO votes (reply_id, user_id, value)
			VALUES (?, ?, ?)
			ON CONFLICT (reply_id, user_id) DO UPDATE SET value = excluded.value
			"#,
		)
		.bind(reply_id.get())
		.bind(user_id.get())
		.bind(value.as_i64())
		.execute(&self.pool)
		.await?;

		tracing::debug!(%reply_id, %user_id, "vote recorded");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(reply_id = %reply_id))]
	pub async fn sum_votes(&self, reply_id: ReplyId) -> Result<i64, DbError> {
		let score: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(value), 0) FROM votes WHERE reply_id = ?")
			.bind(reply_id.get())
			.fetch_one(&self.pool)
			.await?;
		Ok(score)
	}

	#[tracing::instrument(skip(self), fields(topic_id = %topic_id))]
	pub async fn sum_votes_for_topic(&self, topic_id: TopicId) -> Result<Vec<(ReplyId, i64)>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT v.reply_id AS reply_id, SUM(v.value) AS score
			FROM votes v
			JOIN replies r ON r.id = v.reply_id
			WHERE r.topic_id = ?
			GROUP BY v.reply_id
			ORDER BY v.reply_id ASC
			"#,
		)
		.bind(topic_id.get())
		.fetch_all(&self.pool)
		.await?;

		Ok(rows
			.iter()
			.map(|row| {
				let score: i64 = row.get("score");
				(ReplyId::new(row.get("reply_id")), score)
			})
			.collect())
	}
}

fn parse_reply_row(row: &sqlx::sqlite::SqliteRow) -> Result<Reply, DbError> {
	let is_best: i64 = row.get("is_best");
	let created_at: String = row.get("created_at");

	Ok(Reply {
		id: ReplyId::new(row.get("id")),
		topic_id: TopicId::new(row.get("topic_id")),
		author_id: UserId::new(row.get("author_id")),
		content: row.get("content"),
		is_best: is_best != 0,
		created_at: parse_timestamp("created_at", &created_at)?,
	})
}

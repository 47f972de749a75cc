// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::Utc;
use forum_server_auth::{CategoryId, ReplyId, Topic, TopicId, UserId};
use sqlx::{QueryBuilder, Row, Sqlite};

use super::ContentRepository;
use crate::error::DbError;
use crate::rows::parse_timestamp;

/// Fields needed to create a topic.
#[derive(Debug, Clone)]
pub struct NewTopic {
	pub category_id: CategoryId,
	pub author_id: UserId,
	pub title: String,
	pub content: String,
}

/// Ordering of topic listings by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
	Asc,
	#[default]
	Desc,
}

/// A filtered, paginated topic listing.
#[derive(Debug, Clone, Default)]
pub struct TopicFilter {
	/// Case-insensitive substring of the title.
	pub search: Option<String>,
	pub sort: SortOrder,
	pub limit: i64,
	pub offset: i64,
	/// Restrict to these categories. `None` means all categories.
	pub category_ids: Option<Vec<CategoryId>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPage {
	pub topics: Vec<Topic>,
	/// Matching topics across all pages.
	pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopicStats {
	pub reply_count: i64,
	pub best_reply_id: Option<ReplyId>,
}

impl ContentRepository {
	#[tracing::instrument(skip(self, topic), fields(category_id = %topic.category_id, author_id = %topic.author_id))]
	pub async fn create_topic(&self, topic: &NewTopic) -> Result<Topic, DbError> {
		let created_at = Utc::now();
		let result = sqlx::query(
			r#"
			INSERT INTO topics (category_id, author_id, title, content, locked, created_at)
			VALUES (?, ?, ?, ?, 0, ?)
			"#,
		)
		.bind(topic.category_id.get())
		.bind(topic.author_id.get())
		.bind(&topic.title)
		.bind(&topic.content)
		.bind(created_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		let id = TopicId::new(result.last_insert_rowid());
		tracing::info!(topic_id = %id, category_id = %topic.category_id, "topic created");

		Ok(Topic {
			id,
			category_id: topic.category_id,
			author_id: topic.author_id,
			title: topic.title.clone(),
			content: topic.content.clone(),
			locked: false,
			created_at,
		})
	}

	#[tracing::instrument(skip(self), fields(topic_id = %id))]
	pub async fn get_topic(&self, id: TopicId) -> Result<Option<Topic>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, category_id, author_id, title, content, locked, created_at
			FROM topics
			WHERE id = ?
			"#,
		)
		.bind(id.get())
		.fetch_optional(&self.pool)
		.await?;

		row.as_ref().map(parse_topic_row).transpose()
	}

	/// Topics of one category, newest first.
	#[tracing::instrument(skip(self), fields(category_id = %category_id))]
	pub async fn list_topics_in_category(
		&self,
		category_id: CategoryId,
	) -> Result<Vec<Topic>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, category_id, author_id, title, content, locked, created_at
			FROM topics
			WHERE category_id = ?
			ORDER BY id DESC
			"#,
		)
		.bind(category_id.get())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(parse_topic_row).collect()
	}

	#[tracing::instrument(skip(self, filter), fields(search = ?filter.search, sort = ?filter.sort, offset = filter.offset))]
	pub async fn search_topics(&self, filter: &TopicFilter) -> Result<TopicPage, DbError> {
		if matches!(filter.category_ids, Some(ref ids) if ids.is_empty()) {
			return Ok(TopicPage {
				topics: Vec::new(),
				total: 0,
			});
		}

		let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM topics");
		push_filter(&mut count, filter);
		let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

		let mut select = QueryBuilder::<Sqlite>::new(
			"SELECT id, category_id, author_id, title, content, locked, created_at FROM topics",
		);
		push_filter(&mut select, filter);
		select.push(match filter.sort {
			SortOrder::Asc => " ORDER BY id ASC",
			SortOrder::Desc => " ORDER BY id DESC",
		});
		select.push(" LIMIT ").push_bind(filter.limit);
		select.push(" OFFSET ").push_bind(filter.offset);

		let rows = select.build().fetch_all(&self.pool).await?;
		let topics = rows
			.iter()
			.map(parse_topic_row)
			.collect::<Result<Vec<_>, _>>()?;

		Ok(TopicPage { topics, total })
	}

	/// One-way: there is no statement that clears the flag.
	#[tracing::instrument(skip(self), fields(topic_id = %id))]
	pub async fn set_topic_locked(&self, id: TopicId) -> Result<bool, DbError> {
		let result = sqlx::query("UPDATE topics SET locked = 1 WHERE id = ?")
			.bind(id.get())
			.execute(&self.pool)
			.await?;

		let found = result.rows_affected() > 0;
		if found {
			tracing::info!(topic_id = %id, "topic locked");
		}
		Ok(found)
	}

	#[tracing::instrument(skip(self), fields(topic_id = %id))]
	pub async fn topic_stats(&self, id: TopicId) -> Result<TopicStats, DbError> {
		let row = sqlx::query(
			r#"
			SELECT
				COUNT(*) AS reply_count,
				MAX(CASE WHEN is_best = 1 THEN id END) AS best_reply_id
			FROM replies
			WHERE topic_id = ?
			"#,
		)
		.bind(id.get())
		.fetch_one(&self.pool)
		.await?;

		let best: Option<i64> = row.get("best_reply_id");
		Ok(TopicStats {
			reply_count: row.get("reply_count"),
			best_reply_id: best.map(ReplyId::new),
		})
	}
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &TopicFilter) {
	builder.push(" WHERE 1 = 1");

	if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
		builder
			.push(" AND title LIKE ")
			.push_bind(format!("%{}%", escape_like(search)))
			.push(" ESCAPE '\\'");
	}

	if let Some(ids) = &filter.category_ids {
		builder.push(" AND category_id IN (");
		let mut separated = builder.separated(", ");
		for id in ids {
			separated.push_bind(id.get());
		}
		separated.push_unseparated(")");
	}
}

fn escape_like(raw: &str) -> String {
	let mut escaped = String::with_capacity(raw.len());
	for c in raw.chars() {
		if matches!(c, '%' | '_' | '\\') {
			escaped.push('\\');
		}
		escaped.push(c);
	}
	escaped
}

pub(super) fn parse_topic_row(row: &sqlx::sqlite::SqliteRow) -> Result<Topic, DbError> {
	let locked: i64 = row.get("locked");
	let created_at: String = row.get("created_at");

	Ok(Topic {
		id: TopicId::new(row.get("id")),
		category_id: CategoryId::new(row.get("category_id")),
		author_id: UserId::new(row.get("author_id")),
		title: row.get("title"),
		content: row.get("content"),
		locked: locked != 0,
		created_at: parse_timestamp("created_at", &created_at)?,
	})
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use forum_server_auth::{CategoryId, Topic, TopicId};
use forum_server_db::{NewTopic, TopicFilter};
use tracing::instrument;

use super::{require_text, ForumService};
use crate::error::Result;
use crate::views::{TopicListing, TopicQuery, TopicView, MAX_TITLE_LEN, TOPICS_PAGE_SIZE};

impl ForumService {
	/// Opens a topic in a category.
	///
	/// # Errors
	/// `CategoryNotFound`, then `AccessDenied` without write access, then
	/// `CategoryLocked` if the category is locked.
	#[instrument(skip(self, token, title, content), fields(category_id = %category_id))]
	pub async fn create_topic(
		&self,
		token: &str,
		category_id: CategoryId,
		title: &str,
		content: &str,
	) -> Result<Topic> {
		let principal = self.authority.resolve(token).await?;
		let category = self.load_category(category_id).await?;
		self.guard.require_write(&category, &principal).await?;
		self.state.ensure_accepts_topics(&category)?;

		let title = require_text("title", title, Some(MAX_TITLE_LEN))?;
		let content = require_text("content", content, None)?;

		Ok(self
			.stores
			.content
			.create_topic(&NewTopic {
				category_id,
				author_id: principal.id,
				title,
				content,
			})
			.await?)
	}

	#[instrument(skip(self, token), fields(topic_id = %topic_id))]
	pub async fn get_topic(&self, token: &str, topic_id: TopicId) -> Result<TopicView> {
		let principal = self.authority.resolve(token).await?;
		let (topic, category) = self.readable_topic(&principal, topic_id).await?;

		let stats = self.stores.content.topic_stats(topic_id).await?;
		let author_username = self
			.stores
			.users
			.get_user_by_id(topic.author_id)
			.await?
			.map(|user| user.username)
			.unwrap_or_default();

		Ok(TopicView {
			topic,
			category_name: category.name,
			author_username,
			reply_count: stats.reply_count,
			best_reply_id: stats.best_reply_id,
		})
	}

	/// Searches topics across every category the caller can read.
	#[instrument(skip(self, token, query), fields(page = query.page))]
	pub async fn list_topics(&self, token: &str, query: &TopicQuery) -> Result<TopicListing> {
		let principal = self.authority.resolve(token).await?;

		let category_ids = if principal.is_admin {
			None
		} else {
			let categories = self.stores.content.list_categories().await?;
			let readable = self.guard.readable(&principal, categories).await?;
			Some(readable.into_iter().map(|c| c.id).collect())
		};

		let page = self
			.stores
			.content
			.search_topics(&TopicFilter {
				search: query.search_term(),
				sort: query.sort_order(),
				limit: TOPICS_PAGE_SIZE,
				offset: query.offset(),
				category_ids,
			})
			.await?;

		Ok(TopicListing::new(page.total, page.topics))
	}

	/// Locks a topic against new replies. Admin only; there is no unlock.
	#[instrument(skip(self, token), fields(topic_id = %topic_id))]
	pub async fn lock_topic(&self, token: &str, topic_id: TopicId) -> Result<Topic> {
		let admin = self.authority.resolve_admin(token).await?;
		let topic = self.state.lock_topic(topic_id).await?;
		tracing::info!(admin_id = %admin.id, %topic_id, "topic lock requested");
		Ok(topic)
	}
}

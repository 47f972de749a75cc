// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Query inputs and response shapes of the forum service.

use forum_server_auth::{Reply, ReplyId, Topic};
use forum_server_db::SortOrder;
use serde::{Deserialize, Serialize};

pub const TOPICS_PAGE_SIZE: i64 = 10;
pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_CATEGORY_NAME_LEN: usize = 100;

/// Parameters of a topic listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TopicQuery {
	/// Case-insensitive substring of the title; `+` stands for a space.
	pub search: Option<String>,
	/// `asc` or `desc` by id. Anything else sorts descending.
	pub sort: Option<String>,
	/// Zero-based page number.
	#[serde(default)]
	pub page: u32,
}

impl TopicQuery {
	pub fn search_term(&self) -> Option<String> {
		let term = self.search.as_deref()?.replace('+', " ");
		let term = term.trim();
		(!term.is_empty()).then(|| term.to_string())
	}

	pub fn sort_order(&self) -> SortOrder {
		match self.sort.as_deref() {
			Some(sort) if sort.eq_ignore_ascii_case("asc") => SortOrder::Asc,
			_ => SortOrder::Desc,
		}
	}

	pub fn offset(&self) -> i64 {
		i64::from(self.page) * TOPICS_PAGE_SIZE
	}
}

/// One page of topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicListing {
	/// `total / page size + 1`, so an exact multiple reports one empty
	/// trailing page.
	pub pages: i64,
	pub topics: Vec<Topic>,
}

impl TopicListing {
	pub fn new(total: i64, topics: Vec<Topic>) -> Self {
		Self {
			pages: total / TOPICS_PAGE_SIZE + 1,
			topics,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicView {
	#[serde(flatten)]
	pub topic: Topic,
	pub category_name: String,
	pub author_username: String,
	pub reply_count: i64,
	pub best_reply_id: Option<ReplyId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyView {
	#[serde(flatten)]
	pub reply: Reply,
	pub score: i64,
}

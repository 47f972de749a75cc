// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Type definitions for ABAC policy evaluation.

use serde::{Deserialize, Serialize};

use crate::model::Category;
use crate::types::CategoryId;

/// Operations that can be attempted against a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
	/// See the category, its topics and replies; vote.
	Read,
	/// Create topics and replies.
	Write,
	/// Change category flags or grants, lock topics, list users.
	Administer,
}

/// Attributes of a category relevant to an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryAttrs {
	pub category_id: CategoryId,
	pub hidden: bool,
}

impl CategoryAttrs {
	pub fn new(category_id: CategoryId, hidden: bool) -> Self {
		Self {
			category_id,
			hidden,
		}
	}
}

impl From<&Category> for CategoryAttrs {
	fn from(category: &Category) -> Self {
		Self::new(category.id, category.hidden)
	}
}

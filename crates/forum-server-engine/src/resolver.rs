// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Effective permission levels.
//!
//! The resolver only knows about stored grants. Whether a category is hidden
//! does not enter into it; interpreting the level is the guard's job.

use std::collections::HashMap;
use std::sync::Arc;

use forum_server_auth::{CategoryId, PermissionLevel, UserId};
use forum_server_db::PermissionStore;
use tracing::instrument;

use crate::error::Result;

#[derive(Clone)]
pub struct PermissionResolver {
	permissions: Arc<dyn PermissionStore>,
}

impl PermissionResolver {
	pub fn new(permissions: Arc<dyn PermissionStore>) -> Self {
		Self { permissions }
	}

	/// The stored grant for `(category_id, user_id)`, or
	/// [`PermissionLevel::DEFAULT`] when there is none.
	#[instrument(skip(self), fields(category_id = %category_id, user_id = %user_id))]
	pub async fn effective_level(
		&self,
		category_id: CategoryId,
		user_id: UserId,
	) -> Result<PermissionLevel> {
		let stored = self.permissions.get_permission(category_id, user_id).await?;
		let level = PermissionLevel::or_default_grant(stored);
		tracing::debug!(explicit = stored.is_some(), %level, "effective level resolved");
		Ok(level)
	}

	/// All explicit grants of `user_id`, loaded in one query.
	#[instrument(skip(self), fields(user_id = %user_id))]
	pub async fn grants_for(&self, user_id: UserId) -> Result<GrantSet> {
		let grants = self.permissions.list_grants_for_user(user_id).await?;
		Ok(GrantSet {
			levels: grants
				.into_iter()
				.map(|grant| (grant.category_id, grant.level))
				.collect(),
		})
	}
}

/// A user's explicit grants, for deciding on many categories at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantSet {
	levels: HashMap<CategoryId, PermissionLevel>,
}

impl GrantSet {
	/// Same rule as [`PermissionResolver::effective_level`].
	pub fn level_for(&self, category_id: CategoryId) -> PermissionLevel {
		PermissionLevel::or_default_grant(self.levels.get(&category_id).copied())
	}

	pub fn len(&self) -> usize {
		self.levels.len()
	}

	pub fn is_empty(&self) -> bool {
		self.levels.is_empty()
	}
}

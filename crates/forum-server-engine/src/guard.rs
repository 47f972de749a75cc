// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Read and write checks on categories.
//!
//! The guard loads whatever the policy needs and asks
//! [`abac::is_allowed`]. The stored grant is only fetched when the decision
//! depends on it, so public categories and admins cost no lookup.
//! Topics and replies are checked through their owning category.

use forum_server_auth::abac::{self, Action, CategoryAttrs};
use forum_server_auth::{Category, PermissionLevel, Principal};
use serde::Serialize;

use crate::error::{ForumError, Result};
use crate::resolver::{GrantSet, PermissionResolver};

/// What a principal may do in one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessSummary {
	pub level: PermissionLevel,
	pub can_read: bool,
	pub can_write: bool,
}

#[derive(Clone)]
pub struct AccessGuard {
	resolver: PermissionResolver,
}

impl AccessGuard {
	pub fn new(resolver: PermissionResolver) -> Self {
		Self { resolver }
	}

	pub fn resolver(&self) -> &PermissionResolver {
		&self.resolver
	}

	pub async fn can_read(&self, category: &Category, principal: &Principal) -> Result<bool> {
		self.decide(principal, Action::Read, category).await
	}

	pub async fn can_write(&self, category: &Category, principal: &Principal) -> Result<bool> {
		self.decide(principal, Action::Write, category).await
	}

	pub async fn require_read(&self, category: &Category, principal: &Principal) -> Result<()> {
		if self.can_read(category, principal).await? {
			Ok(())
		} else {
			Err(ForumError::AccessDenied)
		}
	}

	pub async fn require_write(&self, category: &Category, principal: &Principal) -> Result<()> {
		if self.can_write(category, principal).await? {
			Ok(())
		} else {
			Err(ForumError::AccessDenied)
		}
	}

	/// Category administration is for admins only, whatever the grants say.
	pub fn require_admin(&self, principal: &Principal) -> Result<()> {
		if principal.is_admin {
			Ok(())
		} else {
			tracing::debug!(user_id = %principal.id, "administration denied");
			Err(ForumError::AccessDenied)
		}
	}

	/// Keeps the categories `principal` may read, using one grant query.
	pub async fn readable(
		&self,
		principal: &Principal,
		categories: Vec<Category>,
	) -> Result<Vec<Category>> {
		if principal.is_admin {
			return Ok(categories);
		}

		let grants = self.resolver.grants_for(principal.id).await?;
		Ok(categories
			.into_iter()
			.filter(|category| decide_with(principal, Action::Read, category, &grants))
			.collect())
	}

	/// Level and capabilities of `principal` in `category`. Admins report
	/// [`PermissionLevel::Write`].
	pub async fn summary(&self, category: &Category, principal: &Principal) -> Result<AccessSummary> {
		if principal.is_admin {
			return Ok(AccessSummary {
				level: PermissionLevel::Write,
				can_read: true,
				can_write: true,
			});
		}

		let level = self.resolver.effective_level(category.id, principal.id).await?;
		let attrs = CategoryAttrs::from(category);
		Ok(AccessSummary {
			level,
			can_read: abac::is_allowed(principal, Action::Read, &attrs, level),
			can_write: abac::is_allowed(principal, Action::Write, &attrs, level),
		})
	}

	async fn decide(&self, principal: &Principal, action: Action, category: &Category) -> Result<bool> {
		let attrs = CategoryAttrs::from(category);
		let level = if abac::grant_required(principal, action, &attrs) {
			self.resolver.effective_level(category.id, principal.id).await?
		} else {
			PermissionLevel::DEFAULT
		};

		let allowed = abac::is_allowed(principal, action, &attrs, level);
		if !allowed {
			tracing::debug!(
				user_id = %principal.id,
				category_id = %category.id,
				hidden = category.hidden,
				%level,
				?action,
				"access denied"
			);
		}
		Ok(allowed)
	}
}

fn decide_with(principal: &Principal, action: Action, category: &Category, grants: &GrantSet) -> bool {
	let attrs = CategoryAttrs::from(category);
	abac::is_allowed(principal, action, &attrs, grants.level_for(category.id))
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use forum_server_auth::{Category, CategoryGrant, CategoryId, PermissionLevel, Topic, UserId};
use tracing::instrument;

use super::{require_text, ForumService};
use crate::error::{ForumError, Result};
use crate::guard::AccessSummary;
use crate::views::MAX_CATEGORY_NAME_LEN;

impl ForumService {
	/// Categories the caller can read, in id order.
	#[instrument(skip(self, token))]
	pub async fn list_categories(&self, token: &str) -> Result<Vec<Category>> {
		let principal = self.authority.resolve(token).await?;
		let categories = self.stores.content.list_categories().await?;
		self.guard.readable(&principal, categories).await
	}

	#[instrument(skip(self, token), fields(category_id = %category_id))]
	pub async fn get_category(&self, token: &str, category_id: CategoryId) -> Result<Category> {
		let principal = self.authority.resolve(token).await?;
		let category = self.load_category(category_id).await?;
		self.guard.require_read(&category, &principal).await?;
		Ok(category)
	}

	/// Topics of a readable category, newest first.
	#[instrument(skip(self, token), fields(category_id = %category_id))]
	pub async fn list_category_topics(&self, token: &str, category_id: CategoryId) -> Result<Vec<Topic>> {
		let principal = self.authority.resolve(token).await?;
		let category = self.load_category(category_id).await?;
		self.guard.require_read(&category, &principal).await?;
		Ok(self.stores.content.list_topics_in_category(category_id).await?)
	}

	#[instrument(skip(self, token, description))]
	pub async fn create_category(
		&self,
		token: &str,
		name: &str,
		description: Option<&str>,
	) -> Result<Category> {
		let admin = self.authority.resolve_admin(token).await?;
		let name = require_text("name", name, Some(MAX_CATEGORY_NAME_LEN))?;
		let description = description.map(str::trim).filter(|d| !d.is_empty());

		let category = self.stores.content.create_category(&name, description).await?;
		tracing::info!(admin_id = %admin.id, category_id = %category.id, "category created by admin");
		Ok(category)
	}

	#[instrument(skip(self, token), fields(category_id = %category_id))]
	pub async fn set_category_hidden(
		&self,
		token: &str,
		category_id: CategoryId,
		hidden: bool,
	) -> Result<Category> {
		self.authority.resolve_admin(token).await?;
		if !self.stores.content.set_category_hidden(category_id, hidden).await? {
			return Err(ForumError::CategoryNotFound);
		}
		self.load_category(category_id).await
	}

	#[instrument(skip(self, token), fields(category_id = %category_id))]
	pub async fn set_category_locked(
		&self,
		token: &str,
		category_id: CategoryId,
		locked: bool,
	) -> Result<Category> {
		self.authority.resolve_admin(token).await?;
		if !self.stores.content.set_category_locked(category_id, locked).await? {
			return Err(ForumError::CategoryNotFound);
		}
		self.load_category(category_id).await
	}

	/// Sets a user's level on a category.
	///
	/// `level` arrives as a raw integer and must be 0 to 3.
	#[instrument(skip(self, token), fields(category_id = %category_id, user_id = %user_id))]
	pub async fn set_user_permission(
		&self,
		token: &str,
		category_id: CategoryId,
		user_id: UserId,
		level: i64,
	) -> Result<CategoryGrant> {
		let admin = self.authority.resolve_admin(token).await?;
		let level =
			PermissionLevel::try_from(level).map_err(|e| ForumError::InvalidInput(e.to_string()))?;
		self.load_category(category_id).await?;
		if self.stores.users.get_user_by_id(user_id).await?.is_none() {
			return Err(ForumError::UserNotFound);
		}

		self.stores
			.permissions
			.upsert_permission(category_id, user_id, level)
			.await?;
		tracing::info!(admin_id = %admin.id, %category_id, %user_id, %level, "grant changed");

		Ok(CategoryGrant {
			category_id,
			user_id,
			level,
		})
	}

	#[instrument(skip(self, token), fields(category_id = %category_id))]
	pub async fn list_category_permissions(
		&self,
		token: &str,
		category_id: CategoryId,
	) -> Result<Vec<CategoryGrant>> {
		self.authority.resolve_admin(token).await?;
		self.load_category(category_id).await?;
		Ok(self
			.stores
			.permissions
			.list_permissions_for_category(category_id)
			.await?)
	}

	/// What the caller may do in a category. Works for hidden categories the
	/// caller cannot read, so clients can explain a denial.
	#[instrument(skip(self, token), fields(category_id = %category_id))]
	pub async fn effective_access(&self, token: &str, category_id: CategoryId) -> Result<AccessSummary> {
		let principal = self.authority.resolve(token).await?;
		let category = self.load_category(category_id).await?;
		self.guard.summary(&category, &principal).await
	}
}

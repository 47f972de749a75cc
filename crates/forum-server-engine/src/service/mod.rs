// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The forum service.
//!
//! Every guarded operation takes the caller's bearer token, resolves it to a
//! [`Principal`], loads the target and its owning category, checks access,
//! and only then reads or mutates. Failures are returned as [`ForumError`]
//! kinds; nothing is logged and swallowed.

mod category;
mod reply;
mod topic;

use std::sync::Arc;

use chrono::Duration;
use forum_server_auth::{
	Category, CategoryId, IssuedToken, Principal, Reply, ReplyId, Topic, TopicId, TokenCodec,
	UserId, UserProfile,
};
use forum_server_db::{
	ContentRepository, ContentStore, PermissionRepository, PermissionStore, UserRepository,
	UserStore,
};
use sqlx::SqlitePool;
use tracing::instrument;

use crate::authority::TokenAuthority;
use crate::content::ContentStateMachine;
use crate::error::{ForumError, Result};
use crate::guard::AccessGuard;
use crate::resolver::PermissionResolver;

/// The stores the service reads and writes through.
#[derive(Clone)]
pub struct ForumStores {
	pub users: Arc<dyn UserStore>,
	pub permissions: Arc<dyn PermissionStore>,
	pub content: Arc<dyn ContentStore>,
}

impl ForumStores {
	/// All three stores backed by one SQLite pool.
	pub fn sqlite(pool: SqlitePool) -> Self {
		Self {
			users: Arc::new(UserRepository::new(pool.clone())),
			permissions: Arc::new(PermissionRepository::new(pool.clone())),
			content: Arc::new(ContentRepository::new(pool)),
		}
	}
}

#[derive(Clone)]
pub struct ForumService {
	authority: TokenAuthority,
	guard: AccessGuard,
	state: ContentStateMachine,
	stores: ForumStores,
}

impl ForumService {
	pub fn new(
		stores: ForumStores,
		codec: Arc<dyn TokenCodec>,
		token_ttl: Duration,
		issuer: impl Into<String>,
	) -> Self {
		let authority = TokenAuthority::new(codec, Arc::clone(&stores.users), token_ttl, issuer);
		let guard = AccessGuard::new(PermissionResolver::new(Arc::clone(&stores.permissions)));
		let state = ContentStateMachine::new(Arc::clone(&stores.content));
		Self {
			authority,
			guard,
			state,
			stores,
		}
	}

	pub fn authority(&self) -> &TokenAuthority {
		&self.authority
	}

	pub fn guard(&self) -> &AccessGuard {
		&self.guard
	}

	// =========================================================================
	// Accounts
	// =========================================================================

	pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<UserProfile> {
		self.authority.register(username, email, password).await
	}

	pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken> {
		self.authority.login(username, password).await
	}

	/// The caller's own profile.
	pub async fn whoami(&self, token: &str) -> Result<UserProfile> {
		Ok(self.authority.resolve_user(token).await?.to_profile())
	}

	/// A user's public profile. No token needed.
	#[instrument(skip(self), fields(user_id = %user_id))]
	pub async fn get_user(&self, user_id: UserId) -> Result<UserProfile> {
		self.stores
			.users
			.get_user_by_id(user_id)
			.await?
			.map(|user| user.to_profile())
			.ok_or(ForumError::UserNotFound)
	}

	#[instrument(skip(self, token))]
	pub async fn list_users(&self, token: &str) -> Result<Vec<UserProfile>> {
		self.authority.resolve_admin(token).await?;
		let users = self.stores.users.list_users().await?;
		Ok(users.iter().map(|user| user.to_profile()).collect())
	}

	// =========================================================================
	// Loading helpers
	// =========================================================================

	async fn load_category(&self, id: CategoryId) -> Result<Category> {
		self.stores
			.content
			.get_category(id)
			.await?
			.ok_or(ForumError::CategoryNotFound)
	}

	async fn load_topic(&self, id: TopicId) -> Result<Topic> {
		self.stores
			.content
			.get_topic(id)
			.await?
			.ok_or(ForumError::TopicNotFound)
	}

	async fn load_reply(&self, id: ReplyId) -> Result<Reply> {
		self.stores
			.content
			.get_reply(id)
			.await?
			.ok_or(ForumError::ReplyNotFound)
	}

	/// Loads a topic and checks `principal` may read its category.
	async fn readable_topic(&self, principal: &Principal, id: TopicId) -> Result<(Topic, Category)> {
		let topic = self.load_topic(id).await?;
		let category = self.load_category(topic.category_id).await?;
		self.guard.require_read(&category, principal).await?;
		Ok((topic, category))
	}

	/// Loads a reply and checks `principal` may read its category.
	async fn readable_reply(&self, principal: &Principal, id: ReplyId) -> Result<Reply> {
		let reply = self.load_reply(id).await?;
		let topic = self.load_topic(reply.topic_id).await?;
		let category = self.load_category(topic.category_id).await?;
		self.guard.require_read(&category, principal).await?;
		Ok(reply)
	}
}

fn require_text(field: &str, value: &str, max_chars: Option<usize>) -> Result<String> {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		return Err(ForumError::InvalidInput(format!("{field} must not be empty")));
	}
	if let Some(max) = max_chars {
		if trimmed.chars().count() > max {
			return Err(ForumError::InvalidInput(format!(
				"{field} must be at most {max} characters"
			)));
		}
	}
	Ok(trimmed.to_string())
}

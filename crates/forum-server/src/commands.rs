// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Administrative commands.
//!
//! Each command runs against a [`ForumService`] and returns the text the
//! binary prints. Everything except account bootstrap goes through a bearer
//! token, so the same access rules apply as for any other client.

use anyhow::Context;
use forum_server_auth::{CategoryId, TopicId, UserId};
use forum_server_engine::ForumService;
use serde::Serialize;

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
	serde_json::to_string_pretty(value).context("failed to encode output")
}

/// Bootstrap an administrator account.
pub async fn create_admin(
	service: &ForumService,
	username: &str,
	email: &str,
	password: &str,
) -> anyhow::Result<String> {
	let profile = service
		.authority()
		.create_admin(username, email, password)
		.await
		.context("failed to create admin")?;
	tracing::info!(user_id = %profile.id, "admin account created");
	to_json(&profile)
}

/// Log in and print the issued token.
pub async fn login(service: &ForumService, username: &str, password: &str) -> anyhow::Result<String> {
	let issued = service
		.login(username, password)
		.await
		.context("login failed")?;
	Ok(issued.access_token)
}

pub async fn whoami(service: &ForumService, token: &str) -> anyhow::Result<String> {
	let profile = service.whoami(token).await.context("whoami failed")?;
	to_json(&profile)
}

/// Set a user's level on a category. `level` is 0 (no access) to 3 (write).
pub async fn grant(
	service: &ForumService,
	token: &str,
	category_id: i64,
	user_id: i64,
	level: i64,
) -> anyhow::Result<String> {
	let grant = service
		.set_user_permission(token, CategoryId::new(category_id), UserId::new(user_id), level)
		.await
		.context("grant failed")?;
	to_json(&grant)
}

pub async fn lock_topic(service: &ForumService, token: &str, topic_id: i64) -> anyhow::Result<String> {
	let topic = service
		.lock_topic(token, TopicId::new(topic_id))
		.await
		.context("lock-topic failed")?;
	to_json(&topic)
}

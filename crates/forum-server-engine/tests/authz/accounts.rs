// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account and token tests.

use forum_server_auth::UserId;

use super::support::{assert_forum_err, TestForum, PASSWORD};

#[tokio::test]
async fn whoami_reports_the_token_owner() {
	let app = TestForum::new().await;
	let me = app.service.whoami(&app.fixtures.member.token).await.unwrap();
	assert_eq!(me.id, app.fixtures.member.id);
	assert_eq!(me.username, "member");
	assert!(!me.is_admin);
}

#[tokio::test]
async fn garbage_token_is_invalid_everywhere() {
	let app = TestForum::new().await;
	assert_forum_err(app.service.whoami("nope").await, "invalid_token");
	assert_forum_err(app.service.list_categories("nope").await, "invalid_token");
	assert_forum_err(
		app.service.lock_topic("nope", app.fixtures.topic.id).await,
		"invalid_token",
	);
}

#[tokio::test]
async fn profiles_are_public() {
	let app = TestForum::new().await;
	let profile = app.service.get_user(app.fixtures.author.id).await.unwrap();
	assert_eq!(profile.username, "author");
	assert_forum_err(app.service.get_user(UserId::new(9_999)).await, "user_not_found");
}

#[tokio::test]
async fn only_admins_list_users() {
	let app = TestForum::new().await;
	assert_forum_err(
		app.service.list_users(&app.fixtures.member.token).await,
		"access_denied",
	);

	let users = app.service.list_users(&app.fixtures.admin.token).await.unwrap();
	let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
	assert_eq!(names, vec!["admin", "author", "member"]);
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
	let app = TestForum::new().await;
	assert_forum_err(
		app.service.login("member", "not-the-password").await,
		"invalid_credentials",
	);
	assert!(app.service.login("member", PASSWORD).await.is_ok());
}

#[tokio::test]
async fn storage_failure_is_internal_error() {
	let app = TestForum::new().await;
	app.pool.close().await;

	let result = app.service.list_categories(&app.fixtures.member.token).await;
	assert_forum_err(result, "internal_error");
}

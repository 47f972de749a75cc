// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for category operations.
//!
//! - Public categories are readable by everyone
//! - Hidden categories need an explicit READ or WRITE grant
//! - Administration is admin only, independent of grants

use forum_server_auth::{CategoryId, PermissionLevel, UserId};

use super::support::{assert_forum_err, TestForum};

// ============================================================================
// Reading
// ============================================================================

#[tokio::test]
async fn member_lists_public_categories_only() {
	let app = TestForum::new().await;
	let categories = app
		.service
		.list_categories(&app.fixtures.member.token)
		.await
		.unwrap();
	let ids: Vec<_> = categories.iter().map(|c| c.id).collect();
	assert_eq!(ids, vec![app.fixtures.public.id]);
}

#[tokio::test]
async fn granted_member_lists_hidden_category() {
	let app = TestForum::new().await;
	app.grant(&app.fixtures.member, &app.fixtures.hidden, PermissionLevel::Read)
		.await;

	let categories = app
		.service
		.list_categories(&app.fixtures.member.token)
		.await
		.unwrap();
	assert_eq!(categories.len(), 2);
}

#[tokio::test]
async fn admin_lists_everything() {
	let app = TestForum::new().await;
	let categories = app
		.service
		.list_categories(&app.fixtures.admin.token)
		.await
		.unwrap();
	assert_eq!(categories.len(), 2);
}

#[tokio::test]
async fn hidden_category_without_grant_is_denied() {
	let app = TestForum::new().await;
	let token = &app.fixtures.member.token;
	let hidden = app.fixtures.hidden.id;

	assert_forum_err(app.service.get_category(token, hidden).await, "access_denied");
	assert_forum_err(
		app.service.list_category_topics(token, hidden).await,
		"access_denied",
	);
}

#[tokio::test]
async fn missing_category_is_not_found() {
	let app = TestForum::new().await;
	assert_forum_err(
		app.service
			.get_category(&app.fixtures.member.token, CategoryId::new(404))
			.await,
		"category_not_found",
	);
}

#[tokio::test]
async fn category_topics_newest_first() {
	let app = TestForum::new().await;
	let token = &app.fixtures.author.token;
	let second = app
		.service
		.create_topic(token, app.fixtures.public.id, "Second", "more")
		.await
		.unwrap();

	let topics = app
		.service
		.list_category_topics(token, app.fixtures.public.id)
		.await
		.unwrap();
	let ids: Vec<_> = topics.iter().map(|t| t.id).collect();
	assert_eq!(ids, vec![second.id, app.fixtures.topic.id]);
}

// ============================================================================
// Administration
// ============================================================================

#[tokio::test]
async fn members_cannot_administer_categories() {
	let app = TestForum::new().await;
	let token = &app.fixtures.member.token;
	let public = app.fixtures.public.id;

	assert_forum_err(
		app.service.create_category(token, "mine", None).await,
		"access_denied",
	);
	assert_forum_err(
		app.service.set_category_hidden(token, public, true).await,
		"access_denied",
	);
	assert_forum_err(
		app.service.set_category_locked(token, public, true).await,
		"access_denied",
	);
	assert_forum_err(
		app.service
			.set_user_permission(token, public, app.fixtures.member.id, 3)
			.await,
		"access_denied",
	);
	assert_forum_err(
		app.service.list_category_permissions(token, public).await,
		"access_denied",
	);
}

#[tokio::test]
async fn write_grant_does_not_allow_administration() {
	let app = TestForum::new().await;
	app.grant(&app.fixtures.member, &app.fixtures.hidden, PermissionLevel::Write)
		.await;
	assert_forum_err(
		app.service
			.set_category_locked(&app.fixtures.member.token, app.fixtures.hidden.id, true)
			.await,
		"access_denied",
	);
}

#[tokio::test]
async fn duplicate_category_name_is_conflict() {
	let app = TestForum::new().await;
	assert_forum_err(
		app.service
			.create_category(&app.fixtures.admin.token, "general", None)
			.await,
		"conflict",
	);
}

#[tokio::test]
async fn blank_category_name_is_invalid() {
	let app = TestForum::new().await;
	assert_forum_err(
		app.service
			.create_category(&app.fixtures.admin.token, "   ", None)
			.await,
		"invalid_input",
	);
}

#[tokio::test]
async fn toggling_missing_category_is_not_found() {
	let app = TestForum::new().await;
	let token = &app.fixtures.admin.token;
	assert_forum_err(
		app.service
			.set_category_hidden(token, CategoryId::new(404), true)
			.await,
		"category_not_found",
	);
	assert_forum_err(
		app.service
			.set_category_locked(token, CategoryId::new(404), true)
			.await,
		"category_not_found",
	);
}

#[tokio::test]
async fn unhiding_restores_access() {
	let app = TestForum::new().await;
	let token = &app.fixtures.member.token;
	let hidden = app.fixtures.hidden.id;
	assert_forum_err(app.service.get_category(token, hidden).await, "access_denied");

	app.service
		.set_category_hidden(&app.fixtures.admin.token, hidden, false)
		.await
		.unwrap();
	assert!(app.service.get_category(token, hidden).await.is_ok());
}

// ============================================================================
// Grants
// ============================================================================

#[tokio::test]
async fn out_of_range_level_is_invalid_input() {
	let app = TestForum::new().await;
	for level in [-1, 4, 99] {
		assert_forum_err(
			app.service
				.set_user_permission(
					&app.fixtures.admin.token,
					app.fixtures.hidden.id,
					app.fixtures.member.id,
					level,
				)
				.await,
			"invalid_input",
		);
	}
}

#[tokio::test]
async fn grant_targets_must_exist() {
	let app = TestForum::new().await;
	let token = &app.fixtures.admin.token;
	assert_forum_err(
		app.service
			.set_user_permission(token, CategoryId::new(404), app.fixtures.member.id, 2)
			.await,
		"category_not_found",
	);
	assert_forum_err(
		app.service
			.set_user_permission(token, app.fixtures.hidden.id, UserId::new(404), 2)
			.await,
		"user_not_found",
	);
}

#[tokio::test]
async fn regranting_replaces_the_level() {
	let app = TestForum::new().await;
	let member = &app.fixtures.member;
	let hidden = &app.fixtures.hidden;
	app.grant(member, hidden, PermissionLevel::Write).await;
	app.grant(member, hidden, PermissionLevel::NoAccess).await;

	let grants = app
		.service
		.list_category_permissions(&app.fixtures.admin.token, hidden.id)
		.await
		.unwrap();
	assert_eq!(grants.len(), 1);
	assert_eq!(grants[0].user_id, member.id);
	assert_eq!(grants[0].level, PermissionLevel::NoAccess);
}

#[tokio::test]
async fn effective_access_reports_level_and_capabilities() {
	let app = TestForum::new().await;
	let member = &app.fixtures.member;
	let hidden = app.fixtures.hidden.id;

	let summary = app.service.effective_access(&member.token, hidden).await.unwrap();
	assert_eq!(summary.level, PermissionLevel::Normal);
	assert!(!summary.can_read && !summary.can_write);

	let summary = app
		.service
		.effective_access(&app.fixtures.admin.token, hidden)
		.await
		.unwrap();
	assert_eq!(summary.level, PermissionLevel::Write);
	assert!(summary.can_read && summary.can_write);
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization and state tests for topics.

use forum_server_auth::{CategoryId, PermissionLevel, TopicId};
use forum_server_engine::TopicQuery;

use super::support::{assert_forum_err, TestForum};

fn query(search: Option<&str>, sort: Option<&str>, page: u32) -> TopicQuery {
	TopicQuery {
		search: search.map(str::to_string),
		sort: sort.map(str::to_string),
		page,
	}
}

// ============================================================================
// Creation
// ============================================================================

#[tokio::test]
async fn member_posts_in_public_category() {
	let app = TestForum::new().await;
	let topic = app
		.service
		.create_topic(&app.fixtures.member.token, app.fixtures.public.id, "  Hi  ", "body")
		.await
		.unwrap();
	assert_eq!(topic.title, "Hi");
	assert_eq!(topic.author_id, app.fixtures.member.id);
	assert!(!topic.locked);
}

#[tokio::test]
async fn hidden_category_needs_write_grant() {
	let app = TestForum::new().await;
	let member = &app.fixtures.member;
	let hidden = &app.fixtures.hidden;

	assert_forum_err(
		app.service.create_topic(&member.token, hidden.id, "t", "c").await,
		"access_denied",
	);

	app.grant(member, hidden, PermissionLevel::Read).await;
	assert_forum_err(
		app.service.create_topic(&member.token, hidden.id, "t", "c").await,
		"access_denied",
	);

	app.grant(member, hidden, PermissionLevel::Write).await;
	assert!(app
		.service
		.create_topic(&member.token, hidden.id, "t", "c")
		.await
		.is_ok());
}

#[tokio::test]
async fn locked_category_rejects_new_topics() {
	let app = TestForum::new().await;
	let admin = &app.fixtures.admin.token;
	let public = app.fixtures.public.id;
	app.service.set_category_locked(admin, public, true).await.unwrap();

	assert_forum_err(
		app.service
			.create_topic(&app.fixtures.member.token, public, "t", "c")
			.await,
		"category_locked",
	);
	assert_forum_err(
		app.service.create_topic(admin, public, "t", "c").await,
		"category_locked",
	);
}

#[tokio::test]
async fn missing_category_is_not_found() {
	let app = TestForum::new().await;
	assert_forum_err(
		app.service
			.create_topic(&app.fixtures.member.token, CategoryId::new(404), "t", "c")
			.await,
		"category_not_found",
	);
}

#[tokio::test]
async fn empty_or_long_title_is_invalid() {
	let app = TestForum::new().await;
	let token = &app.fixtures.member.token;
	let public = app.fixtures.public.id;

	assert_forum_err(
		app.service.create_topic(token, public, " ", "c").await,
		"invalid_input",
	);
	assert_forum_err(
		app.service
			.create_topic(token, public, &"t".repeat(201), "c")
			.await,
		"invalid_input",
	);
	assert_forum_err(
		app.service.create_topic(token, public, "t", "").await,
		"invalid_input",
	);
}

// ============================================================================
// Reading
// ============================================================================

#[tokio::test]
async fn topic_view_carries_stats() {
	let app = TestForum::new().await;
	let view = app
		.service
		.get_topic(&app.fixtures.member.token, app.fixtures.topic.id)
		.await
		.unwrap();
	assert_eq!(view.topic, app.fixtures.topic);
	assert_eq!(view.category_name, "general");
	assert_eq!(view.author_username, "author");
	assert_eq!(view.reply_count, 1);
	assert_eq!(view.best_reply_id, None);
}

#[tokio::test]
async fn topic_in_hidden_category_is_denied() {
	let app = TestForum::new().await;
	let topic = app
		.service
		.create_topic(&app.fixtures.admin.token, app.fixtures.hidden.id, "secret", "s")
		.await
		.unwrap();

	assert_forum_err(
		app.service.get_topic(&app.fixtures.member.token, topic.id).await,
		"access_denied",
	);
	assert_forum_err(
		app.service.get_topic(&app.fixtures.member.token, TopicId::new(404)).await,
		"topic_not_found",
	);
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn listing_skips_unreadable_categories() {
	let app = TestForum::new().await;
	app.service
		.create_topic(&app.fixtures.admin.token, app.fixtures.hidden.id, "secret", "s")
		.await
		.unwrap();

	let listing = app
		.service
		.list_topics(&app.fixtures.member.token, &TopicQuery::default())
		.await
		.unwrap();
	assert_eq!(listing.pages, 1);
	assert_eq!(listing.topics.len(), 1);
	assert_eq!(listing.topics[0].id, app.fixtures.topic.id);

	let listing = app
		.service
		.list_topics(&app.fixtures.admin.token, &TopicQuery::default())
		.await
		.unwrap();
	assert_eq!(listing.topics.len(), 2);
}

#[tokio::test]
async fn listing_searches_and_sorts() {
	let app = TestForum::new().await;
	let token = &app.fixtures.author.token;
	let public = app.fixtures.public.id;
	let rust = app
		.service
		.create_topic(token, public, "Rust borrow checker", "c")
		.await
		.unwrap();
	let async_rust = app
		.service
		.create_topic(token, public, "Async rust tips", "c")
		.await
		.unwrap();

	let listing = app
		.service
		.list_topics(token, &query(Some("RUST"), Some("asc"), 0))
		.await
		.unwrap();
	let ids: Vec<_> = listing.topics.iter().map(|t| t.id).collect();
	assert_eq!(ids, vec![rust.id, async_rust.id]);

	let listing = app
		.service
		.list_topics(token, &query(Some("rust+tips"), None, 0))
		.await
		.unwrap();
	let ids: Vec<_> = listing.topics.iter().map(|t| t.id).collect();
	assert_eq!(ids, vec![async_rust.id]);
}

#[tokio::test]
async fn listing_pages_by_ten() {
	let app = TestForum::new().await;
	let token = &app.fixtures.author.token;
	// One fixture topic plus eleven more.
	for i in 0..11 {
		app.service
			.create_topic(token, app.fixtures.public.id, &format!("topic {i}"), "c")
			.await
			.unwrap();
	}

	let first = app.service.list_topics(token, &query(None, None, 0)).await.unwrap();
	assert_eq!(first.pages, 2);
	assert_eq!(first.topics.len(), 10);

	let second = app.service.list_topics(token, &query(None, None, 1)).await.unwrap();
	assert_eq!(second.topics.len(), 2);
	assert_eq!(second.topics[1].id, app.fixtures.topic.id);

	let beyond = app.service.list_topics(token, &query(None, None, 5)).await.unwrap();
	assert!(beyond.topics.is_empty());
}

// ============================================================================
// Locking
// ============================================================================

#[tokio::test]
async fn only_admins_lock_topics() {
	let app = TestForum::new().await;
	assert_forum_err(
		app.service
			.lock_topic(&app.fixtures.author.token, app.fixtures.topic.id)
			.await,
		"access_denied",
	);
	assert_forum_err(
		app.service
			.lock_topic(&app.fixtures.admin.token, TopicId::new(404))
			.await,
		"topic_not_found",
	);
}

#[tokio::test]
async fn locked_topic_rejects_replies_from_everyone() {
	let app = TestForum::new().await;
	let admin = &app.fixtures.admin.token;
	let topic = app.fixtures.topic.id;

	let locked = app.service.lock_topic(admin, topic).await.unwrap();
	assert!(locked.locked);
	assert!(app.service.lock_topic(admin, topic).await.unwrap().locked);

	assert_forum_err(
		app.service.create_reply(&app.fixtures.member.token, topic, "late").await,
		"topic_locked",
	);
	assert_forum_err(
		app.service.create_reply(admin, topic, "late").await,
		"topic_locked",
	);
}

#[tokio::test]
async fn locked_topic_stays_readable_and_votable() {
	let app = TestForum::new().await;
	app.service
		.lock_topic(&app.fixtures.admin.token, app.fixtures.topic.id)
		.await
		.unwrap();

	let token = &app.fixtures.author.token;
	assert!(app.service.get_topic(token, app.fixtures.topic.id).await.is_ok());
	assert_eq!(
		app.service.vote(token, app.fixtures.reply.id, 1).await.unwrap(),
		1
	);
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end walks through the access and content rules.

use forum_server_auth::PermissionLevel;

use super::support::{assert_forum_err, TestForum};

#[tokio::test]
async fn hidden_category_read_depends_on_grant() {
	let app = TestForum::new().await;
	let member = &app.fixtures.member;
	let hidden = &app.fixtures.hidden;

	// No row: the default level applies and hides the category.
	let access = app.service.effective_access(&member.token, hidden.id).await.unwrap();
	assert_eq!(access.level, PermissionLevel::Normal);
	assert_forum_err(
		app.service.get_category(&member.token, hidden.id).await,
		"access_denied",
	);

	app.grant(member, hidden, PermissionLevel::Read).await;
	let access = app.service.effective_access(&member.token, hidden.id).await.unwrap();
	assert!(access.can_read);
	assert!(!access.can_write);
	assert!(app.service.get_category(&member.token, hidden.id).await.is_ok());
}

#[tokio::test]
async fn hidden_category_permission_matrix() {
	let app = TestForum::new().await;
	let member = &app.fixtures.member;
	let hidden = &app.fixtures.hidden;

	let expected = [
		(PermissionLevel::NoAccess, false, false),
		(PermissionLevel::Normal, false, false),
		(PermissionLevel::Read, true, false),
		(PermissionLevel::Write, true, true),
	];
	for (level, can_read, can_write) in expected {
		app.grant(member, hidden, level).await;
		let access = app.service.effective_access(&member.token, hidden.id).await.unwrap();
		assert_eq!(access.level, level);
		assert_eq!((access.can_read, access.can_write), (can_read, can_write), "{level}");
	}
}

#[tokio::test]
async fn public_category_ignores_no_access_grant() {
	let app = TestForum::new().await;
	let member = &app.fixtures.member;
	app.grant(member, &app.fixtures.public, PermissionLevel::NoAccess)
		.await;

	let access = app
		.service
		.effective_access(&member.token, app.fixtures.public.id)
		.await
		.unwrap();
	assert!(access.can_read && access.can_write);
	assert!(app
		.service
		.create_topic(&member.token, app.fixtures.public.id, "still here", "yes")
		.await
		.is_ok());
}

#[tokio::test]
async fn admin_ignores_explicit_denial() {
	let app = TestForum::new().await;
	let admin = &app.fixtures.admin;
	app.grant(admin, &app.fixtures.hidden, PermissionLevel::NoAccess)
		.await;

	assert!(app
		.service
		.get_category(&admin.token, app.fixtures.hidden.id)
		.await
		.is_ok());
	assert!(app
		.service
		.create_topic(&admin.token, app.fixtures.hidden.id, "staff only", "s")
		.await
		.is_ok());
}

#[tokio::test]
async fn best_reply_moves_between_replies() {
	let app = TestForum::new().await;
	let author = &app.fixtures.author;
	let topic = &app.fixtures.topic;
	let first = app.fixtures.reply.clone();
	let second = app.reply_as(&app.fixtures.member, topic).await;

	app.service
		.select_best_reply(&author.token, topic.id, first.id)
		.await
		.unwrap();
	app.service
		.select_best_reply(&author.token, topic.id, second.id)
		.await
		.unwrap();

	let first = app.service.get_reply(&author.token, first.id).await.unwrap();
	let second = app.service.get_reply(&author.token, second.id).await.unwrap();
	assert!(!first.reply.is_best);
	assert!(second.reply.is_best);

	assert_forum_err(
		app.service
			.select_best_reply(&app.fixtures.member.token, topic.id, first.reply.id)
			.await,
		"reply_not_accessible",
	);
}

#[tokio::test]
async fn vote_sequence_keeps_last_value() {
	let app = TestForum::new().await;
	let voter = &app.fixtures.author;
	let reply = app.fixtures.reply.id;

	for value in [1, -1, 1] {
		app.service.vote(&voter.token, reply, value).await.unwrap();
	}
	let view = app.service.get_reply(&voter.token, reply).await.unwrap();
	assert_eq!(view.score, 1);
}

#[tokio::test]
async fn lock_never_reopens() {
	let app = TestForum::new().await;
	let admin = &app.fixtures.admin.token;
	let topic = app.fixtures.topic.id;
	app.service.lock_topic(admin, topic).await.unwrap();

	for _ in 0..3 {
		assert_forum_err(
			app.service.create_reply(&app.fixtures.author.token, topic, "again").await,
			"topic_locked",
		);
		assert!(app.service.lock_topic(admin, topic).await.unwrap().locked);
	}
	let view = app.service.get_topic(admin, topic).await.unwrap();
	assert!(view.topic.locked);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_best_reply_selection_leaves_one() {
	let app = TestForum::new().await;
	let topic = app.fixtures.topic.clone();
	let mut reply_ids = vec![app.fixtures.reply.id];
	for _ in 0..5 {
		reply_ids.push(app.reply_as(&app.fixtures.member, &topic).await.id);
	}

	let topic_id = topic.id;
	let handles = reply_ids.iter().copied().map(|reply_id| {
		let service = app.service.clone();
		let token = app.fixtures.author.token.clone();
		tokio::spawn(async move { service.select_best_reply(&token, topic_id, reply_id).await })
	});
	for joined in futures::future::join_all(handles).await {
		let selected = joined.unwrap().unwrap();
		assert!(selected.is_best);
	}

	let replies = app
		.service
		.list_replies(&app.fixtures.author.token, topic_id)
		.await
		.unwrap();
	let best = replies.iter().filter(|r| r.reply.is_best).count();
	assert_eq!(best, 1, "found {best} best replies");
}

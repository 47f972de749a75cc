// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reply, vote and best-reply tests.

use forum_server_auth::{PermissionLevel, ReplyId, TopicId};

use super::support::{assert_forum_err, TestForum};

#[tokio::test]
async fn reply_is_stored_trimmed() {
	let app = TestForum::new().await;
	let reply = app
		.service
		.create_reply(&app.fixtures.author.token, app.fixtures.topic.id, "  thanks ")
		.await
		.unwrap();
	assert_eq!(reply.content, "thanks");
	assert!(!reply.is_best);

	let view = app
		.service
		.get_reply(&app.fixtures.member.token, reply.id)
		.await
		.unwrap();
	assert_eq!(view.reply, reply);
	assert_eq!(view.score, 0);
}

#[tokio::test]
async fn reply_to_missing_topic() {
	let app = TestForum::new().await;
	assert_forum_err(
		app.service
			.create_reply(&app.fixtures.member.token, TopicId::new(404), "x")
			.await,
		"topic_not_found",
	);
	assert_forum_err(
		app.service
			.get_reply(&app.fixtures.member.token, ReplyId::new(404))
			.await,
		"reply_not_found",
	);
}

#[tokio::test]
async fn list_replies_oldest_first_with_scores() {
	let app = TestForum::new().await;
	let second = app.reply_as(&app.fixtures.author, &app.fixtures.topic).await;
	let voter = app.user("voter").await;

	app.service.vote(&voter.token, second.id, 1).await.unwrap();
	app.service
		.vote(&app.fixtures.author.token, second.id, 1)
		.await
		.unwrap();
	app.service
		.vote(&voter.token, app.fixtures.reply.id, -1)
		.await
		.unwrap();

	let replies = app
		.service
		.list_replies(&app.fixtures.member.token, app.fixtures.topic.id)
		.await
		.unwrap();
	let summary: Vec<_> = replies.iter().map(|r| (r.reply.id, r.score)).collect();
	assert_eq!(summary, vec![(app.fixtures.reply.id, -1), (second.id, 2)]);
}

mod votes {
	use super::*;

	#[tokio::test]
	async fn repeated_vote_counts_once() {
		let app = TestForum::new().await;
		let token = &app.fixtures.author.token;
		let reply = app.fixtures.reply.id;

		assert_eq!(app.service.vote(token, reply, 1).await.unwrap(), 1);
		assert_eq!(app.service.vote(token, reply, 1).await.unwrap(), 1);
		assert_eq!(app.service.vote(token, reply, -1).await.unwrap(), -1);
	}

	#[tokio::test]
	async fn out_of_range_value_is_neutral() {
		let app = TestForum::new().await;
		let token = &app.fixtures.author.token;
		let reply = app.fixtures.reply.id;

		app.service.vote(token, reply, 1).await.unwrap();
		assert_eq!(app.service.vote(token, reply, 7).await.unwrap(), 0);
	}

	#[tokio::test]
	async fn voting_needs_read_access() {
		let app = TestForum::new().await;
		let member = &app.fixtures.member;
		let staff_topic = app
			.service
			.create_topic(&app.fixtures.admin.token, app.fixtures.hidden.id, "s", "s")
			.await
			.unwrap();
		let staff_reply = app
			.service
			.create_reply(&app.fixtures.admin.token, staff_topic.id, "r")
			.await
			.unwrap();

		assert_forum_err(
			app.service.vote(&member.token, staff_reply.id, 1).await,
			"access_denied",
		);

		app.grant(member, &app.fixtures.hidden, PermissionLevel::Read).await;
		assert_eq!(
			app.service.vote(&member.token, staff_reply.id, 1).await.unwrap(),
			1
		);
	}

	#[tokio::test]
	async fn vote_on_missing_reply() {
		let app = TestForum::new().await;
		assert_forum_err(
			app.service
				.vote(&app.fixtures.member.token, ReplyId::new(404), 1)
				.await,
			"reply_not_found",
		);
	}
}

mod best_reply {
	use super::*;

	#[tokio::test]
	async fn topic_author_selects_and_moves() {
		let app = TestForum::new().await;
		let author = &app.fixtures.author.token;
		let topic = app.fixtures.topic.id;
		let first = app.fixtures.reply.id;
		let second = app.reply_as(&app.fixtures.member, &app.fixtures.topic).await;

		let chosen = app.service.select_best_reply(author, topic, first).await.unwrap();
		assert!(chosen.is_best);

		app.service
			.select_best_reply(author, topic, second.id)
			.await
			.unwrap();

		let view = app.service.get_topic(author, topic).await.unwrap();
		assert_eq!(view.best_reply_id, Some(second.id));
		let replies = app.service.list_replies(author, topic).await.unwrap();
		let best: Vec<_> = replies
			.iter()
			.filter(|r| r.reply.is_best)
			.map(|r| r.reply.id)
			.collect();
		assert_eq!(best, vec![second.id]);
	}

	#[tokio::test]
	async fn others_cannot_select_even_admins() {
		let app = TestForum::new().await;
		let topic = app.fixtures.topic.id;
		let reply = app.fixtures.reply.id;

		for token in [&app.fixtures.member.token, &app.fixtures.admin.token] {
			assert_forum_err(
				app.service.select_best_reply(token, topic, reply).await,
				"reply_not_accessible",
			);
		}
	}

	#[tokio::test]
	async fn reply_from_another_topic_is_rejected() {
		let app = TestForum::new().await;
		let author = &app.fixtures.author.token;
		let other = app
			.service
			.create_topic(author, app.fixtures.public.id, "Other", "o")
			.await
			.unwrap();

		assert_forum_err(
			app.service
				.select_best_reply(author, other.id, app.fixtures.reply.id)
				.await,
			"reply_not_accessible",
		);
		assert_forum_err(
			app.service
				.select_best_reply(author, app.fixtures.topic.id, ReplyId::new(404))
				.await,
			"reply_not_found",
		);
	}
}

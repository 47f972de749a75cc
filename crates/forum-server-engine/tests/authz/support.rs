// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt::Debug;
use std::sync::Arc;

use chrono::Duration;
use forum_common_config::SecretString;
use forum_server_auth::{Category, JwtTokenCodec, PermissionLevel, Reply, Topic, UserId};
use forum_server_db::testing::create_file_test_pool;
use forum_server_engine::{ForumError, ForumService, ForumStores};
use sqlx::SqlitePool;
use tempfile::TempDir;

pub const PASSWORD: &str = "correct-horse-battery";
const SECRET: &str = "integration-test-secret-0123456789abcdef";

#[derive(Clone, Debug)]
pub struct TestUser {
	pub id: UserId,
	pub token: String,
}

#[derive(Clone)]
pub struct Fixtures {
	pub admin: TestUser,
	/// Authors `topic`.
	pub author: TestUser,
	pub member: TestUser,
	pub public: Category,
	pub hidden: Category,
	pub topic: Topic,
	pub reply: Reply,
}

pub struct TestForum {
	pub service: ForumService,
	pub pool: SqlitePool,
	pub fixtures: Fixtures,
	_temp_dir: TempDir,
}

impl TestForum {
	pub async fn new() -> Self {
		let temp_dir = tempfile::tempdir().unwrap();
		let pool = create_file_test_pool(temp_dir.path()).await;

		let codec = Arc::new(JwtTokenCodec::new(&SecretString::from(SECRET), "forum-test"));
		let service = ForumService::new(
			ForumStores::sqlite(pool.clone()),
			codec,
			Duration::hours(8),
			"forum-test",
		);

		let fixtures = create_fixtures(&service).await;

		Self {
			service,
			pool,
			fixtures,
			_temp_dir: temp_dir,
		}
	}

	pub async fn user(&self, username: &str) -> TestUser {
		create_user(&self.service, username, false).await
	}

	pub async fn grant(&self, user: &TestUser, category: &Category, level: PermissionLevel) {
		self.service
			.set_user_permission(&self.fixtures.admin.token, category.id, user.id, level.as_i64())
			.await
			.unwrap();
	}

	pub async fn reply_as(&self, user: &TestUser, topic: &Topic) -> Reply {
		self.service
			.create_reply(&user.token, topic.id, "an answer")
			.await
			.unwrap()
	}
}

async fn create_user(service: &ForumService, username: &str, is_admin: bool) -> TestUser {
	let email = format!("{username}@example.com");
	let profile = if is_admin {
		service
			.authority()
			.create_admin(username, &email, PASSWORD)
			.await
			.unwrap()
	} else {
		service.register(username, &email, PASSWORD).await.unwrap()
	};
	let issued = service.login(username, PASSWORD).await.unwrap();
	TestUser {
		id: profile.id,
		token: issued.access_token,
	}
}

async fn create_fixtures(service: &ForumService) -> Fixtures {
	let admin = create_user(service, "admin", true).await;
	let author = create_user(service, "author", false).await;
	let member = create_user(service, "member", false).await;

	let public = service
		.create_category(&admin.token, "general", Some("Anything goes"))
		.await
		.unwrap();
	let hidden = service
		.create_category(&admin.token, "staff", None)
		.await
		.unwrap();
	let hidden = service
		.set_category_hidden(&admin.token, hidden.id, true)
		.await
		.unwrap();

	let topic = service
		.create_topic(&author.token, public.id, "First post", "Hello forum")
		.await
		.unwrap();
	let reply = service
		.create_reply(&member.token, topic.id, "Welcome!")
		.await
		.unwrap();

	Fixtures {
		admin,
		author,
		member,
		public,
		hidden,
		topic,
		reply,
	}
}

/// Asserts `result` failed with the error whose code is `expected`.
#[track_caller]
pub fn assert_forum_err<T: Debug>(result: Result<T, ForumError>, expected: &str) {
	match result {
		Ok(value) => panic!("expected {expected}, got Ok({value:?})"),
		Err(e) => assert_eq!(e.code(), expected, "unexpected error: {e}"),
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pools and fixtures for tests.

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

use crate::pool::run_migrations;

/// A single-connection in-memory pool with the schema applied.
///
/// One connection keeps every query on the same in-memory database.
pub async fn create_test_pool() -> SqlitePool {
	let options = SqliteConnectOptions::from_str(":memory:")
		.unwrap()
		.foreign_keys(true)
		.create_if_missing(true);

	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.connect_with(options)
		.await
		.expect("Failed to create test pool");

	run_migrations(&pool).await.expect("Failed to apply schema");
	pool
}

/// A file-backed pool in `dir` with the schema applied, for tests that need
/// several connections racing each other.
pub async fn create_file_test_pool(dir: &Path) -> SqlitePool {
	let url = format!("sqlite:{}?mode=rwc", dir.join("forum-test.db").display());
	let pool = crate::pool::create_pool(&url)
		.await
		.expect("Failed to create file pool");
	run_migrations(&pool).await.expect("Failed to apply schema");
	pool
}

/// Inserts a user row directly and returns its id.
pub async fn insert_test_user(pool: &SqlitePool, username: &str, is_admin: bool) -> i64 {
	sqlx::query(
		r#"
		INSERT INTO users (username, email, password_hash, is_admin, created_at)
		VALUES (?, ?, 'not-a-real-hash', ?, ?)
		"#,
	)
	.bind(username)
	.bind(format!("{username}@example.com"))
	.bind(is_admin as i32)
	.bind(Utc::now().to_rfc3339())
	.execute(pool)
	.await
	.unwrap()
	.last_insert_rowid()
}

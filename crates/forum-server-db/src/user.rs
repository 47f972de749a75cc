// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use forum_server_auth::{User, UserId};
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::{conflict_on_unique, DbError};
use crate::rows::parse_timestamp;

/// Fields needed to create a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
	pub username: String,
	pub email: String,
	pub password_hash: String,
	pub is_admin: bool,
}

#[async_trait]
pub trait UserStore: Send + Sync {
	async fn create_user(&self, user: &NewUser) -> Result<User, DbError>;
	async fn get_user_by_id(&self, id: UserId) -> Result<Option<User>, DbError>;
	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError>;
	async fn list_users(&self) -> Result<Vec<User>, DbError>;
}

/// Repository for user database operations.
#[derive(Clone)]
pub struct UserRepository {
	pool: SqlitePool,
}

impl UserRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Create a new user.
	///
	/// # Errors
	/// Returns `DbError::Conflict` if the username or email is taken.
	#[tracing::instrument(skip(self, user), fields(username = %user.username))]
	pub async fn create_user(&self, user: &NewUser) -> Result<User, DbError> {
		let created_at = Utc::now();
		let result = sqlx::query(
			r#"
			INSERT INTO users (username, email, password_hash, is_admin, created_at)
			VALUES (?, ?, ?, ?, ?)
			"#,
		)
		.bind(&user.username)
		.bind(&user.email)
		.bind(&user.password_hash)
		.bind(user.is_admin as i32)
		.bind(created_at.to_rfc3339())
		.execute(&self.pool)
		.await
		.map_err(|e| conflict_on_unique(e, "User"))?;

		let id = UserId::new(result.last_insert_rowid());
		tracing::info!(user_id = %id, is_admin = user.is_admin, "user created");

		Ok(User {
			id,
			username: user.username.clone(),
			email: user.email.clone(),
			password_hash: user.password_hash.clone(),
			is_admin: user.is_admin,
			created_at,
		})
	}

	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn get_user_by_id(&self, id: UserId) -> Result<Option<User>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, username, email, password_hash, is_admin, created_at
			FROM users
			WHERE id = ?
			"#,
		)
		.bind(id.get())
		.fetch_optional(&self.pool)
		.await?;

		row.as_ref().map(parse_user_row).transpose()
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, username, email, password_hash, is_admin, created_at
			FROM users
			WHERE username = ?
			"#,
		)
		.bind(username)
		.fetch_optional(&self.pool)
		.await?;

		row.as_ref().map(parse_user_row).transpose()
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_users(&self) -> Result<Vec<User>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, username, email, password_hash, is_admin, created_at
			FROM users
			ORDER BY id ASC
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(parse_user_row).collect()
	}
}

fn parse_user_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, DbError> {
	let is_admin: i64 = row.get("is_admin");
	let created_at: String = row.get("created_at");

	Ok(User {
		id: UserId::new(row.get("id")),
		username: row.get("username"),
		email: row.get("email"),
		password_hash: row.get("password_hash"),
		is_admin: is_admin != 0,
		created_at: parse_timestamp("created_at", &created_at)?,
	})
}

#[async_trait]
impl UserStore for UserRepository {
	async fn create_user(&self, user: &NewUser) -> Result<User, DbError> {
		self.create_user(user).await
	}

	async fn get_user_by_id(&self, id: UserId) -> Result<Option<User>, DbError> {
		self.get_user_by_id(id).await
	}

	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		self.get_user_by_username(username).await
	}

	async fn list_users(&self) -> Result<Vec<User>, DbError> {
		self.list_users().await
	}
}

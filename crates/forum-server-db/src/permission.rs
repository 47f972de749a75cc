// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Category permission grants.
//!
//! A row exists only for explicit grants. Readers get `None` when there is
//! no row; turning that into the default level is the caller's decision.

use async_trait::async_trait;
use forum_server_auth::{CategoryGrant, CategoryId, PermissionLevel, UserId};
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;
use crate::rows::parse_level;

#[async_trait]
pub trait PermissionStore: Send + Sync {
	async fn get_permission(
		&self,
		category_id: CategoryId,
		user_id: UserId,
	) -> Result<Option<PermissionLevel>, DbError>;
	async fn upsert_permission(
		&self,
		category_id: CategoryId,
		user_id: UserId,
		level: PermissionLevel,
	) -> Result<(), DbError>;
	async fn list_permissions_for_category(
		&self,
		category_id: CategoryId,
	) -> Result<Vec<CategoryGrant>, DbError>;
	async fn list_grants_for_user(&self, user_id: UserId) -> Result<Vec<CategoryGrant>, DbError>;
}

/// Repository for category permission grants.
#[derive(Clone)]
pub struct PermissionRepository {
	pool: SqlitePool,
}

impl PermissionRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self), fields(category_id = %category_id, user_id = %user_id))]
	pub async fn get_permission(
		&self,
		category_id: CategoryId,
		user_id: UserId,
	) -> Result<Option<PermissionLevel>, DbError> {
		let level: Option<i64> = sqlx::query_scalar(
			r#"
			SELECT level FROM category_permissions
			WHERE category_id = ? AND user_id = ?
			"#,
		)
		.bind(category_id.get())
		.bind(user_id.get())
		.fetch_optional(&self.pool)
		.await?;

		level.map(parse_level).transpose()
	}

	/// Insert or replace the grant for `(category_id, user_id)` in one
	/// statement.
	#[tracing::instrument(skip(self), fields(category_id = %category_id, user_id = %user_id, level = %level))]
	pub async fn upsert_permission(
		&self,
		category_id: CategoryId,
		user_id: UserId,
		level: PermissionLevel,
	) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO category_permissions (category_id, user_id, level)
			VALUES (?, ?, ?)
			ON CONFLICT (category_id, user_id) DO UPDATE SET level = excluded.level
			"#,
		)
		.bind(category_id.get())
		.bind(user_id.get())
		.bind(level.as_i64())
		.execute(&self.pool)
		.await?;

		tracing::info!(%category_id, %user_id, %level, "category permission set");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(category_id = %category_id))]
	pub async fn list_permissions_for_category(
		&self,
		category_id: CategoryId,
	) -> Result<Vec<CategoryGrant>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT category_id, user_id, level FROM category_permissions
			WHERE category_id = ?
			ORDER BY user_id ASC
			"#,
		)
		.bind(category_id.get())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(parse_grant_row).collect()
	}

	#[tracing::instrument(skip(self), fields(user_id = %user_id))]
	pub async fn list_grants_for_user(&self, user_id: UserId) -> Result<Vec<CategoryGrant>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT category_id, user_id, level FROM category_permissions
			WHERE user_id = ?
			ORDER BY category_id ASC
			"#,
		)
		.bind(user_id.get())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(parse_grant_row).collect()
	}
}

fn parse_grant_row(row: &sqlx::sqlite::SqliteRow) -> Result<CategoryGrant, DbError> {
	Ok(CategoryGrant {
		category_id: CategoryId::new(row.get("category_id")),
		user_id: UserId::new(row.get("user_id")),
		level: parse_level(row.get("level"))?,
	})
}

#[async_trait]
impl PermissionStore for PermissionRepository {
	async fn get_permission(
		&self,
		category_id: CategoryId,
		user_id: UserId,
	) -> Result<Option<PermissionLevel>, DbError> {
		self.get_permission(category_id, user_id).await
	}

	async fn upsert_permission(
		&self,
		category_id: CategoryId,
		user_id: UserId,
		level: PermissionLevel,
	) -> Result<(), DbError> {
		self.upsert_permission(category_id, user_id, level).await
	}

	async fn list_permissions_for_category(
		&self,
		category_id: CategoryId,
	) -> Result<Vec<CategoryGrant>, DbError> {
		self.list_permissions_for_category(category_id).await
	}

	async fn list_grants_for_user(&self, user_id: UserId) -> Result<Vec<CategoryGrant>, DbError> {
		self.list_grants_for_user(user_id).await
	}
}

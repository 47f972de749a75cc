// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::Utc;
use forum_server_auth::{Category, CategoryId};
use sqlx::Row;

use super::ContentRepository;
use crate::error::{conflict_on_unique, DbError};
use crate::rows::parse_timestamp;

impl ContentRepository {
	/// Create a category. New categories are public and unlocked.
	///
	/// # Errors
	/// Returns `DbError::Conflict` if the name is taken.
	#[tracing::instrument(skip(self, description))]
	pub async fn create_category(
		&self,
		name: &str,
		description: Option<&str>,
	) -> Result<Category, DbError> {
		let created_at = Utc::now();
		let result = sqlx::query(
			r#"
			INSERT INTO categories (name, description, hidden, locked, created_at)
			VALUES (?, ?, 0, 0, ?)
			"#,
		)
		.bind(name)
		.bind(description)
		.bind(created_at.to_rfc3339())
		.execute(&self.pool)
		.await
		.map_err(|e| conflict_on_unique(e, "Category"))?;

		let id = CategoryId::new(result.last_insert_rowid());
		tracing::info!(category_id = %id, name, "category created");

		Ok(Category {
			id,
			name: name.to_string(),
			description: description.map(str::to_string),
			hidden: false,
			locked: false,
			created_at,
		})
	}

	#[tracing::instrument(skip(self), fields(category_id = %id))]
	pub async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, name, description, hidden, locked, created_at
			FROM categories
			WHERE id = ?
			"#,
		)
		.bind(id.get())
		.fetch_optional(&self.pool)
		.await?;

		row.as_ref().map(parse_category_row).transpose()
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_categories(&self) -> Result<Vec<Category>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, name, description, hidden, locked, created_at
			FROM categories
			ORDER BY id ASC
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(parse_category_row).collect()
	}

	#[tracing::instrument(skip(self), fields(category_id = %id))]
	pub async fn set_category_hidden(&self, id: CategoryId, hidden: bool) -> Result<bool, DbError> {
		let result = sqlx::query("UPDATE categories SET hidden = ? WHERE id = ?")
			.bind(hidden as i32)
			.bind(id.get())
			.execute(&self.pool)
			.await?;

		let found = result.rows_affected() > 0;
		if found {
			tracing::info!(category_id = %id, hidden, "category visibility changed");
		}
		Ok(found)
	}

	#[tracing::instrument(skip(self), fields(category_id = %id))]
	pub async fn set_category_locked(&self, id: CategoryId, locked: bool) -> Result<bool, DbError> {
		let result = sqlx::query("UPDATE categories SET locked = ? WHERE id = ?")
			.bind(locked as i32)
			.bind(id.get())
			.execute(&self.pool)
			.await?;

		let found = result.rows_affected() > 0;
		if found {
			tracing::info!(category_id = %id, locked, "category lock changed");
		}
		Ok(found)
	}
}

fn parse_category_row(row: &sqlx::sqlite::SqliteRow) -> Result<Category, DbError> {
	let hidden: i64 = row.get("hidden");
	let locked: i64 = row.get("locked");
	let created_at: String = row.get("created_at");

	Ok(Category {
		id: CategoryId::new(row.get("id")),
		name: row.get("name"),
		description: row.get("description"),
		hidden: hidden != 0,
		locked: locked != 0,
		created_at: parse_timestamp("created_at", &created_at)?,
	})
}

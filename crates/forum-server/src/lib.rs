// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Forum server administration.
//!
//! Wires configuration, logging, the SQLite pool and the [`ForumService`]
//! together, and implements the commands of the `forum-server` binary.

pub mod commands;
pub mod version;

use std::sync::Arc;

use anyhow::Context;
use forum_server_auth::JwtTokenCodec;
use forum_server_config::{LogFormat, LoggingConfig, ServerConfig};
use forum_server_engine::{ForumService, ForumStores};
use sqlx::SqlitePool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| config.level.clone().into());
	let registry = tracing_subscriber::registry().with(filter);

	let installed = match config.format {
		LogFormat::Json => registry
			.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
			.try_init(),
		LogFormat::Text => registry
			.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
			.try_init(),
	};
	installed.context("failed to install tracing subscriber")
}

/// Open the database and apply the schema.
pub async fn open_database(config: &ServerConfig) -> anyhow::Result<SqlitePool> {
	let pool = forum_server_db::create_pool(&config.database.url)
		.await
		.with_context(|| format!("failed to open database {}", config.database.url))?;
	forum_server_db::run_migrations(&pool)
		.await
		.context("failed to apply migrations")?;
	Ok(pool)
}

/// Build the service over an opened pool.
pub fn build_service(config: &ServerConfig, pool: SqlitePool) -> anyhow::Result<ForumService> {
	let ttl = i64::try_from(config.auth.token_ttl_secs)
		.ok()
		.and_then(chrono::Duration::try_seconds)
		.context("token_ttl_secs is out of range")?;
	let codec = Arc::new(JwtTokenCodec::new(
		&config.auth.token_secret,
		config.auth.issuer.clone(),
	));

	Ok(ForumService::new(
		ForumStores::sqlite(pool),
		codec,
		ttl,
		config.auth.issuer.clone(),
	))
}

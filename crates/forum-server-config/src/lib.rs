// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for the forum server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`FORUM_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use forum_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("database at {}", config.database.url);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::PathBuf;

use tracing::{debug, info};

/// Minimum accepted length of the token signing secret, in bytes.
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
	pub database: DatabaseConfig,
	pub auth: AuthConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`FORUM_SERVER_*`)
/// 2. Config file (`/etc/forum/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<ServerConfig, ConfigError> {
	let mut merged = ServerConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let database = layer.database.unwrap_or_default().finalize();
	let auth = layer.auth.unwrap_or_default().finalize()?;
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&auth)?;

	info!(
		database = %database.url,
		token_ttl_secs = auth.token_ttl_secs,
		issuer = %auth.issuer,
		log_level = %logging.level,
		log_format = %logging.format,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		database,
		auth,
		logging,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(auth: &AuthConfig) -> Result<(), ConfigError> {
	if auth.token_secret.len() < MIN_TOKEN_SECRET_LEN {
		return Err(ConfigError::Validation(format!(
			"FORUM_SERVER_TOKEN_SECRET must be at least {MIN_TOKEN_SECRET_LEN} bytes"
		)));
	}

	if auth.token_ttl_secs == 0 {
		return Err(ConfigError::Validation(
			"auth.token_ttl_secs must be greater than zero".to_string(),
		));
	}

	if auth.token_ttl_secs > MAX_TOKEN_TTL_SECS {
		return Err(ConfigError::Validation(format!(
			"auth.token_ttl_secs must be at most {MAX_TOKEN_TTL_SECS}"
		)));
	}

	Ok(())
}

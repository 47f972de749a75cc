// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Token authentication configuration.

use forum_common_config::SecretString;
use serde::Deserialize;

use crate::error::ConfigError;

/// Tokens live for eight hours unless configured otherwise.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 8 * 60 * 60;
pub const DEFAULT_ISSUER: &str = "forum-server";

/// Authentication configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct AuthConfig {
	/// HMAC key used to sign and verify bearer tokens.
	pub token_secret: SecretString,
	pub token_ttl_secs: u64,
	pub issuer: String,
}

/// Authentication configuration layer (partial, for merging).
///
/// The signing secret is only ever taken from the environment, never from
/// the TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(skip)]
	pub token_secret: Option<SecretString>,
	#[serde(default)]
	pub token_ttl_secs: Option<u64>,
	#[serde(default)]
	pub issuer: Option<String>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.token_secret.is_some() {
			self.token_secret = other.token_secret;
		}
		if other.token_ttl_secs.is_some() {
			self.token_ttl_secs = other.token_ttl_secs;
		}
		if other.issuer.is_some() {
			self.issuer = other.issuer;
		}
	}

	pub fn finalize(self) -> Result<AuthConfig, ConfigError> {
		let token_secret = self
			.token_secret
			.ok_or_else(|| ConfigError::MissingSecret("FORUM_SERVER_TOKEN_SECRET".to_string()))?;

		Ok(AuthConfig {
			token_secret,
			token_ttl_secs: self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS),
			issuer: self.issuer.unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
		})
	}
}

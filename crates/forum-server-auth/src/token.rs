// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bearer tokens.
//!
//! A token carries the username (`sub`), issue time, expiry and issuer,
//! signed with HS256 under a server-held secret. Verification checks the
//! signature, the issuer and the expiry; the user named by `sub` is resolved
//! against storage by the caller.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use forum_common_config::SecretString;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The `token_type` reported alongside every issued token.
pub const TOKEN_TYPE: &str = "bearer";

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
	#[error("token has expired")]
	Expired,

	#[error("malformed token: {0}")]
	Malformed(String),

	#[error("failed to sign token: {0}")]
	Signing(String),
}

/// JWT claims for forum access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
	/// Username of the bearer.
	pub sub: String,
	/// Issued at (seconds since epoch).
	pub iat: i64,
	/// Expiration (seconds since epoch).
	pub exp: i64,
	pub iss: String,
}

impl Claims {
	/// Claims issued at `issued_at` that expire `ttl` later.
	///
	/// # Errors
	/// `Signing` if the expiry falls outside the representable time range.
	pub fn new(
		subject: impl Into<String>,
		issuer: impl Into<String>,
		issued_at: DateTime<Utc>,
		ttl: Duration,
	) -> Result<Self, TokenError> {
		let expires_at = issued_at
			.checked_add_signed(ttl)
			.ok_or_else(|| TokenError::Signing(format!("token lifetime {ttl} overflows")))?;

		Ok(Self {
			sub: subject.into(),
			iat: issued_at.timestamp(),
			exp: expires_at.timestamp(),
			iss: issuer.into(),
		})
	}

	pub fn expires_at(&self) -> DateTime<Utc> {
		DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
	}

	/// A token is expired from the second named by `exp` onwards.
	pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
		now.timestamp() >= self.exp
	}
}

/// A freshly issued token as handed to the client.
#[derive(Clone, Serialize, Deserialize)]
pub struct IssuedToken {
	pub access_token: String,
	pub token_type: String,
	pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
	pub fn bearer(access_token: String, expires_at: DateTime<Utc>) -> Self {
		Self {
			access_token,
			token_type: TOKEN_TYPE.to_string(),
			expires_at,
		}
	}
}

impl fmt::Debug for IssuedToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("IssuedToken")
			.field("access_token", &forum_common_config::REDACTED)
			.field("token_type", &self.token_type)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Signs and verifies bearer tokens.
pub trait TokenCodec: Send + Sync {
	fn sign(&self, claims: &Claims) -> Result<String, TokenError>;

	/// Verifies signature, issuer and expiry, returning the claims.
	fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

/// HS256 JWT codec keyed by a shared secret.
#[derive(Clone)]
pub struct JwtTokenCodec {
	encoding_key: EncodingKey,
	decoding_key: DecodingKey,
	validation: Validation,
	issuer: String,
}

impl JwtTokenCodec {
	pub fn new(secret: &SecretString, issuer: impl Into<String>) -> Self {
		let issuer = issuer.into();
		let key = secret.expose().as_bytes();

		let mut validation = Validation::new(Algorithm::HS256);
		// Expiry is checked against our own clock with no leeway.
		validation.validate_exp = false;
		validation.leeway = 0;
		validation.set_required_spec_claims(&["exp", "sub", "iss"]);
		validation.set_issuer(&[issuer.as_str()]);

		Self {
			encoding_key: EncodingKey::from_secret(key),
			decoding_key: DecodingKey::from_secret(key),
			validation,
			issuer,
		}
	}

	/// Verifies a token as of `now`.
	pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
		let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
			.map_err(|e| TokenError::Malformed(e.to_string()))?;

		if data.claims.is_expired_at(now) {
			debug!(sub = %data.claims.sub, exp = data.claims.exp, "token expired");
			return Err(TokenError::Expired);
		}

		Ok(data.claims)
	}
}

impl fmt::Debug for JwtTokenCodec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("JwtTokenCodec")
			.field("issuer", &self.issuer)
			.field("key", &forum_common_config::REDACTED)
			.finish()
	}
}

impl TokenCodec for JwtTokenCodec {
	#[instrument(skip(self, claims), fields(sub = %claims.sub))]
	fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
		encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
			.map_err(|e| TokenError::Signing(e.to_string()))
	}

	fn verify(&self, token: &str) -> Result<Claims, TokenError> {
		self.verify_at(token, Utc::now())
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account creation, login and token resolution.

use std::sync::Arc;

use chrono::{Duration, Utc};
use forum_server_auth::{
	hash_password, validate_email, validate_password, validate_username, verify_password, Claims,
	IssuedToken, Principal, TokenCodec, User, UserProfile,
};
use forum_server_db::{NewUser, UserStore};
use tracing::instrument;

use crate::error::{ForumError, Result};

/// Issues tokens and turns them back into principals.
///
/// Tokens are bearer-only and cannot be revoked; expiry is the only way a
/// token stops working.
#[derive(Clone)]
pub struct TokenAuthority {
	codec: Arc<dyn TokenCodec>,
	users: Arc<dyn UserStore>,
	ttl: Duration,
	issuer: String,
}

impl TokenAuthority {
	pub fn new(
		codec: Arc<dyn TokenCodec>,
		users: Arc<dyn UserStore>,
		ttl: Duration,
		issuer: impl Into<String>,
	) -> Self {
		Self {
			codec,
			users,
			ttl,
			issuer: issuer.into(),
		}
	}

	/// Creates a regular account.
	#[instrument(skip(self, email, password))]
	pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<UserProfile> {
		self.create_account(username, email, password, false).await
	}

	/// Creates an administrator account. Only reachable from the
	/// administrative binary, never through a token.
	#[instrument(skip(self, email, password))]
	pub async fn create_admin(
		&self,
		username: &str,
		email: &str,
		password: &str,
	) -> Result<UserProfile> {
		self.create_account(username, email, password, true).await
	}

	async fn create_account(
		&self,
		username: &str,
		email: &str,
		password: &str,
		is_admin: bool,
	) -> Result<UserProfile> {
		validate_username(username).map_err(|e| ForumError::InvalidInput(e.to_string()))?;
		validate_email(email).map_err(|e| ForumError::InvalidInput(e.to_string()))?;
		validate_password(password).map_err(|e| ForumError::InvalidInput(e.to_string()))?;

		let password_hash = hash_password(password)?;
		let user = self
			.users
			.create_user(&NewUser {
				username: username.to_string(),
				email: email.to_string(),
				password_hash,
				is_admin,
			})
			.await?;

		tracing::info!(user_id = %user.id, is_admin, "account registered");
		Ok(user.to_profile())
	}

	/// Exchanges a username and password for a token.
	///
	/// An unknown user and a wrong password fail identically.
	#[instrument(skip(self, password))]
	pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken> {
		let Some(user) = self.users.get_user_by_username(username).await? else {
			tracing::debug!("login for unknown user");
			return Err(ForumError::InvalidCredentials);
		};

		if !verify_password(password, &user.password_hash)? {
			tracing::debug!(user_id = %user.id, "login with wrong password");
			return Err(ForumError::InvalidCredentials);
		}

		self.issue(&user)
	}

	/// Signs a fresh token for `user`.
	pub fn issue(&self, user: &User) -> Result<IssuedToken> {
		let claims = Claims::new(&user.username, &self.issuer, Utc::now(), self.ttl)?;
		let token = self.codec.sign(&claims)?;
		tracing::info!(user_id = %user.id, exp = claims.exp, "token issued");
		Ok(IssuedToken::bearer(token, claims.expires_at()))
	}

	/// Resolves a token to the user it names.
	///
	/// # Errors
	/// `InvalidToken` if the token is malformed, badly signed or expired;
	/// `AccessDenied` if it names a user that does not exist.
	#[instrument(skip(self, token))]
	pub async fn resolve_user(&self, token: &str) -> Result<User> {
		let claims = self.codec.verify(token)?;

		match self.users.get_user_by_username(&claims.sub).await? {
			Some(user) => Ok(user),
			None => {
				tracing::debug!(sub = %claims.sub, "token names unknown user");
				Err(ForumError::AccessDenied)
			}
		}
	}

	pub async fn resolve(&self, token: &str) -> Result<Principal> {
		Ok(self.resolve_user(token).await?.principal())
	}

	/// Like [`resolve`](Self::resolve), but only admits administrators.
	pub async fn resolve_admin(&self, token: &str) -> Result<Principal> {
		let principal = self.resolve(token).await?;
		if !principal.is_admin {
			tracing::debug!(user_id = %principal.id, "admin required");
			return Err(ForumError::AccessDenied);
		}
		Ok(principal)
	}
}

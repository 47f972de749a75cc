// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Errors returned by forum operations.
//!
//! Every kind is final: retrying the same request without changing the
//! input or credentials gives the same answer.

use forum_server_auth::{PasswordError, TokenError};
use forum_server_db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum ForumError {
	#[error("invalid or expired token")]
	InvalidToken,

	#[error("access denied")]
	AccessDenied,

	#[error("category not found")]
	CategoryNotFound,

	#[error("topic not found")]
	TopicNotFound,

	#[error("reply not found")]
	ReplyNotFound,

	#[error("user not found")]
	UserNotFound,

	#[error("topic is locked")]
	TopicLocked,

	#[error("category is locked")]
	CategoryLocked,

	#[error("reply is not accessible")]
	ReplyNotAccessible,

	#[error("invalid username or password")]
	InvalidCredentials,

	#[error("invalid input: {0}")]
	InvalidInput(String),

	#[error("conflict: {0}")]
	Conflict(String),

	#[error("internal error: {0}")]
	InternalError(String),
}

impl ForumError {
	/// Stable machine-readable code.
	pub fn code(&self) -> &'static str {
		match self {
			ForumError::InvalidToken => "invalid_token",
			ForumError::AccessDenied => "access_denied",
			ForumError::CategoryNotFound => "category_not_found",
			ForumError::TopicNotFound => "topic_not_found",
			ForumError::ReplyNotFound => "reply_not_found",
			ForumError::UserNotFound => "user_not_found",
			ForumError::TopicLocked => "topic_locked",
			ForumError::CategoryLocked => "category_locked",
			ForumError::ReplyNotAccessible => "reply_not_accessible",
			ForumError::InvalidCredentials => "invalid_credentials",
			ForumError::InvalidInput(_) => "invalid_input",
			ForumError::Conflict(_) => "conflict",
			ForumError::InternalError(_) => "internal_error",
		}
	}

	pub fn is_retryable(&self) -> bool {
		false
	}
}

impl From<DbError> for ForumError {
	fn from(e: DbError) -> Self {
		match e {
			DbError::Conflict(message) => ForumError::Conflict(message),
			other => {
				tracing::error!(error = %other, "storage failure");
				ForumError::InternalError(other.to_string())
			}
		}
	}
}

impl From<TokenError> for ForumError {
	fn from(e: TokenError) -> Self {
		match &e {
			TokenError::Signing(message) => ForumError::InternalError(message.clone()),
			TokenError::Expired | TokenError::Malformed(_) => {
				tracing::debug!(error = %e, "token rejected");
				ForumError::InvalidToken
			}
		}
	}
}

impl From<PasswordError> for ForumError {
	fn from(e: PasswordError) -> Self {
		ForumError::InternalError(e.to_string())
	}
}

pub type Result<T> = std::result::Result<T, ForumError>;

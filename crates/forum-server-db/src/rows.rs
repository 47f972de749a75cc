// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Column decoding shared by the repositories.

use chrono::{DateTime, Utc};
use forum_server_auth::PermissionLevel;

use crate::error::DbError;

pub(crate) fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>, DbError> {
	DateTime::parse_from_rfc3339(value)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
}

pub(crate) fn parse_level(value: i64) -> Result<PermissionLevel, DbError> {
	PermissionLevel::try_from(value).map_err(|e| DbError::Internal(e.to_string()))
}

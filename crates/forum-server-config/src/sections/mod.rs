// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod auth;
mod database;
mod logging;

pub use auth::{AuthConfig, AuthConfigLayer, DEFAULT_ISSUER, DEFAULT_TOKEN_TTL_SECS};
pub use database::{DatabaseConfig, DatabaseConfigLayer, DEFAULT_DATABASE_URL};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};

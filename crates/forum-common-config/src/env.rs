// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Environment helpers for secrets.
//!
//! A secret named `FOO` may be supplied either directly (`FOO=value`) or via a
//! file (`FOO_FILE=/run/secrets/foo`). Setting both is an error so that a
//! stale variable can't silently shadow a mounted secret.

use std::path::PathBuf;

use crate::secret::SecretString;

/// Errors from [`load_secret_env`].
#[derive(Debug, thiserror::Error)]
pub enum SecretEnvError {
	#[error("both {name} and {name}_FILE are set; use only one")]
	BothSet { name: String },

	#[error("failed to read {name}_FILE at {path}: {source}")]
	FileRead {
		name: String,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Load a secret from `name` or `name_FILE`.
///
/// Returns `Ok(None)` when neither variable is set (or both are empty).
/// Trailing newlines are trimmed from file contents.
pub fn load_secret_env(name: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let direct = std::env::var(name).ok().filter(|s| !s.is_empty());
	let file_var = format!("{name}_FILE");
	let file = std::env::var(&file_var).ok().filter(|s| !s.is_empty());

	match (direct, file) {
		(Some(_), Some(_)) => Err(SecretEnvError::BothSet {
			name: name.to_string(),
		}),
		(Some(value), None) => Ok(Some(SecretString::new(value))),
		(None, Some(path)) => {
			let path = PathBuf::from(path);
			let content = std::fs::read_to_string(&path).map_err(|source| SecretEnvError::FileRead {
				name: name.to_string(),
				path: path.clone(),
				source,
			})?;
			let trimmed = content.trim_end_matches(['\n', '\r']).to_string();
			Ok(Some(SecretString::new(trimmed)))
		}
		(None, None) => Ok(None),
	}
}

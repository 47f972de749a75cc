// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Password hashing.

use argon2::password_hash::{
	rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};

use crate::argon2_config::argon2_instance;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
	#[error("failed to hash password")]
	Hash,

	#[error("stored password hash is malformed")]
	MalformedHash,
}

/// Hashes a password into an Argon2id PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
	let salt = SaltString::generate(&mut OsRng);
	argon2_instance()
		.hash_password(password.as_bytes(), &salt)
		.map(|hash| hash.to_string())
		.map_err(|_| PasswordError::Hash)
}

/// Verifies a password against a stored PHC string.
///
/// The parameters are read from the stored hash, so hashes produced with
/// different cost settings still verify.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
	let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::MalformedHash)?;
	Ok(argon2_instance()
		.verify_password(password.as_bytes(), &parsed)
		.is_ok())
}

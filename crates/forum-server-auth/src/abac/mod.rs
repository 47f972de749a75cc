// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Attribute-based access control for forum categories.
//!
//! Decisions are pure: the caller loads the subject, the category attributes
//! and, when [`grant_required`] says so, the subject's stored grant, then asks
//! [`is_allowed`].

mod engine;
mod types;

pub use engine::{grant_required, is_allowed};
pub use types::{Action, CategoryAttrs};

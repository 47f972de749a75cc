// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! ABAC policy evaluation engine.
//!
//! Evaluation is two-phase:
//!
//! 1. **Global role check**: administrators may do anything, and nobody else
//!    may administer.
//! 2. **Category policy**: public categories are open to every authenticated
//!    user; hidden ones need an explicit grant of the matching level.

use tracing::instrument;

use super::types::{Action, CategoryAttrs};
use crate::types::{PermissionLevel, Principal};

/// Returns true when the decision for this request depends on the subject's
/// stored grant.
///
/// Callers use this to skip the grant lookup when the answer is already
/// fixed by the subject's role or the category's visibility.
pub fn grant_required(subject: &Principal, action: Action, resource: &CategoryAttrs) -> bool {
	!subject.is_admin && resource.hidden && action != Action::Administer
}

/// Evaluates whether `subject` may perform `action` on a category.
///
/// `level` is the subject's effective level on the category: the stored
/// grant, or [`PermissionLevel::DEFAULT`] when there is none. It is ignored
/// for administrators and public categories.
#[instrument(
    level = "debug",
    skip(subject, resource),
    fields(
        user_id = %subject.id,
        category_id = %resource.category_id,
        action = ?action,
        hidden = resource.hidden,
    )
)]
pub fn is_allowed(
	subject: &Principal,
	action: Action,
	resource: &CategoryAttrs,
	level: PermissionLevel,
) -> bool {
	if let Some(decision) = check_global_roles(subject, action) {
		return decision;
	}

	if !resource.hidden {
		return true;
	}

	match action {
		Action::Read => level != PermissionLevel::NoAccess && level >= PermissionLevel::Read,
		Action::Write => level >= PermissionLevel::Write,
		Action::Administer => false,
	}
}

fn check_global_roles(subject: &Principal, action: Action) -> Option<bool> {
	if subject.is_admin {
		return Some(true);
	}

	if action == Action::Administer {
		return Some(false);
	}

	None
}

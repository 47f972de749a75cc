// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod accounts;
mod categories;
mod replies;
mod scenarios;
pub mod support;
mod topics;

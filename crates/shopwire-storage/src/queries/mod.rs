// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules. All functions accept `&Database` and serialize
//! through the single writer thread.

pub mod categories;
pub mod customers;
pub mod sessions;

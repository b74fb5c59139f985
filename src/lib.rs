// Copyright 2026 The Pomelo Emulator Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Pomelo HLE Kernel - Object Model & Resource Quotas
//!
//! This crate implements the host-side core of the emulated console kernel's
//! object model: the closed taxonomy of kernel object kinds, the polymorphic
//! object seam queried by handle tables and wait primitives, and the
//! per-category resource quota accounting that mirrors the retail kernel's
//! limits.
//!
//! # Design
//!
//! - **Closed taxonomy**: [`HandleType`] enumerates every kernel object kind;
//!   waitability is derived by an exhaustive match, so an unclassified kind
//!   cannot exist at runtime.
//! - **Quota accounting**: one [`ResourceLimit`] per process category bounds
//!   how many of each resource kind guest processes may hold; checked
//!   increments keep `current <= max` under concurrent creation.
//! - **Explicit lifecycle**: [`KernelContext`] owns the four category limits
//!   for one emulated kernel instance; construction and drop replace the
//!   global init/shutdown pair.
//!
//! # Modules
//!
//! - [`object`] - Kernel object taxonomy and the resource limit engine
//! - [`context`] - Per-kernel-instance registry of category limits
//! - [`errors`] - Crate error types

pub mod context;
pub mod errors;
pub mod object;

// Re-exports
pub use context::KernelContext;
pub use errors::{Error, Result};
pub use object::{
    HandleType, KernelObject, ObjectRef, ResourceLimit, ResourceLimitCategory, ResourceType,
};

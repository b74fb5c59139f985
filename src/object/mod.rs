// Copyright 2026 The Pomelo Emulator Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Kernel Objects
//!
//! This module implements the emulated kernel's object model. Every kernel
//! resource the guest can hold a handle to is classified by a fixed
//! [`HandleType`], and the wait-synchronization subsystem derives handle
//! waitability from that tag alone.
//!
//! # Design
//!
//! - **Closed taxonomy**: object kinds form a fixed enumeration; adding a
//!   kind forces the waitability match to be extended in the same change
//! - **Object seam**: concrete kernel objects (threads, events, timers, ...)
//!   implement [`KernelObject`] and are shared across handle tables
//! - **Quota accounting**: [`ResourceLimit`] tracks per-category max/current
//!   counters for the ten bounded resource kinds
//!
//! # Modules
//!
//! - [`base`] - Handle type taxonomy and the kernel object seam
//! - [`resource_limit`] - Per-category resource quota engine

pub mod base;
pub mod resource_limit;

// Re-exports
pub use base::{HandleType, KernelObject, ObjectRef};
pub use resource_limit::{ResourceLimit, ResourceLimitCategory, ResourceType};

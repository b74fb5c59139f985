// Copyright 2026 The Pomelo Emulator Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Common error types used throughout the kernel core

use crate::object::ResourceType;

/// Result type for operations that can fail
pub type Result<T = ()> = core::result::Result<T, Error>;

/// Errors surfaced by the kernel object model
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A creation attempt would push a quota counter past its limit.
    ///
    /// Recoverable: the guest request that triggered the creation is denied
    /// and the emulated kernel keeps running.
    #[error("resource limit reached for {}", .resource.name())]
    LimitReached {
        /// The resource kind whose quota was exhausted
        resource: ResourceType,
    },
}

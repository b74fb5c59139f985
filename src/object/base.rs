// Copyright 2026 The Pomelo Emulator Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Handle Type Taxonomy & Kernel Object Seam
//!
//! This module defines the closed enumeration of kernel object kinds and the
//! trait every concrete kernel object implements. Handle tables and the
//! wait-synchronization subsystem query these to decide whether a handle may
//! participate in wait-any/wait-all operations.
//!
//! # Design
//!
//! - **Fixed kind tag**: an object's [`HandleType`] is set at construction
//!   and never changes
//! - **Derived waitability**: `is_waitable` is a total function of the kind,
//!   computed by an exhaustive match with no fallthrough arm; a kind that is
//!   not classified does not compile
//! - **Shared ownership**: objects live in one or more per-process handle
//!   tables and are destroyed when the last referencing table drops them
//!
//! # Usage
//!
//! ```rust
//! use pomelo_kernel::object::HandleType;
//!
//! assert!(HandleType::Event.is_waitable());
//! assert!(!HandleType::SharedMemory.is_waitable());
//! ```

use std::sync::Arc;

/// ============================================================================
/// Handle Types
/// ============================================================================

/// Kernel object kind
///
/// Closed enumeration tagging the kind of kernel object behind a handle.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleType {
    /// Unknown kind (placeholder for untagged objects)
    Unknown = 0,

    /// Event object
    Event = 1,

    /// Thread object
    Thread = 2,

    /// Timer object
    Timer = 3,

    /// Server endpoint of a port
    ServerPort = 4,

    /// Server endpoint of a session
    ServerSession = 5,

    /// Shared memory block
    SharedMemory = 6,

    /// Process object
    Process = 7,

    /// Address arbiter
    AddressArbiter = 8,

    /// Resource limit set
    ResourceLimit = 9,

    /// Code set (loaded executable image)
    CodeSet = 10,

    /// Client endpoint of a port
    ClientPort = 11,

    /// Client endpoint of a session
    ClientSession = 12,
}

impl HandleType {
    /// Number of defined kinds
    pub const COUNT: usize = 13;

    /// Every defined kind, in tag order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Unknown,
        Self::Event,
        Self::Thread,
        Self::Timer,
        Self::ServerPort,
        Self::ServerSession,
        Self::SharedMemory,
        Self::Process,
        Self::AddressArbiter,
        Self::ResourceLimit,
        Self::CodeSet,
        Self::ClientPort,
        Self::ClientSession,
    ];

    /// Create from raw value
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::Event,
            2 => Self::Thread,
            3 => Self::Timer,
            4 => Self::ServerPort,
            5 => Self::ServerSession,
            6 => Self::SharedMemory,
            7 => Self::Process,
            8 => Self::AddressArbiter,
            9 => Self::ResourceLimit,
            10 => Self::CodeSet,
            11 => Self::ClientPort,
            12 => Self::ClientSession,
            _ => Self::Unknown,
        }
    }

    /// Get raw value
    pub const fn into_raw(self) -> u32 {
        self as u32
    }

    /// Get name as string
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Event => "event",
            Self::Thread => "thread",
            Self::Timer => "timer",
            Self::ServerPort => "server_port",
            Self::ServerSession => "server_session",
            Self::SharedMemory => "shared_memory",
            Self::Process => "process",
            Self::AddressArbiter => "address_arbiter",
            Self::ResourceLimit => "resource_limit",
            Self::CodeSet => "code_set",
            Self::ClientPort => "client_port",
            Self::ClientSession => "client_session",
        }
    }

    /// Check whether handles of this kind can be waited on
    ///
    /// A waitable handle may be passed to the wait-any/wait-all primitives;
    /// the caller blocks until the object is signaled. The match is
    /// exhaustive on purpose: a new kind cannot be added without classifying
    /// it here.
    pub const fn is_waitable(self) -> bool {
        match self {
            Self::Event | Self::Thread | Self::Timer | Self::ServerPort | Self::ServerSession => {
                true
            }

            Self::Unknown
            | Self::SharedMemory
            | Self::Process
            | Self::AddressArbiter
            | Self::ResourceLimit
            | Self::CodeSet
            | Self::ClientPort
            | Self::ClientSession => false,
        }
    }
}

/// ============================================================================
/// Kernel Object Seam
/// ============================================================================

/// Common interface of all emulated kernel objects
///
/// Every concrete kernel object (thread, event, timer, session, ...) exposes
/// its fixed kind tag through this trait. Waitability is provided here as a
/// pure function of the tag and is not overridable per type, so every object
/// of the same kind behaves identically under wait operations.
pub trait KernelObject: Send + Sync {
    /// Fixed kind tag, set at construction
    fn handle_type(&self) -> HandleType;

    /// Diagnostic name of this object instance
    fn name(&self) -> String {
        String::from("Unknown")
    }

    /// Check whether this object can be waited on
    fn is_waitable(&self) -> bool {
        self.handle_type().is_waitable()
    }
}

/// Shared reference to a kernel object
///
/// Objects are shared across per-process handle tables; the object is
/// destroyed when the last referencing table releases it.
pub type ObjectRef = Arc<dyn KernelObject>;

/// ============================================================================
/// Tests
/// ============================================================================

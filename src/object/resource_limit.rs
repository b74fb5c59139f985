// Copyright 2026 The Pomelo Emulator Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Resource Limits
//!
//! Resource limits bound how many of each kernel resource kind the processes
//! of one category may hold concurrently. Object creation routines perform a
//! checked increment against their category's limit before finalizing
//! creation, and the matching decrement on destruction.
//!
//! # Design
//!
//! - **Closed categories**: limits are keyed by [`ResourceLimitCategory`];
//!   an invalid category is unrepresentable
//! - **Immutable bounds**: `max` values are written once at construction,
//!   only the usage counters move afterwards
//! - **Atomic enforcement**: check-then-increment runs under the counter
//!   lock, so `current <= max` holds under concurrent creators
//!
//! # Usage
//!
//! ```rust
//! use pomelo_kernel::object::{ResourceLimit, ResourceType};
//!
//! let limit = ResourceLimit::new("Test");
//! assert_eq!(limit.max_value(ResourceType::Thread), 0);
//! assert!(limit.reserve(ResourceType::Thread, 1).is_err());
//! ```

use crate::errors::{Error, Result};
use crate::object::base::{HandleType, KernelObject};
use spin::Mutex;
use std::sync::Arc;

/// ============================================================================
/// Resource Types
/// ============================================================================

/// Bounded resource kind
///
/// The ten resource kinds the kernel accounts for per category.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// Max thread priority processes in a category may use
    Priority = 0,

    /// Committed memory, in bytes
    Commit = 1,

    /// Thread objects
    Thread = 2,

    /// Event objects
    Event = 3,

    /// Mutex objects
    Mutex = 4,

    /// Semaphore objects
    Semaphore = 5,

    /// Timer objects
    Timer = 6,

    /// Shared memory blocks
    SharedMemory = 7,

    /// Address arbiters
    AddressArbiter = 8,

    /// CPU time budget
    CpuTime = 9,
}

impl ResourceType {
    /// Number of resource kinds
    pub const COUNT: usize = 10;

    /// Every resource kind, in tag order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Priority,
        Self::Commit,
        Self::Thread,
        Self::Event,
        Self::Mutex,
        Self::Semaphore,
        Self::Timer,
        Self::SharedMemory,
        Self::AddressArbiter,
        Self::CpuTime,
    ];

    /// Get raw value
    pub const fn into_raw(self) -> u32 {
        self as u32
    }

    /// Counter array index for this kind
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Get name as string
    pub const fn name(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Commit => "commit",
            Self::Thread => "thread",
            Self::Event => "event",
            Self::Mutex => "mutex",
            Self::Semaphore => "semaphore",
            Self::Timer => "timer",
            Self::SharedMemory => "shared_memory",
            Self::AddressArbiter => "address_arbiter",
            Self::CpuTime => "cpu_time",
        }
    }
}

/// ============================================================================
/// Resource Limit Categories
/// ============================================================================

/// Process category selecting which quota set applies
///
/// The partition keeps a misbehaving guest application from starving system
/// services of kernel resources, and vice versa.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceLimitCategory {
    /// The guest title process
    Application = 0,

    /// System applet processes
    SysApplet = 1,

    /// Library applet processes
    LibApplet = 2,

    /// Service modules and everything else
    Other = 3,
}

impl ResourceLimitCategory {
    /// Number of categories
    pub const COUNT: usize = 4;

    /// Every category, in tag order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Application,
        Self::SysApplet,
        Self::LibApplet,
        Self::Other,
    ];

    /// Registry index for this category
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Get name as string
    pub const fn name(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::SysApplet => "sys_applet",
            Self::LibApplet => "lib_applet",
            Self::Other => "other",
        }
    }
}

/// ============================================================================
/// Resource Limit
/// ============================================================================

/// Per-category resource quota set
///
/// Holds the max bound and current usage counter for each of the ten
/// resource kinds. Bounds are fixed at construction; only the counters move.
pub struct ResourceLimit {
    /// Diagnostic name of this limit set
    name: String,

    /// Per-resource bounds; written only during construction
    max: [i32; ResourceType::COUNT],

    /// Per-resource usage counters
    current: Mutex<[i32; ResourceType::COUNT]>,
}

impl ResourceLimit {
    /// Create a resource limit with every bound and counter at zero
    ///
    /// Used for informal and test limits; the system category limits are
    /// built by the kernel context with the retail constants.
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Self::with_limits(name, [0; ResourceType::COUNT])
    }

    /// Create a resource limit with the given bounds
    pub(crate) fn with_limits(
        name: impl Into<String>,
        max: [i32; ResourceType::COUNT],
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            max,
            current: Mutex::new([0; ResourceType::COUNT]),
        })
    }

    /// Get the max value for the specified resource
    pub fn max_value(&self, resource: ResourceType) -> i32 {
        self.max[resource.index()]
    }

    /// Get the current value for the specified resource
    ///
    /// Priority bounds a per-thread attribute rather than an object count,
    /// so it has no live usage counter; the configured ceiling is reported
    /// in its place.
    pub fn current_value(&self, resource: ResourceType) -> i32 {
        match resource {
            ResourceType::Priority => self.max[ResourceType::Priority.index()],
            _ => self.current.lock()[resource.index()],
        }
    }

    /// Reserve quota for a resource about to be created
    ///
    /// Performs the checked increment `current + delta <= max` atomically
    /// with respect to concurrent creators of the same category. A failed
    /// check never leaves the counter incremented.
    ///
    /// # Arguments
    ///
    /// * `resource` - Resource kind being created
    /// * `delta` - Amount to reserve (object count, or bytes for Commit)
    ///
    /// # Returns
    ///
    /// - Ok(()) if the quota was reserved
    /// - Err(Error::LimitReached) if the reservation would exceed the bound
    pub fn reserve(&self, resource: ResourceType, delta: i32) -> Result {
        debug_assert!(delta >= 0, "negative reserve for {}", resource.name());

        let idx = resource.index();
        let mut current = self.current.lock();

        let next = match current[idx].checked_add(delta) {
            Some(next) if next <= self.max[idx] => next,
            _ => {
                log::debug!(
                    "{}: {} quota denied ({} + {} > {})",
                    self.name,
                    resource.name(),
                    current[idx],
                    delta,
                    self.max[idx],
                );
                return Err(Error::LimitReached { resource });
            }
        };

        current[idx] = next;
        Ok(())
    }

    /// Release previously reserved quota
    ///
    /// Invoked by destruction routines; undoes a matching [`reserve`].
    /// Counters never go below zero.
    ///
    /// [`reserve`]: Self::reserve
    pub fn release(&self, resource: ResourceType, delta: i32) {
        debug_assert!(delta >= 0, "negative release for {}", resource.name());

        let idx = resource.index();
        let mut current = self.current.lock();

        debug_assert!(
            current[idx] >= delta,
            "{}: release of {} below zero",
            self.name,
            resource.name(),
        );
        current[idx] = (current[idx] - delta).max(0);
    }
}

impl KernelObject for ResourceLimit {
    fn handle_type(&self) -> HandleType {
        HandleType::ResourceLimit
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// ============================================================================
/// Tests
/// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_fresh_limit_is_zeroed() {
        let limit = ResourceLimit::new("Test");

        for resource in ResourceType::ALL {
            assert_eq!(limit.max_value(resource), 0, "{}", resource.name());
            assert_eq!(limit.current_value(resource), 0, "{}", resource.name());
        }
    }

    #[test]
    fn test_limit_is_a_kernel_object() {
        let limit = ResourceLimit::new("Test");

        assert_eq!(limit.handle_type(), HandleType::ResourceLimit);
        assert!(!limit.is_waitable());
        assert_eq!(KernelObject::name(&*limit), "Test");
    }

    #[test]
    fn test_reserve_and_release() {
        let mut max = [0; ResourceType::COUNT];
        max[ResourceType::Event.index()] = 2;
        let limit = ResourceLimit::with_limits("Events", max);

        assert!(limit.reserve(ResourceType::Event, 1).is_ok());
        assert!(limit.reserve(ResourceType::Event, 1).is_ok());
        assert_eq!(limit.current_value(ResourceType::Event), 2);

        // Third creation is denied and leaves the counter untouched
        let err = limit.reserve(ResourceType::Event, 1).unwrap_err();
        assert_eq!(
            err,
            Error::LimitReached {
                resource: ResourceType::Event
            }
        );
        assert_eq!(limit.current_value(ResourceType::Event), 2);

        limit.release(ResourceType::Event, 1);
        assert_eq!(limit.current_value(ResourceType::Event), 1);
        assert!(limit.reserve(ResourceType::Event, 1).is_ok());
    }

    #[test]
    fn test_reserve_with_delta() {
        let mut max = [0; ResourceType::COUNT];
        max[ResourceType::Commit.index()] = 0x1000;
        let limit = ResourceLimit::with_limits("Commit", max);

        assert!(limit.reserve(ResourceType::Commit, 0x800).is_ok());
        assert!(limit.reserve(ResourceType::Commit, 0x801).is_err());
        assert!(limit.reserve(ResourceType::Commit, 0x800).is_ok());
        assert_eq!(limit.current_value(ResourceType::Commit), 0x1000);
    }

    #[test]
    fn test_reserve_overflow_is_denied() {
        let mut max = [0; ResourceType::COUNT];
        max[ResourceType::Commit.index()] = i32::MAX;
        let limit = ResourceLimit::with_limits("Commit", max);

        assert!(limit.reserve(ResourceType::Commit, i32::MAX).is_ok());
        assert!(limit.reserve(ResourceType::Commit, 1).is_err());
        assert_eq!(limit.current_value(ResourceType::Commit), i32::MAX);
    }

    #[test]
    fn test_priority_reports_ceiling() {
        let mut max = [0; ResourceType::COUNT];
        max[ResourceType::Priority.index()] = 0x18;
        let limit = ResourceLimit::with_limits("Priority", max);

        assert_eq!(limit.max_value(ResourceType::Priority), 0x18);
        assert_eq!(limit.current_value(ResourceType::Priority), 0x18);
    }

    #[test]
    fn test_concurrent_reserve_admits_exactly_max() {
        const MAX_THREADS: i32 = 8;
        const ATTEMPTS: usize = 64;

        let mut max = [0; ResourceType::COUNT];
        max[ResourceType::Thread.index()] = MAX_THREADS;
        let limit = ResourceLimit::with_limits("Race", max);

        let workers: Vec<_> = (0..ATTEMPTS)
            .map(|_| {
                let limit = Arc::clone(&limit);
                thread::spawn(move || limit.reserve(ResourceType::Thread, 1).is_ok())
            })
            .collect();

        let admitted = workers
            .into_iter()
            .map(|w| w.join().unwrap())
            .filter(|admitted| *admitted)
            .count();

        assert_eq!(admitted, MAX_THREADS as usize);
        assert_eq!(limit.current_value(ResourceType::Thread), MAX_THREADS);
    }

    #[test]
    fn test_resource_type_raw_values() {
        // Tag order matches the kernel's resource indices
        for (i, resource) in ResourceType::ALL.iter().enumerate() {
            assert_eq!(resource.into_raw() as usize, i);
        }
    }
}

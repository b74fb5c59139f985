// Copyright 2026 The Pomelo Emulator Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Kernel Context
//!
//! The kernel context owns the process-wide registry of category resource
//! limits for one emulated kernel instance. Object creation routines resolve
//! the creating process's category here, then perform the checked increment
//! against that category's limit.
//!
//! # Design
//!
//! - **Explicit lifecycle**: the four category limits are created together
//!   in the constructor and released together on drop; there is no global
//!   init/shutdown pair to misorder
//! - **Identity stability**: the same category always resolves to the same
//!   limit instance
//! - **Retail constants**: bounds match the limits the console's NATIVE_FIRM
//!   kernel installs for each category
//!
//! # Usage
//!
//! ```rust
//! use pomelo_kernel::{KernelContext, ResourceLimitCategory, ResourceType};
//!
//! let kernel = KernelContext::new();
//! let limit = kernel.resource_limit_for(ResourceLimitCategory::Application);
//! limit.reserve(ResourceType::Thread, 1)?;
//! # Ok::<(), pomelo_kernel::Error>(())
//! ```

use crate::object::resource_limit::{ResourceLimit, ResourceLimitCategory, ResourceType};
use std::sync::Arc;

/// ============================================================================
/// Retail Limit Constants
/// ============================================================================

// Bounds installed by the retail kernel, in ResourceType tag order:
// [priority, commit, thread, event, mutex, semaphore, timer, shared_memory,
//  address_arbiter, cpu_time]

/// Limits for the guest title process
const APPLICATION_LIMITS: [i32; ResourceType::COUNT] = [
    0x18, 0x400_0000, 0x20, 0x20, 0x20, 0x8, 0x8, 0x10, 0x2, 0x0,
];

/// Limits for system applet processes
const SYS_APPLET_LIMITS: [i32; ResourceType::COUNT] = [
    0x4, 0x5E0_0000, 0x1D, 0xB, 0x8, 0x4, 0x4, 0x8, 0x3, 0x2710,
];

/// Limits for library applet processes
const LIB_APPLET_LIMITS: [i32; ResourceType::COUNT] = [
    0x4, 0x60_0000, 0xE, 0x8, 0x8, 0x4, 0x4, 0x8, 0x1, 0x2710,
];

/// Limits for service modules and other processes
const OTHER_LIMITS: [i32; ResourceType::COUNT] = [
    0x4, 0x218_0000, 0xE1, 0x108, 0x25, 0x43, 0x2C, 0x1F, 0x2D, 0x3E8,
];

/// ============================================================================
/// Kernel Context
/// ============================================================================

/// Root state of one emulated kernel instance
///
/// Owns exactly one resource limit per category. Creation routines take the
/// context by reference; tests construct a fresh context per case.
pub struct KernelContext {
    /// One limit set per category, indexed by category tag
    resource_limits: [Arc<ResourceLimit>; ResourceLimitCategory::COUNT],
}

impl KernelContext {
    /// Create a kernel context with the retail category limits
    ///
    /// All usage counters start at zero.
    pub fn new() -> Self {
        let resource_limits = [
            ResourceLimit::with_limits("Applications", APPLICATION_LIMITS),
            ResourceLimit::with_limits("System Applets", SYS_APPLET_LIMITS),
            ResourceLimit::with_limits("Library Applets", LIB_APPLET_LIMITS),
            ResourceLimit::with_limits("Others", OTHER_LIMITS),
        ];

        log::info!(
            "kernel context initialized with {} resource limit categories",
            ResourceLimitCategory::COUNT,
        );

        Self { resource_limits }
    }

    /// Get the resource limit for the specified category
    ///
    /// Identical input always yields the same instance.
    pub fn resource_limit_for(&self, category: ResourceLimitCategory) -> &Arc<ResourceLimit> {
        &self.resource_limits[category.index()]
    }
}

impl Default for KernelContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for KernelContext {
    fn drop(&mut self) {
        log::debug!("kernel context shut down");
    }
}

/// ============================================================================
/// Tests
/// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_identity_is_stable() {
        let kernel = KernelContext::new();

        for category in ResourceLimitCategory::ALL {
            let first = kernel.resource_limit_for(category);
            let second = kernel.resource_limit_for(category);
            assert!(Arc::ptr_eq(first, second), "{}", category.name());
        }
    }

    #[test]
    fn test_categories_are_distinct() {
        let kernel = KernelContext::new();

        let app = kernel.resource_limit_for(ResourceLimitCategory::Application);
        let other = kernel.resource_limit_for(ResourceLimitCategory::Other);
        assert!(!Arc::ptr_eq(app, other));
    }

    #[test]
    fn test_retail_limit_constants() {
        let kernel = KernelContext::new();

        let expected = [
            (ResourceLimitCategory::Application, APPLICATION_LIMITS),
            (ResourceLimitCategory::SysApplet, SYS_APPLET_LIMITS),
            (ResourceLimitCategory::LibApplet, LIB_APPLET_LIMITS),
            (ResourceLimitCategory::Other, OTHER_LIMITS),
        ];

        for (category, limits) in expected {
            let limit = kernel.resource_limit_for(category);
            for resource in ResourceType::ALL {
                assert_eq!(
                    limit.max_value(resource),
                    limits[resource.index()],
                    "{}/{}",
                    category.name(),
                    resource.name(),
                );
            }
        }
    }

    #[test]
    fn test_counters_start_at_zero() {
        let kernel = KernelContext::new();

        for category in ResourceLimitCategory::ALL {
            let limit = kernel.resource_limit_for(category);
            for resource in ResourceType::ALL {
                // Priority has no usage counter and reports its ceiling
                let expected = match resource {
                    ResourceType::Priority => limit.max_value(resource),
                    _ => 0,
                };
                assert_eq!(limit.current_value(resource), expected);
            }
        }
    }

    #[test]
    fn test_application_cannot_starve_services() {
        let kernel = KernelContext::new();

        let app = kernel.resource_limit_for(ResourceLimitCategory::Application);
        let max_events = app.max_value(ResourceType::Event);

        // Exhaust the application's event quota
        for _ in 0..max_events {
            app.reserve(ResourceType::Event, 1).unwrap();
        }
        assert!(app.reserve(ResourceType::Event, 1).is_err());

        // Service modules draw from their own bucket and are unaffected
        let other = kernel.resource_limit_for(ResourceLimitCategory::Other);
        assert!(other.reserve(ResourceType::Event, 1).is_ok());
        assert_eq!(other.current_value(ResourceType::Event), 1);
    }
}

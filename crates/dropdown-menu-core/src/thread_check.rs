//! Thread affinity checks for UI-context-bound state.
//!
//! Display state may only change on the thread that owns the
//! [`UiContext`](crate::UiContext). [`ThreadAffinity`] records that thread so
//! the context can verify it in debug builds.
//!
//! ```
//! use dropdown_menu_core::thread_check::ThreadAffinity;
//!
//! let affinity = ThreadAffinity::current();
//! assert!(affinity.is_same_thread());
//!
//! let moved = std::thread::spawn(move || affinity.is_same_thread())
//!     .join()
//!     .unwrap();
//! assert!(!moved);
//! ```

use std::thread::ThreadId;

/// Thread affinity tracker.
///
/// Records the thread on which it was created and verifies that later
/// operations occur on the same thread.
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Create a tracker bound to the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// The thread this tracker is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check whether the current thread is the bound thread.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Panic in debug builds if called from a different thread.
    #[inline]
    #[track_caller]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        if !self.is_same_thread() {
            panic_wrong_thread(self.thread_id);
        }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn panic_wrong_thread(expected: ThreadId) -> ! {
    let current = std::thread::current();
    panic!(
        "UI context accessed from thread \"{}\" ({:?}), but it is bound to {:?}. \
         Post the work through a UiProxy instead.",
        current.name().unwrap_or("<unnamed>"),
        current.id(),
        expected
    )
}

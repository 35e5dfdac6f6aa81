//! Screen controllers.
//!
//! A controller owns the transient state of one screen and turns every
//! service result into a [`Notice`](crate::Notice). Nothing here returns an
//! error to the frontend.

mod add;
mod home;
mod list;

pub use add::AddNetworkController;
pub use home::HomeController;
pub use list::{EditDraft, NetworkListController};

use std::sync::atomic::{AtomicBool, Ordering};

use ssid_connect_core::error::CoreError;

/// Holds a busy flag for the lifetime of an operation.
///
/// Returns `None` when the flag is already set.
pub(crate) struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Log a service error at the level its kind calls for.
pub(crate) fn log_error(context: &str, err: &CoreError) {
    if err.is_expected() {
        log::warn!("{context}: {err}");
    } else {
        log::error!("{context}: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_guard_is_exclusive_and_released_on_drop() {
        let flag = AtomicBool::new(false);

        let guard = BusyGuard::acquire(&flag);
        assert!(guard.is_some());
        assert!(BusyGuard::acquire(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::SeqCst));
        assert!(BusyGuard::acquire(&flag).is_some());
    }
}

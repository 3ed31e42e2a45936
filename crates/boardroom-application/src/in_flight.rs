//! In-flight operation tracking.
//!
//! A workflow allows one backend round trip at a time. The flag is held by an
//! RAII guard, so it is released even if the awaiting future is dropped.

use std::sync::atomic::{AtomicBool, Ordering};

use boardroom_core::error::{BoardroomError, Result};

#[derive(Debug, Default)]
pub struct InFlight(AtomicBool);

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the flag, or fails with `OperationInFlight` if it is taken.
    pub fn try_begin(&self) -> Result<InFlightGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| BoardroomError::OperationInFlight)?;
        Ok(InFlightGuard(&self.0))
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Releases the [`InFlight`] flag on drop.
#[derive(Debug)]
pub struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_fails_until_guard_dropped() {
        let flag = InFlight::new();
        let guard = flag.try_begin().unwrap();
        assert!(flag.is_active());
        assert_eq!(
            flag.try_begin().map(|_| ()).unwrap_err(),
            BoardroomError::OperationInFlight
        );

        drop(guard);
        assert!(!flag.is_active());
        assert!(flag.try_begin().is_ok());
    }
}

//! Sleep-suppression service.
//!
//! Keeping the host awake for the length of a run is a process-wide concern
//! with its own lifecycle, so it lives behind a trait injected into the
//! workflow rather than anywhere near the synthesis core.

/// Keeps the host machine from sleeping while a run is in flight.
pub trait WakeLock {
    fn acquire(&self);
    fn release(&self);
}

/// No-op lock for platforms without sleep suppression wired up.
#[derive(Debug, Default)]
pub struct NoopWakeLock;

impl WakeLock for NoopWakeLock {
    fn acquire(&self) {}
    fn release(&self) {}
}

/// RAII guard that holds a wake lock until dropped.
pub struct WakeGuard<'a> {
    lock: &'a dyn WakeLock,
}

/// Acquires `lock` and returns a guard that releases it on drop.
pub fn hold(lock: &dyn WakeLock) -> WakeGuard<'_> {
    lock.acquire();
    WakeGuard { lock }
}

impl Drop for WakeGuard<'_> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct CountingLock {
        acquired: Cell<u32>,
        released: Cell<u32>,
    }

    impl WakeLock for CountingLock {
        fn acquire(&self) {
            self.acquired.set(self.acquired.get() + 1);
        }

        fn release(&self) {
            self.released.set(self.released.get() + 1);
        }
    }

    #[test]
    fn test_guard_pairs_acquire_and_release() {
        let lock = CountingLock {
            acquired: Cell::new(0),
            released: Cell::new(0),
        };

        {
            let _guard = hold(&lock);
            assert_eq!(lock.acquired.get(), 1);
            assert_eq!(lock.released.get(), 0);
        }

        assert_eq!(lock.released.get(), 1);
    }
}

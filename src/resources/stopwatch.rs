//! Pooled countdown stopwatches.
//!
//! Behaviours that need to wait a known number of frames draw a watch from
//! the [`StopWatchPool`] instead of hand-rolling frame counters. The pool
//! owns every watch; callers only keep a small Copy [`StopWatchHandle`] and
//! go through the pool for every query or mutation.
//!
//! Watches count whole frames: the host loop calls [`StopWatchPool::tick`]
//! exactly once per logical frame and every in-use, unpaused watch advances
//! by one. There is no sub-frame resolution.
//!
//! Watches are never destroyed individually. [`StopWatchPool::recycle`]
//! returns one to the free list for reuse, which keeps steady-state
//! allocation at zero.

use log::debug;

/// Watches preallocated at pool construction.
const DEFAULT_POOL_SIZE: usize = 32;

/// A single reusable countdown timer. Lives inside the pool.
#[derive(Debug, Clone, Copy)]
struct StopWatch {
    /// Number of frames the watch runs before expiring.
    lifetime: u32,
    /// Frames elapsed since the last (re)start.
    elapsed: u32,
    /// A paused watch never advances.
    paused: bool,
    /// True while the watch is handed out; free-list watches are inert.
    in_use: bool,
    /// True once the watch has advanced at least one frame since it was
    /// handed out or last restarted. A watch that never ran is not expired,
    /// whatever its counters say.
    started: bool,
}

impl StopWatch {
    fn reset() -> Self {
        StopWatch {
            lifetime: 0,
            elapsed: 0,
            paused: false,
            in_use: false,
            started: false,
        }
    }
}

/// Non-owning reference to a watch inside the pool.
///
/// Handles stay valid for as long as the behaviour that requested them
/// keeps the watch; recycling a watch and allocating again may reuse the
/// slot, so callers must not hold on to handles they recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopWatchHandle(usize);

/// Allocates and ticks the reusable countdown watches.
pub struct StopWatchPool {
    watches: Vec<StopWatch>,
    free: Vec<usize>,
}

impl Default for StopWatchPool {
    fn default() -> Self {
        Self::new()
    }
}

impl StopWatchPool {
    /// Create a pool with [`DEFAULT_POOL_SIZE`] watches ready for use.
    pub fn new() -> Self {
        let watches = vec![StopWatch::reset(); DEFAULT_POOL_SIZE];
        let free = (0..DEFAULT_POOL_SIZE).rev().collect();
        StopWatchPool { watches, free }
    }

    /// Hand out a ready watch: unpaused, not expired, counters at zero.
    /// Grows the pool when exhausted; never fails.
    pub fn get_new_stop_watch(&mut self) -> StopWatchHandle {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                debug!(
                    "stopwatch pool exhausted, growing to {}",
                    self.watches.len() + 1
                );
                self.watches.push(StopWatch::reset());
                self.watches.len() - 1
            }
        };
        let watch = &mut self.watches[index];
        *watch = StopWatch::reset();
        watch.in_use = true;
        StopWatchHandle(index)
    }

    /// Return a watch to the free list. The handle must not be used again.
    pub fn recycle(&mut self, handle: StopWatchHandle) {
        if let Some(watch) = self.watches.get_mut(handle.0) {
            if watch.in_use {
                *watch = StopWatch::reset();
                self.free.push(handle.0);
            }
        }
    }

    /// Advance every in-use, unpaused watch by one frame. Called once per
    /// global frame tick by the host loop.
    pub fn tick(&mut self) {
        for watch in &mut self.watches {
            if watch.in_use && !watch.paused {
                watch.elapsed = watch.elapsed.saturating_add(1);
                watch.started = true;
            }
        }
    }

    /// Set how many frames the watch runs before expiring.
    pub fn set_lifetime(&mut self, handle: StopWatchHandle, frames: u32) {
        if let Some(watch) = self.watch_mut(handle) {
            watch.lifetime = frames;
        }
    }

    /// The configured lifetime in frames.
    pub fn lifetime(&self, handle: StopWatchHandle) -> u32 {
        self.watch(handle).map(|w| w.lifetime).unwrap_or(0)
    }

    /// Frames elapsed since the last (re)start.
    pub fn elapsed(&self, handle: StopWatchHandle) -> u32 {
        self.watch(handle).map(|w| w.elapsed).unwrap_or(0)
    }

    /// Pause or resume a watch. A paused watch never advances.
    pub fn set_paused(&mut self, handle: StopWatchHandle, paused: bool) {
        if let Some(watch) = self.watch_mut(handle) {
            watch.paused = paused;
        }
    }

    pub fn is_paused(&self, handle: StopWatchHandle) -> bool {
        self.watch(handle).map(|w| w.paused).unwrap_or(false)
    }

    /// True once the watch has run `lifetime` frames since it was handed
    /// out or last restarted. A watch that never advanced, and any stale
    /// handle, reports false.
    pub fn is_expired(&self, handle: StopWatchHandle) -> bool {
        match self.watch(handle) {
            Some(watch) => watch.started && watch.elapsed >= watch.lifetime,
            None => false,
        }
    }

    /// Reset elapsed to zero and re-arm; the lifetime and paused state keep
    /// their values.
    pub fn restart(&mut self, handle: StopWatchHandle) {
        if let Some(watch) = self.watch_mut(handle) {
            watch.elapsed = 0;
            watch.started = false;
        }
    }

    /// Watches currently handed out.
    pub fn in_use(&self) -> usize {
        self.watches.iter().filter(|w| w.in_use).count()
    }

    fn watch(&self, handle: StopWatchHandle) -> Option<&StopWatch> {
        let watch = self.watches.get(handle.0)?;
        watch.in_use.then_some(watch)
    }

    fn watch_mut(&mut self, handle: StopWatchHandle) -> Option<&mut StopWatch> {
        let watch = self.watches.get_mut(handle.0)?;
        watch.in_use.then_some(watch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_watch_is_ready_and_not_expired() {
        let mut pool = StopWatchPool::new();
        let watch = pool.get_new_stop_watch();
        assert!(!pool.is_paused(watch));
        assert!(!pool.is_expired(watch));
        assert_eq!(pool.elapsed(watch), 0);
        assert_eq!(pool.in_use(), 1);
    }

    #[test]
    fn test_expiry_boundary() {
        let mut pool = StopWatchPool::new();
        let watch = pool.get_new_stop_watch();
        pool.set_lifetime(watch, 3);
        for _ in 0..2 {
            pool.tick();
            assert!(!pool.is_expired(watch));
        }
        pool.tick();
        assert!(pool.is_expired(watch)); // elapsed == lifetime
        pool.tick();
        assert!(pool.is_expired(watch)); // stays expired
    }

    #[test]
    fn test_paused_watch_never_advances() {
        let mut pool = StopWatchPool::new();
        let watch = pool.get_new_stop_watch();
        pool.set_lifetime(watch, 1);
        pool.set_paused(watch, true);
        for _ in 0..10 {
            pool.tick();
        }
        assert!(!pool.is_expired(watch));
        assert_eq!(pool.elapsed(watch), 0);
    }

    #[test]
    fn test_restart_rearms() {
        let mut pool = StopWatchPool::new();
        let watch = pool.get_new_stop_watch();
        pool.set_lifetime(watch, 2);
        pool.tick();
        pool.tick();
        assert!(pool.is_expired(watch));
        pool.restart(watch);
        assert!(!pool.is_expired(watch));
        assert_eq!(pool.elapsed(watch), 0);
        pool.restart(watch); // idempotent
        assert!(!pool.is_expired(watch));
    }

    #[test]
    fn test_pool_grows_when_exhausted() {
        let mut pool = StopWatchPool::new();
        let handles: Vec<_> = (0..DEFAULT_POOL_SIZE + 4)
            .map(|_| pool.get_new_stop_watch())
            .collect();
        assert_eq!(pool.in_use(), DEFAULT_POOL_SIZE + 4);
        // All handles are distinct slots.
        for (i, a) in handles.iter().enumerate() {
            for b in handles.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_recycle_reuses_slot() {
        let mut pool = StopWatchPool::new();
        let watch = pool.get_new_stop_watch();
        pool.set_lifetime(watch, 5);
        pool.tick();
        pool.recycle(watch);
        assert!(!pool.is_expired(watch)); // stale handle is inert

        let again = pool.get_new_stop_watch();
        assert_eq!(pool.elapsed(again), 0);
        assert_eq!(pool.lifetime(again), 0);
    }
}

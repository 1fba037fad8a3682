//! compression/pool.rs
//! Free-list pools for objects that are expensive to construct.
//!
//! - Acquisition hands out any idle instance; there is no ordering guarantee.
//! - The free list is unbounded. Under bursty load it grows to the peak number
//!   of concurrent callers and stays there.
//! - `Pooled` returns its instance on drop, so every exit path releases,
//!   including `?` early returns and unwinding.
use std::fmt;
use std::ops::{Deref, DerefMut};

use crossbeam::queue::SegQueue;
use tracing::trace;

use crate::telemetry::{PoolCounters, PoolStats};

/// Puts an instance back into a clean state before it is reused.
pub trait Recycle {
    fn recycle(&mut self);
}

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;

pub struct Pool<T: Recycle> {
    name: &'static str,
    free: SegQueue<T>,
    factory: Factory<T>,
    counters: PoolCounters,
}

impl<T: Recycle> Pool<T> {
    pub fn new<F>(name: &'static str, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            name,
            free: SegQueue::new(),
            factory: Box::new(factory),
            counters: PoolCounters::default(),
        }
    }

    /// Take an idle instance, or build one if none is available.
    pub fn acquire(&self) -> Pooled<'_, T> {
        let item = match self.free.pop() {
            Some(item) => {
                self.counters.add_reused();
                item
            }
            None => {
                self.counters.add_created();
                trace!(pool = self.name, "pool empty, constructing new instance");
                (self.factory)()
            }
        };
        Pooled { pool: self, item: Some(item), reusable: true }
    }

    /// Number of idle instances right now.
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    pub fn stats(&self) -> PoolStats {
        self.counters.snapshot(self.idle())
    }

    fn release(&self, mut item: T, reusable: bool) {
        if reusable {
            item.recycle();
            self.free.push(item);
            self.counters.add_released();
        } else {
            self.counters.add_discarded();
            trace!(pool = self.name, "discarding instance after failure");
        }
    }
}

impl<T: Recycle> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("name", &self.name)
            .field("stats", &self.stats())
            .finish()
    }
}

/// Exclusive handle on a pooled instance for the duration of one call.
pub struct Pooled<'p, T: Recycle> {
    pool: &'p Pool<T>,
    item: Option<T>,
    reusable: bool,
}

impl<'p, T: Recycle> Pooled<'p, T> {
    /// Drop the instance instead of returning it to the pool.
    pub fn discard(&mut self) {
        self.reusable = false;
    }
}

impl<'p, T: Recycle> Deref for Pooled<'p, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Only `Drop` takes the item out.
        self.item.as_ref().unwrap_or_else(|| unreachable!("pooled item taken before drop"))
    }
}

impl<'p, T: Recycle> DerefMut for Pooled<'p, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.item.as_mut().unwrap_or_else(|| unreachable!("pooled item taken before drop"))
    }
}

impl<'p, T: Recycle> Drop for Pooled<'p, T> {
    fn drop(&mut self) {
        if let Some(item) = self.item.take() {
            // A panic mid-call may have left the instance half-written.
            let reusable = self.reusable && !std::thread::panicking();
            self.pool.release(item, reusable);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Scratch(Vec<u8>);

    impl Recycle for Scratch {
        fn recycle(&mut self) {
            self.0.clear();
        }
    }

    #[test]
    fn released_instance_is_reused_and_clean() {
        let pool = Pool::new("scratch", Scratch::default);
        {
            let mut s = pool.acquire();
            s.0.extend_from_slice(b"leftover");
        }
        let s = pool.acquire();
        assert!(s.0.is_empty());
        assert!(s.0.capacity() >= 8, "buffer capacity should survive recycling");

        let stats = pool.stats();
        assert_eq!(stats.created, 1);
        assert_eq!(stats.reused, 1);
    }

    #[test]
    fn concurrent_holders_get_distinct_instances() {
        let pool = Pool::new("scratch", Scratch::default);
        let a = pool.acquire();
        let b = pool.acquire();
        assert_eq!(pool.stats().created, 2);
        drop(a);
        drop(b);
        assert_eq!(pool.idle(), 2);
    }

    #[test]
    fn discarded_instance_is_not_returned() {
        let pool = Pool::new("scratch", Scratch::default);
        {
            let mut s = pool.acquire();
            s.discard();
        }
        assert_eq!(pool.idle(), 0);
        assert_eq!(pool.stats().discarded, 1);
    }
}

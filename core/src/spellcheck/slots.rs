//! Bounded pool of lookup slots.
//!
//! At most `capacity` dictionary lookups run at once. Each holder gets a slot
//! index, which the decoder uses to pick its scratch state; the slot is handed
//! back when the guard drops.

use parking_lot::{Condvar, Mutex};

#[derive(Debug)]
pub struct SessionSlots {
    in_use: Mutex<Vec<bool>>,
    released: Condvar,
}

impl SessionSlots {
    /// Pool of `capacity` slots (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            in_use: Mutex::new(vec![false; capacity.max(1)]),
            released: Condvar::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.in_use.lock().len()
    }

    pub fn available(&self) -> usize {
        self.in_use.lock().iter().filter(|&&used| !used).count()
    }

    /// Block until a slot is free.
    pub fn acquire(&self) -> SlotGuard<'_> {
        let mut in_use = self.in_use.lock();
        loop {
            if let Some(index) = in_use.iter().position(|&used| !used) {
                in_use[index] = true;
                return SlotGuard { slots: self, index };
            }
            self.released.wait(&mut in_use);
        }
    }

    pub fn try_acquire(&self) -> Option<SlotGuard<'_>> {
        let mut in_use = self.in_use.lock();
        let index = in_use.iter().position(|&used| !used)?;
        in_use[index] = true;
        Some(SlotGuard { slots: self, index })
    }

    fn release(&self, index: usize) {
        self.in_use.lock()[index] = false;
        self.released.notify_one();
    }
}

/// A held slot; released on drop.
#[derive(Debug)]
pub struct SlotGuard<'a> {
    slots: &'a SessionSlots,
    index: usize,
}

impl SlotGuard<'_> {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        self.slots.release(self.index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_distinct_indices() {
        let slots = SessionSlots::new(2);
        let a = slots.acquire();
        let b = slots.acquire();
        assert_ne!(a.index(), b.index());
        assert_eq!(slots.available(), 0);
        assert!(slots.try_acquire().is_none());
        drop(a);
        assert_eq!(slots.available(), 1);
        let c = slots.try_acquire().unwrap();
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_zero_capacity_means_one() {
        let slots = SessionSlots::new(0);
        assert_eq!(slots.capacity(), 1);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let slots = Arc::new(SessionSlots::new(2));
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let slots = Arc::clone(&slots);
                let active = Arc::clone(&active);
                let peak = Arc::clone(&peak);
                thread::spawn(move || {
                    let _slot = slots.acquire();
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(5));
                    active.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert!(peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(slots.available(), 2);
    }
}

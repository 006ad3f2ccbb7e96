use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Runs reactions one at a time.
///
/// Notifications can arrive back to back, or from paste and keystroke
/// handlers at once. Each reaction holds the lock for its whole run and the
/// guard is released on every exit path, panics included.
#[derive(Debug, Default)]
pub struct ReactionGate<E> {
    inner: Mutex<E>,
}

impl<E> ReactionGate<E> {
    pub fn new(engine: E) -> Self {
        Self {
            inner: Mutex::new(engine),
        }
    }

    /// Run `reaction` with exclusive access, waiting for any reaction in flight.
    pub fn run_exclusive<R>(&self, reaction: impl FnOnce(&mut E) -> R) -> R {
        // Recover from poisoned mutex (a reaction panicked while holding the lock)
        let mut engine = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        reaction(&mut engine)
    }
}

/// Coalesces rapid notifications into a single deferred reaction.
///
/// The host calls [`Debouncer::schedule`] on every notification and runs the
/// returned ticket once its own state has settled (next tick, short timer).
/// While a ticket is outstanding further notifications get `None`.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    pending: Arc<AtomicBool>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&self) -> Option<Deferred> {
        if self.pending.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(Deferred {
            pending: Arc::clone(&self.pending),
        })
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

/// A scheduled reaction; running or dropping it frees the slot.
#[derive(Debug)]
pub struct Deferred {
    pending: Arc<AtomicBool>,
}

impl Deferred {
    pub fn run<R>(self, reaction: impl FnOnce() -> R) -> R {
        reaction()
    }
}

impl Drop for Deferred {
    fn drop(&mut self) {
        self.pending.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::thread;

    #[test]
    fn test_reactions_never_overlap() {
        let gate = Arc::new(ReactionGate::new(0usize));
        let in_flight = Arc::new(AtomicBool::new(false));
        let overlaps = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gate = Arc::clone(&gate);
                let in_flight = Arc::clone(&in_flight);
                let overlaps = Arc::clone(&overlaps);
                thread::spawn(move || {
                    for _ in 0..50 {
                        gate.run_exclusive(|count| {
                            if in_flight.swap(true, Ordering::SeqCst) {
                                overlaps.fetch_add(1, Ordering::SeqCst);
                            }
                            *count += 1;
                            in_flight.store(false, Ordering::SeqCst);
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(overlaps.load(Ordering::SeqCst), 0);
        assert_eq!(gate.run_exclusive(|count| *count), 400);
    }

    #[test]
    fn test_panicking_reaction_does_not_lock_gate() {
        let gate = Arc::new(ReactionGate::new(1u32));

        let worker = Arc::clone(&gate);
        let result = thread::spawn(move || {
            worker.run_exclusive(|_| panic!("reaction failed"));
        })
        .join();

        assert!(result.is_err());
        assert_eq!(gate.run_exclusive(|value| *value), 1);
    }

    #[test]
    fn test_second_schedule_is_coalesced() {
        let debouncer = Debouncer::new();

        let first = debouncer.schedule().expect("slot should be free");
        assert!(debouncer.schedule().is_none());
        assert!(debouncer.is_pending());

        assert_eq!(first.run(|| 42), 42);
        assert!(!debouncer.is_pending());
        assert!(debouncer.schedule().is_some());
    }

    #[test]
    fn test_dropped_ticket_frees_slot() {
        let debouncer = Debouncer::new();
        drop(debouncer.schedule());
        assert!(!debouncer.is_pending());
    }
}

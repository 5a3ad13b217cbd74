#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))] // This is all test code, no need to test it.

//! Private helpers for tests and benchmarks in the `itt_scope` workspace.

use std::sync::{Barrier, mpsc};
use std::thread;
use std::time::Duration;

/// Runs a test with a timeout to prevent infinite hangs.
///
/// If the test takes longer than the timeout to complete, this function panics so that
/// a deadlocked call-site slot shows up as a failed test instead of a stuck build.
///
/// The timeout is 10 seconds under normal conditions and 60 seconds under
/// Miri, where thread synchronization primitives are significantly slower.
///
/// When the `MUTATION_TESTING` environment variable is set to "1", the watchdog
/// is disabled and the test function is executed directly. This allows mutation
/// testing to properly detect hanging mutations.
///
/// # Panics
///
/// Panics if the test exceeds the timeout (when not in mutation testing mode).
///
/// # Example
///
/// ```rust
/// use testing::with_watchdog;
///
/// with_watchdog(|| {
///     assert_eq!(2 + 2, 4);
/// });
/// ```
pub fn with_watchdog<F, R>(test_fn: F) -> R
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    if std::env::var("MUTATION_TESTING").as_deref() == Ok("1") {
        return test_fn();
    }

    let (tx, rx) = mpsc::channel();

    let test_handle = thread::spawn(move || {
        let result = test_fn();
        // If this fails, the receiver has already timed out.
        drop(tx.send(result));
    });

    let timeout = if cfg!(miri) {
        Duration::from_secs(60)
    } else {
        Duration::from_secs(10)
    };

    match rx.recv_timeout(timeout) {
        Ok(result) => {
            test_handle.join().expect("Test thread should not panic");
            result
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            panic!("Test exceeded {} second timeout", timeout.as_secs());
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            // The test thread panicked. Join it to surface the original panic.
            match test_handle.join() {
                Ok(()) => panic!("Test thread disconnected unexpectedly"),
                Err(e) => std::panic::resume_unwind(e),
            }
        }
    }
}

/// Calls `f` on `threads` threads at the same time and returns what each call returned.
///
/// All threads wait on a barrier before calling `f`, so the calls start as close to
/// simultaneously as the scheduler allows. This is how tests exercise the first use of a
/// call site from many threads at once.
///
/// # Panics
///
/// Panics if any call to `f` panics.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use testing::race_on_threads;
///
/// let calls = AtomicUsize::new(0);
///
/// let results = race_on_threads(4, || calls.fetch_add(1, Ordering::Relaxed));
///
/// assert_eq!(results.len(), 4);
/// assert_eq!(calls.load(Ordering::Relaxed), 4);
/// ```
pub fn race_on_threads<F, R>(threads: usize, f: F) -> Vec<R>
where
    F: Fn() -> R + Sync,
    R: Send,
{
    let start = Barrier::new(threads);

    thread::scope(|s| {
        let handles = (0..threads)
            .map(|_| {
                s.spawn(|| {
                    start.wait();
                    f()
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(e) => std::panic::resume_unwind(e),
            })
            .collect()
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn watchdog_returns_correct_value() {
        let result = with_watchdog(|| "hello world");
        assert_eq!(result, "hello world");
    }

    #[test]
    fn race_runs_every_thread() {
        let calls = AtomicUsize::new(0);

        let results = race_on_threads(8, || {
            calls.fetch_add(1, Ordering::Relaxed);
            thread::current().id()
        });

        assert_eq!(results.len(), 8);
        assert_eq!(calls.load(Ordering::Relaxed), 8);

        // Every call ran on its own thread.
        for (index, id) in results.iter().enumerate() {
            assert!(!results.iter().skip(index + 1).any(|other| other == id));
        }
    }
}

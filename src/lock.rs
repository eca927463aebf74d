//! Some functions in FFTW are not thread-safe, and one should ensure
//! that only one thread is executing these at a time. This module
//! provides a lock for this purpose.
//!
//! Only `fftw_execute` (and the new-array variants) may be called
//! concurrently; planning, destroying plans and everything touching
//! wisdom goes through [`run`](fn.run.html).

use std::sync::{Mutex, PoisonError};

/// Hold this lock when doing anything thread-unsafe with FFTW.
pub static LOCK: Mutex<()> = Mutex::new(());

/// Run `f` while holding [`LOCK`](static.LOCK.html).
///
/// A panic inside an earlier `f` leaves FFTW in a usable state, so a
/// poisoned lock is still taken.
pub fn run<A, F: FnOnce() -> A>(f: F) -> A {
    let _g = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    f()
}

#[cfg(test)]
mod tests {
    use std::thread;

    #[test]
    fn survives_poisoning() {
        let r = thread::spawn(|| super::run(|| panic!("inside the lock"))).join();
        assert!(r.is_err());
        assert_eq!(super::run(|| 7), 7);
    }
}

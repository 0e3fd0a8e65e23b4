use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use signal_hook::{consts::signal::*, low_level};

#[derive(Debug, thiserror::Error)]
#[error("termination was requested")]
pub struct Terminated;

/// Counts received SIGINT and SIGTERM. The third signal terminates the process right
/// away.
#[derive(Clone, Debug)]
pub struct Cookie {
    count: Arc<AtomicUsize>,
}

impl Cookie {
    pub fn new() -> Result<Self, std::io::Error> {
        let cookie = Self::detached();

        for flag in [SIGINT, SIGTERM] {
            let count = Arc::clone(&cookie.count);
            // SAFETY: this only uses atomic stuff and functions the crate itself is using
            // in signal handlers
            unsafe {
                low_level::register(flag, move || {
                    let prev = count.fetch_add(1, Ordering::SeqCst);
                    if prev >= 2 {
                        let _ = low_level::emulate_default_handler(flag);
                    }
                })?;
            };
        }

        Ok(cookie)
    }

    /// A cookie not connected to any signals, it only terminates through
    /// [`Cookie::terminate`]
    pub fn detached() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn terminate(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_terminating(&self) -> bool {
        self.count.load(Ordering::SeqCst) >= 1
    }

    pub fn check(&self) -> Result<(), Terminated> {
        if self.is_terminating() {
            Err(Terminated)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn detached_terminates() {
        let cookie = Cookie::detached();
        assert!(cookie.check().is_ok());

        let clone = cookie.clone();
        clone.terminate();
        assert!(cookie.is_terminating());
        assert!(cookie.check().is_err());
    }
}

//! Bounded retry with a fixed pause between attempts.

use std::fmt::Display;
use std::thread;
use std::time::Duration;

use crate::logging::ExportLogger;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Retry parameters shared by every remote call of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_MAX_ATTEMPTS, delay: DEFAULT_RETRY_DELAY }
    }
}

impl RetryPolicy {
    /// Same attempt count, no waiting. Used by tests.
    pub fn immediate() -> Self {
        Self { delay: Duration::ZERO, ..Self::default() }
    }

    /// Run `operation` until it succeeds or the attempts are used up.
    ///
    /// Every attempt and its outcome are logged, each pause is logged before
    /// sleeping. Returns `None` once every attempt has failed; the
    /// caller decides whether the run can go on without the value.
    pub fn call<T, E, F>(&self, what: &str, logger: &dyn ExportLogger, mut operation: F) -> Option<T>
    where
        E: Display,
        F: FnMut() -> Result<T, E>,
    {
        for attempt in 1..=self.max_attempts {
            logger.debug(&format!("{what}: attempt {attempt}/{}", self.max_attempts));
            match operation() {
                Ok(value) => {
                    let message = format!("{what}: succeeded on attempt {attempt}");
                    if attempt > 1 {
                        logger.info(&message);
                    } else {
                        logger.debug(&message);
                    }
                    return Some(value);
                }
                Err(err) => {
                    logger.error(&format!("{what}: attempt {attempt} failed: {err}"));
                    if attempt < self.max_attempts {
                        logger.info(&format!(
                            "{what}: waiting {}s before the next attempt",
                            self.delay.as_secs_f64()
                        ));
                        thread::sleep(self.delay);
                    }
                }
            }
        }
        logger.error(&format!("{what}: giving up after {} attempts", self.max_attempts));
        None
    }
}

//! The deployment retry state machine.
//!
//! Newly enabled APIs and freshly created service accounts take time to
//! become usable, so the deploy call gets a bounded retry budget with a
//! fixed delay. No exponential growth, no jitter: the failure mode being
//! absorbed is propagation delay, not load.

use std::time::Duration;

use tracing::{info, warn};

use ilab_common::{Error, Result};

use crate::gcloud::{ControlPlane, FunctionSpec};

/// Delay after the batch API-enablement call before provisioning continues.
pub const ENABLEMENT_SETTLE: Duration = Duration::from_secs(10);

/// Sleeping goes through a seam so tests assert on delays without waiting.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Real sleeper used by the binary.
#[derive(Debug, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Recording sleeper (used for tests and scaffolding).
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    sleeps: std::cell::RefCell<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn recorded(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

/// Retry budget for the deploy call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            delay: Duration::from_secs(15),
        }
    }
}

/// States of the deployment retrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployState {
    /// Attempt `n` (1-based) is in flight.
    Attempting(u32),
    /// Terminal: the deploy call returned success on the recorded attempt.
    Succeeded(u32),
    /// Terminal: every attempt failed.
    Exhausted,
}

/// Drive the deploy call through the state machine.
///
/// Returns the attempt number that succeeded, or
/// [`Error::DeployExhausted`] once the budget is spent. A fixed
/// `policy.delay` sleep separates consecutive attempts, so a run that
/// succeeds on attempt `n` has slept exactly `n - 1` times.
pub fn deploy_with_retry(
    plane: &dyn ControlPlane,
    spec: &FunctionSpec,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
) -> Result<u32> {
    let mut state = DeployState::Attempting(1);
    loop {
        match state {
            DeployState::Attempting(attempt) => match plane.deploy_function(spec) {
                Ok(()) => state = DeployState::Succeeded(attempt),
                Err(err) => {
                    warn!(attempt, max = policy.max_attempts, "deploy attempt failed: {err}");
                    if attempt < policy.max_attempts {
                        sleeper.sleep(policy.delay);
                        state = DeployState::Attempting(attempt + 1);
                    } else {
                        state = DeployState::Exhausted;
                    }
                }
            },
            DeployState::Succeeded(attempt) => {
                info!(attempt, "function deployed");
                return Ok(attempt);
            }
            DeployState::Exhausted => {
                return Err(Error::DeployExhausted {
                    attempts: policy.max_attempts,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcloud::ScriptedControlPlane;
    use std::path::PathBuf;

    fn failing(failures: u32) -> ScriptedControlPlane {
        let mut plane = ScriptedControlPlane::new("test-proj");
        plane.deploy_failures = failures;
        plane
    }

    fn spec() -> FunctionSpec {
        FunctionSpec {
            project_id: "test-proj".to_string(),
            name: "process-invoices".to_string(),
            region: "us-central1".to_string(),
            runtime: "python312".to_string(),
            entry_point: "process_invoice".to_string(),
            source_dir: PathBuf::from("function"),
            env_vars_file: PathBuf::from("function/.env.yaml"),
            trigger_bucket: "test-proj-input-invoices".to_string(),
        }
    }

    #[test]
    fn first_attempt_success_sleeps_zero_times() {
        let plane = failing(0);
        let sleeper = RecordingSleeper::default();
        let attempt =
            deploy_with_retry(&plane, &spec(), &RetryPolicy::default(), &sleeper).expect("deploy");
        assert_eq!(attempt, 1);
        assert!(sleeper.recorded().is_empty());
    }

    #[test]
    fn five_failures_then_success_sleeps_five_fixed_delays() {
        let plane = failing(5);
        let sleeper = RecordingSleeper::default();
        let attempt =
            deploy_with_retry(&plane, &spec(), &RetryPolicy::default(), &sleeper).expect("deploy");
        assert_eq!(attempt, 6);
        let sleeps = sleeper.recorded();
        assert_eq!(sleeps.len(), 5);
        assert!(sleeps.iter().all(|d| *d == Duration::from_secs(15)));
    }

    #[test]
    fn six_failures_exhaust_the_budget() {
        let plane = failing(6);
        let sleeper = RecordingSleeper::default();
        let err =
            deploy_with_retry(&plane, &spec(), &RetryPolicy::default(), &sleeper).unwrap_err();
        assert!(matches!(err, Error::DeployExhausted { attempts: 6 }));
        // No sleep after the final failure.
        assert_eq!(sleeper.recorded().len(), 5);
        assert_eq!(plane.deploy_attempts(), 6);
    }
}

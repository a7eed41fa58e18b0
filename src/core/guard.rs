use crate::utils::error::{LottoError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Allows at most one in-flight operation at a time.
#[derive(Debug, Clone)]
pub struct InFlightGuard {
    operation: &'static str,
    busy: Arc<AtomicBool>,
}

/// Held for the duration of the operation; releases the guard on drop.
#[derive(Debug)]
pub struct FlightPermit {
    busy: Arc<AtomicBool>,
}

impl InFlightGuard {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn try_acquire(&self) -> Result<FlightPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| LottoError::AlreadyInProgress {
                operation: self.operation,
            })?;

        Ok(FlightPermit {
            busy: Arc::clone(&self.busy),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for FlightPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

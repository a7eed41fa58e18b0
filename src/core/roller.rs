use crate::core::generator::{draw_pair, random_result};
use crate::core::guard::InFlightGuard;
use crate::core::history::SharedHistory;
use crate::domain::model::{LuckyResult, RollFrame};
use crate::domain::ports::DigitSource;
use crate::utils::error::Result;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::time::{Instant, MissedTickBehavior};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollTiming {
    /// 動畫總長度；為零時不產生中間畫面
    pub duration: Duration,
    pub interval: Duration,
}

impl RollTiming {
    pub fn new(duration: Duration, interval: Duration) -> Self {
        Self { duration, interval }
    }

    /// No intermediate frames; the roll finalizes immediately.
    pub fn instant() -> Self {
        Self {
            duration: Duration::ZERO,
            interval: MIN_INTERVAL,
        }
    }
}

impl Default for RollTiming {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1500),
            interval: Duration::from_millis(50),
        }
    }
}

/// Clears the `rolling` flag on the published frame when a roll ends without finalizing.
struct SettleOnDrop<'a> {
    frames: &'a watch::Sender<RollFrame>,
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        self.frames.send_if_modified(|frame| {
            if frame.rolling {
                frame.rolling = false;
                true
            } else {
                false
            }
        });
    }
}

/// Runs rolls: animated regeneration, then one finalized and recorded result.
pub struct Roller<D: DigitSource> {
    source: Mutex<D>,
    history: SharedHistory,
    timing: RollTiming,
    guard: InFlightGuard,
    frames: watch::Sender<RollFrame>,
}

impl<D: DigitSource> Roller<D> {
    pub fn new(source: D, history: SharedHistory, timing: RollTiming) -> Self {
        let (frames, _) = watch::channel(RollFrame::default());
        Self {
            source: Mutex::new(source),
            history,
            timing,
            guard: InFlightGuard::new("roll"),
            frames,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RollFrame> {
        self.frames.subscribe()
    }

    pub fn current_frame(&self) -> RollFrame {
        self.frames.borrow().clone()
    }

    pub fn is_rolling(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn timing(&self) -> RollTiming {
        self.timing
    }

    /// Fails with `AlreadyInProgress` while another roll on this roller is running.
    pub async fn roll(&self) -> Result<LuckyResult> {
        let _permit = self.guard.try_acquire()?;
        let _settle = SettleOnDrop {
            frames: &self.frames,
        };
        tracing::debug!(
            "Roll started (duration {:?}, interval {:?})",
            self.timing.duration,
            self.timing.interval
        );

        if !self.timing.duration.is_zero() {
            let started = Instant::now();
            let mut ticker = tokio::time::interval(self.timing.interval.max(MIN_INTERVAL));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            while started.elapsed() < self.timing.duration {
                ticker.tick().await;
                let (two_digits, three_digits) = {
                    let mut source = self.source.lock().await;
                    draw_pair(&mut *source)
                };
                self.frames.send_replace(RollFrame {
                    two_digits,
                    three_digits,
                    rolling: true,
                });
            }
        }

        // 最終號碼重新抽取，與中間畫面無關
        let result = {
            let mut source = self.source.lock().await;
            random_result(&mut *source)?
        };

        self.frames.send_replace(RollFrame {
            two_digits: result.two_digits().concat(),
            three_digits: result.three_digits().concat(),
            rolling: false,
        });
        self.history.record(result.clone()).await;

        tracing::info!(
            "🎲 Rolled {} / {}",
            result.two_digits().concat(),
            result.three_digits().concat()
        );
        Ok(result)
    }
}

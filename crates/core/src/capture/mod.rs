use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use crate::{AmplitudeVector, CaptureConfig, EqualizerError, RawCapture, Result};

/// A capture as handed from the driver to the rendering side.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizerFrame {
    pub capture: RawCapture,
    /// Time since the previous frame, zero for the first frame or after a
    /// stall.
    pub since_last: Duration,
}

impl VisualizerFrame {
    pub fn amplitudes(&self, resolution: usize) -> AmplitudeVector {
        self.capture.resample(resolution)
    }
}

/// Bookkeeping for the capture callback: frame timing and rate logging.
#[derive(Debug, Clone)]
pub struct CaptureMonitor {
    stale_after: Duration,
    log_every: u64,
    captures: u64,
    started: Option<Instant>,
    last_frame: Option<Instant>,
}

impl CaptureMonitor {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            stale_after: config.stale_after(),
            log_every: config.log_every,
            captures: 0,
            started: None,
            last_frame: None,
        }
    }

    /// Records a capture received at `now` and wraps it into a frame.
    pub fn on_capture(&mut self, capture: RawCapture, now: Instant) -> VisualizerFrame {
        let started = *self.started.get_or_insert(now);
        self.captures += 1;

        if self.log_every > 0 && self.captures % self.log_every == 0 {
            let elapsed = now.duration_since(started).as_secs_f64();
            let rate = if elapsed > 0.0 {
                self.captures as f64 / elapsed
            } else {
                0.0
            };
            tracing::info!(captures = self.captures, rate, "capture rate");
        }

        let since_last = self
            .last_frame
            .map(|last| now.duration_since(last))
            .filter(|gap| *gap < self.stale_after)
            .unwrap_or(Duration::ZERO);
        self.last_frame = Some(now);

        VisualizerFrame {
            capture,
            since_last,
        }
    }

    pub fn captures(&self) -> u64 {
        self.captures
    }

    /// Captures per second since the first capture, if measurable.
    pub fn rate(&self, now: Instant) -> Option<f64> {
        let elapsed = now.duration_since(self.started?).as_secs_f64();
        (elapsed > 0.0).then(|| self.captures as f64 / elapsed)
    }
}

/// Latest-frame slot shared between the capture driver and renderers.
#[derive(Debug)]
pub struct CaptureHub {
    monitor: Mutex<CaptureMonitor>,
    latest: Arc<Mutex<Option<VisualizerFrame>>>,
}

impl CaptureHub {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            monitor: Mutex::new(CaptureMonitor::new(config)),
            latest: Arc::new(Mutex::new(None)),
        }
    }

    /// Publishes a capture received now. Called from the driver callback.
    pub fn publish(&self, capture: RawCapture) -> Result<()> {
        self.publish_at(capture, Instant::now())
    }

    pub fn publish_at(&self, capture: RawCapture, now: Instant) -> Result<()> {
        let frame = self.lock_monitor()?.on_capture(capture, now);
        *lock_slot(&self.latest)? = Some(frame);
        Ok(())
    }

    /// Returns a reader handle that observes every published frame.
    pub fn handle(&self) -> FrameHandle {
        FrameHandle {
            shared: self.latest.clone(),
        }
    }

    pub fn captures(&self) -> Result<u64> {
        Ok(self.lock_monitor()?.captures())
    }

    fn lock_monitor(&self) -> Result<MutexGuard<'_, CaptureMonitor>> {
        self.monitor
            .lock()
            .map_err(|_| EqualizerError::msg("capture monitor has been poisoned"))
    }
}

/// Cloneable, thread-safe view over the latest frame of a [`CaptureHub`].
#[derive(Clone)]
pub struct FrameHandle {
    shared: Arc<Mutex<Option<VisualizerFrame>>>,
}

impl FrameHandle {
    pub fn latest(&self) -> Result<Option<VisualizerFrame>> {
        Ok(lock_slot(&self.shared)?.clone())
    }
}

impl std::fmt::Debug for FrameHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameHandle").finish()
    }
}

fn lock_slot(
    slot: &Mutex<Option<VisualizerFrame>>,
) -> Result<MutexGuard<'_, Option<VisualizerFrame>>> {
    slot.lock()
        .map_err(|_| EqualizerError::msg("frame slot has been poisoned"))
}

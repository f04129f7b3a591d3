use crate::{
    action::Action,
    dispatch::{Dispatch, Dispatcher},
    error::Error,
    gesture::{classify, Gesture},
    keys::KeySink,
    source::{Frame, FrameSource},
};
use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};
use tracing::{info, trace};

/// What a single frame turned into.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Outcome {
    pub(crate) gesture: Gesture,
    pub(crate) action: Action,
    pub(crate) dispatched: Option<Dispatch>,
}

#[derive(Debug, Copy, Clone, Default)]
pub(crate) struct Stats {
    pub(crate) frames: usize,
    pub(crate) dispatches: usize,
    pub(crate) processing: Duration,
}

/// Classify, map and debounce frames, pressing a key for every dispatch.
pub(crate) struct Pipeline<K> {
    dispatcher: Dispatcher,
    sink: K,
    stats: Stats,
}

impl<K> Pipeline<K>
where
    K: KeySink,
{
    pub(crate) fn new(sink: K) -> Self {
        Self {
            dispatcher: Dispatcher::new(),
            sink,
            stats: Default::default(),
        }
    }

    pub(crate) fn stats(&self) -> Stats {
        self.stats
    }

    pub(crate) fn step(&mut self, frame: &Frame) -> Result<Outcome, Error> {
        let start = Instant::now();
        let gesture = classify(frame.hand());
        let action = Action::from(gesture);
        trace!(hands = frame.hands.len(), %gesture, %action);

        let dispatched = self.dispatcher.update(action, frame.timestamp);
        if let Some(Dispatch { action, held }) = dispatched {
            if let Some(key) = action.key() {
                self.sink.press(key)?;
                info!(%action, %key, held_secs = held.as_secs_f64(), "gesture executed");
                self.stats.dispatches += 1;
            }
        }

        self.stats.frames += 1;
        self.stats.processing += start.elapsed();
        Ok(Outcome {
            gesture,
            action,
            dispatched,
        })
    }

    /// Process frames until the source runs dry, the source asks to stop, or `running` is cleared.
    pub(crate) fn run<S>(
        &mut self,
        source: &mut S,
        running: &AtomicBool,
        progress: Option<&indicatif::ProgressBar>,
    ) -> Result<Stats, Error>
    where
        S: FrameSource + ?Sized,
    {
        while running.load(Ordering::SeqCst) {
            let frame = match source.next_frame()? {
                Some(frame) => frame,
                None => {
                    info!("landmark source exhausted");
                    break;
                }
            };

            let outcome = self.step(&frame)?;

            if let Some(progress) = progress {
                progress.set_message(format!(
                    "gesture: {:<15} action: {:<5} armed: {:<5} dispatches: {}",
                    outcome.gesture,
                    outcome.action,
                    self.dispatcher.current(),
                    self.stats.dispatches
                ));
                progress.inc(1);
            }

            if !source.present(&frame, &outcome)? {
                info!("stopped from display");
                break;
            }
        }
        Ok(self.stats())
    }
}

use crate::{error::Error, hand::HandPose, pipeline::Outcome};
use std::time::Instant;

#[cfg(feature = "camera")]
mod camera;
mod record;
mod stream;

/// The hands detected in one frame, and when the frame was taken.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub(crate) hands: Vec<HandPose>,
    pub(crate) timestamp: Instant,
}

impl Frame {
    /// The hand that drives the game. Extra detections are ignored.
    pub(crate) fn hand(&self) -> Option<&HandPose> {
        self.hands.first()
    }
}

pub(crate) trait FrameSource {
    /// Produce the next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<Frame>, Error>;

    /// Show the result of processing `frame`. Returning `false` stops the frame loop.
    fn present(&mut self, _frame: &Frame, _outcome: &Outcome) -> Result<bool, Error> {
        Ok(true)
    }
}

impl<S> FrameSource for Box<S>
where
    S: FrameSource + ?Sized,
{
    fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        (**self).next_frame()
    }

    fn present(&mut self, frame: &Frame, outcome: &Outcome) -> Result<bool, Error> {
        (**self).present(frame, outcome)
    }
}

#[derive(Debug, structopt::StructOpt)]
pub(crate) enum Source {
    /// Read hand landmarks as JSON lines from a file or stdin
    Stream(stream::StreamOpt),
    /// Capture frames from a camera and run them through an external landmarker
    #[cfg(feature = "camera")]
    Camera(camera::CameraOpt),
}

impl Source {
    pub(crate) fn open(self) -> Result<Box<dyn FrameSource>, Error> {
        match self {
            Self::Stream(opt) => opt.open(),
            #[cfg(feature = "camera")]
            Self::Camera(opt) => Ok(Box::new(camera::Camera::new(opt)?)),
        }
    }
}

#[cfg(test)]
pub(crate) use stream::Stream;

#[cfg(test)]
pub(crate) mod tests {
    use crate::hand::{LandmarkKind, NUM_LANDMARKS};

    /// Render one JSON hand with the given fingers raised.
    pub(crate) fn hand_json(index: bool, middle: bool, ring: bool, pinky: bool) -> String {
        let raised = [
            (LandmarkKind::IndexTip, index),
            (LandmarkKind::MiddleTip, middle),
            (LandmarkKind::RingTip, ring),
            (LandmarkKind::PinkyTip, pinky),
        ];
        let points = (0..NUM_LANDMARKS)
            .map(|i| {
                let up = raised
                    .iter()
                    .any(|&(kind, open)| open && kind.idx().unwrap() == i);
                let y = if up { 0.3 } else { 0.6 };
                format!(r#"{{"x":0.5,"y":{},"z":-0.01}}"#, y)
            })
            .collect::<Vec<_>>();
        format!("[{}]", points.join(","))
    }

    pub(crate) fn record_json(t: f64, hand: Option<String>) -> String {
        match hand {
            Some(hand) => format!(r#"{{"t":{},"hands":[{}]}}"#, t, hand),
            None => format!(r#"{{"t":{},"hands":[]}}"#, t),
        }
    }
}

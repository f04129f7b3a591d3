use crate::error::Error;
#[cfg(any(feature = "camera", test))]
use num_traits::{FromPrimitive, ToPrimitive};
use ordered_float::NotNan;
use std::convert::TryFrom;

/// The 21 points of the standard hand skeleton, in detector index order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, num_derive::FromPrimitive, num_derive::ToPrimitive)]
pub(crate) enum LandmarkKind {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

#[cfg(any(feature = "camera", test))]
impl LandmarkKind {
    pub(crate) fn idx(self) -> Result<usize, Error> {
        self.to_usize().ok_or(Error::LandmarkVariantToUSize(self))
    }

    pub(crate) fn from_idx(index: usize) -> Result<Self, Error> {
        Self::from_usize(index).ok_or(Error::ConvertUSizeToLandmarkKind(index))
    }
}

pub(crate) const NUM_LANDMARKS: usize = 21;

/// A detector coordinate normalized to the frame, `(0, 0)` being the top left corner.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub(crate) struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub(crate) fn new(x: f32, y: f32) -> Result<Self, Error> {
        Ok(Self {
            x: finite(x)?,
            y: finite(y)?,
        })
    }

    #[inline]
    pub(crate) fn x(self) -> f32 {
        self.x
    }

    #[inline]
    pub(crate) fn y(self) -> f32 {
        self.y
    }
}

fn finite(value: f32) -> Result<f32, Error> {
    let value = NotNan::new(value)
        .map_err(|e| Error::ConstructNotNan(e, value))?
        .into_inner();
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InfiniteCoordinate(value))
    }
}

#[cfg(any(feature = "camera", test))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Landmark {
    pub(crate) kind: LandmarkKind,
    pub(crate) point: Point,
}

/// All landmarks of a single detected hand, indexed by `LandmarkKind`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct HandPose {
    landmarks: [Point; NUM_LANDMARKS],
}

impl HandPose {
    pub(crate) fn new(landmarks: [Point; NUM_LANDMARKS]) -> Self {
        Self { landmarks }
    }

    #[inline]
    pub(crate) fn point(&self, kind: LandmarkKind) -> Point {
        // discriminants are 0..NUM_LANDMARKS
        self.landmarks[kind as usize]
    }

    #[cfg(any(feature = "camera", test))]
    pub(crate) fn landmarks(&self) -> impl Iterator<Item = Result<Landmark, Error>> + '_ {
        self.landmarks
            .iter()
            .enumerate()
            .map(|(index, &point)| {
                Ok(Landmark {
                    kind: LandmarkKind::from_idx(index)?,
                    point,
                })
            })
    }
}

impl TryFrom<Vec<Point>> for HandPose {
    type Error = Error;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        let len = points.len();
        let landmarks = <[Point; NUM_LANDMARKS]>::try_from(points)
            .map_err(|_| Error::LandmarkCount(NUM_LANDMARKS, len))?;
        Ok(Self::new(landmarks))
    }
}

pub(crate) mod constants {
    use crate::hand::LandmarkKind::{self, *};

    /// Bone segments drawn when overlaying a hand on a frame.
    #[cfg(feature = "camera")]
    pub(crate) const HAND_CONNECTIONS: [(LandmarkKind, LandmarkKind); 21] = [
        (Wrist, ThumbCmc),
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        (Wrist, IndexMcp),
        (IndexMcp, IndexPip),
        (IndexPip, IndexDip),
        (IndexDip, IndexTip),
        (IndexMcp, MiddleMcp),
        (MiddleMcp, MiddlePip),
        (MiddlePip, MiddleDip),
        (MiddleDip, MiddleTip),
        (MiddleMcp, RingMcp),
        (RingMcp, RingPip),
        (RingPip, RingDip),
        (RingDip, RingTip),
        (RingMcp, PinkyMcp),
        (Wrist, PinkyMcp),
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
    ];

    /// `(tip, pip)` pairs for the four non-thumb fingers: index, middle, ring, pinky.
    pub(crate) const FINGER_JOINTS: [(LandmarkKind, LandmarkKind); 4] = [
        (IndexTip, IndexPip),
        (MiddleTip, MiddlePip),
        (RingTip, RingPip),
        (PinkyTip, PinkyPip),
    ];
}

use crate::hand::{constants::FINGER_JOINTS, HandPose};
use std::fmt;

/// How far (in normalized units) a fingertip must rise above its pip joint to count as open.
pub(crate) const OPEN_MARGIN: f32 = 0.02;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Gesture {
    IndexUp,
    MiddleUp,
    IndexMiddleUp,
    Fist,
    Palm,
    None,
}

impl Gesture {
    #[cfg(test)]
    pub(crate) const ALL: [Gesture; 6] = [
        Gesture::IndexUp,
        Gesture::MiddleUp,
        Gesture::IndexMiddleUp,
        Gesture::Fist,
        Gesture::Palm,
        Gesture::None,
    ];

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::IndexUp => "INDEX_UP",
            Self::MiddleUp => "MIDDLE_UP",
            Self::IndexMiddleUp => "INDEX_MIDDLE_UP",
            Self::Fist => "FIST",
            Self::Palm => "PALM",
            Self::None => "NONE",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Open state of the index, middle, ring and pinky fingers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Fingers {
    pub(crate) index: bool,
    pub(crate) middle: bool,
    pub(crate) ring: bool,
    pub(crate) pinky: bool,
}

impl Fingers {
    pub(crate) fn of(hand: &HandPose) -> Self {
        let [index, middle, ring, pinky] = FINGER_JOINTS.map(|(tip, pip)| {
            // smaller y is higher up in the frame
            hand.point(tip).y() < hand.point(pip).y() - OPEN_MARGIN
        });
        Self {
            index,
            middle,
            ring,
            pinky,
        }
    }

    pub(crate) fn gesture(self) -> Gesture {
        match (self.index, self.middle, self.ring, self.pinky) {
            (true, false, false, false) => Gesture::IndexUp,
            (false, true, false, false) => Gesture::MiddleUp,
            (true, true, false, false) => Gesture::IndexMiddleUp,
            (true, true, true, true) => Gesture::Palm,
            (false, false, false, false) => Gesture::Fist,
            _ => Gesture::None,
        }
    }
}

/// Classify a single hand. No hand is always `Gesture::None`.
pub(crate) fn classify(hand: Option<&HandPose>) -> Gesture {
    hand.map_or(Gesture::None, |hand| Fingers::of(hand).gesture())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{
        tests::{flat_hand, with_y},
        LandmarkKind,
    };

    const PIP_Y: f32 = 0.5;

    fn hand_with_tips(index: f32, middle: f32, ring: f32, pinky: f32) -> HandPose {
        let hand = flat_hand();
        let hand = with_y(hand, LandmarkKind::IndexTip, index);
        let hand = with_y(hand, LandmarkKind::MiddleTip, middle);
        let hand = with_y(hand, LandmarkKind::RingTip, ring);
        with_y(hand, LandmarkKind::PinkyTip, pinky)
    }

    fn tip(open: bool) -> f32 {
        if open {
            PIP_Y - 0.1
        } else {
            PIP_Y + 0.1
        }
    }

    mod fingers_tests {
        use super::*;

        #[test]
        fn all_sixteen_combinations() {
            for bits in 0..16_u8 {
                let fingers = Fingers {
                    index: bits & 0b1000 != 0,
                    middle: bits & 0b0100 != 0,
                    ring: bits & 0b0010 != 0,
                    pinky: bits & 0b0001 != 0,
                };
                let expected = match bits {
                    0b1000 => Gesture::IndexUp,
                    0b0100 => Gesture::MiddleUp,
                    0b1100 => Gesture::IndexMiddleUp,
                    0b1111 => Gesture::Palm,
                    0b0000 => Gesture::Fist,
                    _ => Gesture::None,
                };
                assert_eq!(fingers.gesture(), expected, "combination {:04b}", bits);
            }
        }

        #[test]
        fn reads_each_finger_from_its_own_joints() {
            let hand = hand_with_tips(tip(false), tip(true), tip(false), tip(true));
            let fingers = Fingers::of(&hand);
            assert_eq!(
                fingers,
                Fingers {
                    index: false,
                    middle: true,
                    ring: false,
                    pinky: true,
                }
            );
        }
    }

    mod classify_tests {
        use super::*;

        #[test]
        fn no_hand() {
            assert_eq!(classify(None), Gesture::None);
        }

        #[test]
        fn index_above_margin() {
            let hand = hand_with_tips(PIP_Y - 0.03, tip(false), tip(false), tip(false));
            assert_eq!(classify(Some(&hand)), Gesture::IndexUp);
        }

        #[test]
        fn index_within_margin_is_closed() {
            let hand = hand_with_tips(PIP_Y - 0.01, tip(false), tip(false), tip(false));
            assert_eq!(classify(Some(&hand)), Gesture::Fist);
        }

        #[test]
        fn tip_level_with_joint_is_closed() {
            assert_eq!(classify(Some(&flat_hand())), Gesture::Fist);
        }

        #[test]
        fn open_palm() {
            let hand = hand_with_tips(tip(true), tip(true), tip(true), tip(true));
            assert_eq!(classify(Some(&hand)), Gesture::Palm);
        }

        #[test]
        fn peace_sign() {
            let hand = hand_with_tips(tip(true), tip(true), tip(false), tip(false));
            assert_eq!(classify(Some(&hand)), Gesture::IndexMiddleUp);
        }

        #[test]
        fn middle_finger() {
            let hand = hand_with_tips(tip(false), tip(true), tip(false), tip(false));
            assert_eq!(classify(Some(&hand)), Gesture::MiddleUp);
        }

        #[test]
        fn three_fingers_is_unrecognized() {
            let hand = hand_with_tips(tip(true), tip(true), tip(true), tip(false));
            assert_eq!(classify(Some(&hand)), Gesture::None);
        }
    }

    #[test]
    fn labels() {
        let labels = Gesture::ALL
            .iter()
            .map(|gesture| gesture.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            ["INDEX_UP", "MIDDLE_UP", "INDEX_MIDDLE_UP", "FIST", "PALM", "NONE"]
        );
    }
}

use crate::{
    error::Error,
    hand::{HandPose, Point},
};
use serde::Deserialize;
use std::{convert::TryFrom, time::Duration};

#[derive(Debug, Deserialize)]
struct RawPoint {
    x: f32,
    y: f32,
}

/// One line of landmarker output.
#[derive(Debug, Deserialize)]
pub(super) struct Record {
    /// Seconds since the start of the stream.
    #[serde(default)]
    t: Option<f64>,
    #[serde(default)]
    hands: Option<Vec<Vec<RawPoint>>>,
}

impl Record {
    pub(super) fn parse(line: &str, line_number: usize) -> Result<Self, Error> {
        serde_json::from_str(line).map_err(|e| Error::ParseRecord(e, line_number))
    }

    pub(super) fn offset(&self, line_number: usize) -> Result<Option<Duration>, Error> {
        match self.t {
            Some(t) => Duration::try_from_secs_f64(t)
                .map(Some)
                .map_err(|_| Error::InvalidTimestamp(t, line_number)),
            None => Ok(None),
        }
    }

    pub(super) fn into_hands(self, line_number: usize) -> Result<Vec<HandPose>, Error> {
        self.hands
            .unwrap_or_default()
            .into_iter()
            .map(|points| {
                points
                    .into_iter()
                    .map(|RawPoint { x, y }| Point::new(x, y))
                    .collect::<Result<Vec<_>, _>>()
                    .and_then(HandPose::try_from)
                    .map_err(|e| Error::InvalidHand(Box::new(e), line_number))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gesture::{classify, Gesture},
        source::tests::hand_json,
    };
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn missing_hands() {
        let record = Record::parse("{}", 1).unwrap();
        assert_eq!(record.offset(1).unwrap(), None);
        assert!(record.into_hands(1).unwrap().is_empty());
    }

    #[test]
    fn null_hands() {
        let record = Record::parse(r#"{"t": 0.5, "hands": null}"#, 1).unwrap();
        assert_approx_eq!(record.offset(1).unwrap().unwrap().as_secs_f64(), 0.5);
        assert!(record.into_hands(1).unwrap().is_empty());
    }

    #[test]
    fn one_hand() {
        let line = format!(r#"{{"hands": [{}]}}"#, hand_json(true, false, false, false));
        let hands = Record::parse(&line, 3).unwrap().into_hands(3).unwrap();
        assert_eq!(hands.len(), 1);
        assert_eq!(classify(hands.first()), Gesture::IndexUp);
    }

    #[test]
    fn short_hand() {
        let line = r#"{"hands": [[{"x": 0.1, "y": 0.2}]]}"#;
        let err = Record::parse(line, 7).unwrap().into_hands(7).unwrap_err();
        assert!(matches!(err, Error::InvalidHand(_, 7)));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            Record::parse("{\"hands\": [", 2),
            Err(Error::ParseRecord(_, 2))
        ));
    }

    #[test]
    fn negative_timestamp() {
        let record = Record::parse(r#"{"t": -1.0}"#, 4).unwrap();
        assert!(matches!(
            record.offset(4),
            Err(Error::InvalidTimestamp(_, 4))
        ));
    }

    #[test]
    fn timestamp_too_large_for_duration() {
        let record = Record::parse(r#"{"t": 1e30, "hands": []}"#, 5).unwrap();
        assert!(matches!(
            record.offset(5),
            Err(Error::InvalidTimestamp(_, 5))
        ));
    }
}

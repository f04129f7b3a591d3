use super::{record::Record, Frame, FrameSource};
use crate::error::Error;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{debug, info};

#[derive(Debug, structopt::StructOpt)]
pub(crate) struct StreamOpt {
    /// File of landmark records, one JSON object per line. `-` or nothing reads stdin.
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,
}

impl StreamOpt {
    pub(super) fn open(self) -> Result<Box<dyn FrameSource>, Error> {
        match self.input {
            Some(path) if path.as_os_str() != "-" => {
                let file = File::open(&path).map_err(|e| Error::OpenInput(e, path.clone()))?;
                info!(input = %path.display(), "reading landmarks");
                Ok(Box::new(Stream::new(BufReader::new(file))))
            }
            _ => {
                info!("reading landmarks from stdin");
                Ok(Box::new(Stream::new(BufReader::new(io::stdin()))))
            }
        }
    }
}

/// Frames read from a stream of JSON landmark records.
///
/// Records carrying a `t` are placed at that offset from when the stream was opened, so a
/// recording replays with its original timing no matter how fast it is read. Records without
/// one are stamped with the time they were read. A stream is either all stamped or all
/// unstamped, the first record decides which.
pub(crate) struct Stream<R> {
    reader: R,
    buf: String,
    line_number: usize,
    start: Instant,
    stamped: Option<bool>,
    last_offset: Option<Duration>,
}

impl<R> Stream<R>
where
    R: BufRead,
{
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line_number: 0,
            start: Instant::now(),
            stamped: None,
            last_offset: None,
        }
    }

    fn timestamp(&mut self, offset: Option<Duration>) -> Result<Instant, Error> {
        match self.stamped {
            Some(stamped) if stamped != offset.is_some() => {
                return Err(Error::MixedTimestamps(self.line_number))
            }
            Some(_) => {}
            None => self.stamped = Some(offset.is_some()),
        }

        let offset = match offset {
            Some(offset) => offset,
            None => return Ok(Instant::now()),
        };
        if let Some(last) = self.last_offset {
            if offset < last {
                return Err(Error::NonMonotonicTimestamp(
                    offset.as_secs_f64(),
                    last.as_secs_f64(),
                    self.line_number,
                ));
            }
        }
        let timestamp = self.start.checked_add(offset).ok_or_else(|| {
            Error::TimestampOverflow(offset.as_secs_f64(), self.line_number)
        })?;
        self.last_offset = Some(offset);
        Ok(timestamp)
    }
}

impl<R> FrameSource for Stream<R>
where
    R: BufRead,
{
    fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf).map_err(Error::ReadInput)? == 0 {
                debug!(lines = self.line_number, "end of landmark stream");
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }

            let record = Record::parse(line, self.line_number)?;
            let offset = record.offset(self.line_number)?;
            let hands = record.into_hands(self.line_number)?;
            let timestamp = self.timestamp(offset)?;
            return Ok(Some(Frame { hands, timestamp }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::tests::{hand_json, record_json};
    use std::io::Cursor;

    fn stream_of(lines: &[String]) -> Stream<Cursor<String>> {
        Stream::new(Cursor::new(lines.join("\n")))
    }

    #[test]
    fn empty_input() {
        let mut stream = stream_of(&[]);
        assert!(stream.next_frame().unwrap().is_none());
    }

    #[test]
    fn skips_blank_lines() {
        let mut stream = stream_of(&[
            String::new(),
            record_json(0.0, None),
            "   ".to_owned(),
            record_json(1.0, Some(hand_json(false, false, false, false))),
        ]);
        assert!(stream.next_frame().unwrap().unwrap().hands.is_empty());
        assert_eq!(stream.next_frame().unwrap().unwrap().hands.len(), 1);
        assert!(stream.next_frame().unwrap().is_none());
    }

    #[test]
    fn recorded_offsets() {
        let mut stream = stream_of(&[record_json(0.0, None), record_json(2.5, None)]);
        let first = stream.next_frame().unwrap().unwrap().timestamp;
        let second = stream.next_frame().unwrap().unwrap().timestamp;
        assert_eq!(second.duration_since(first), Duration::from_millis(2500));
    }

    #[test]
    fn backwards_offsets() {
        let mut stream = stream_of(&[record_json(2.0, None), record_json(1.0, None)]);
        assert!(stream.next_frame().is_ok());
        assert!(matches!(
            stream.next_frame(),
            Err(Error::NonMonotonicTimestamp(_, _, 2))
        ));
    }

    #[test]
    fn unstamped_records_use_the_clock() {
        let before = Instant::now();
        let mut stream = stream_of(&[r#"{"hands": []}"#.to_owned()]);
        let frame = stream.next_frame().unwrap().unwrap();
        assert!(frame.timestamp >= before);
    }

    #[test]
    fn huge_offsets_are_errors() {
        let mut stream = stream_of(&[
            record_json(0.0, None),
            r#"{"t": 1e19, "hands": []}"#.to_owned(),
        ]);
        assert!(stream.next_frame().is_ok());
        assert!(matches!(
            stream.next_frame(),
            Err(Error::TimestampOverflow(_, 2))
        ));

        let mut stream = stream_of(&[r#"{"t": 1e30, "hands": []}"#.to_owned()]);
        assert!(matches!(
            stream.next_frame(),
            Err(Error::InvalidTimestamp(_, 1))
        ));
    }

    #[test]
    fn mixed_stamping_is_rejected() {
        let mut stream = stream_of(&[
            r#"{"hands": []}"#.to_owned(),
            record_json(0.5, None),
        ]);
        assert!(stream.next_frame().is_ok());
        assert!(matches!(
            stream.next_frame(),
            Err(Error::MixedTimestamps(2))
        ));

        let mut stream = stream_of(&[record_json(0.5, None), r#"{"hands": []}"#.to_owned()]);
        assert!(stream.next_frame().is_ok());
        assert!(matches!(
            stream.next_frame(),
            Err(Error::MixedTimestamps(2))
        ));
    }

    #[test]
    fn bad_record_reports_line() {
        let mut stream = stream_of(&[record_json(0.0, None), "not json".to_owned()]);
        assert!(stream.next_frame().is_ok());
        assert!(matches!(stream.next_frame(), Err(Error::ParseRecord(_, 2))));
    }
}

use super::{record::Record, Frame, FrameSource};
use crate::{
    error::Error,
    hand::{constants::HAND_CONNECTIONS, HandPose, Landmark},
    pipeline::Outcome,
};
use num_traits::cast::ToPrimitive;
use opencv::{
    core::{Mat, Point2i, Scalar, CV_8UC3},
    imgproc::{FONT_HERSHEY_SIMPLEX, LINE_8, LINE_AA},
    prelude::*,
    types::{VectorOfi32, VectorOfu8},
    videoio::{VideoCapture, CAP_ANY, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH},
};
use std::{
    convert::TryFrom,
    io::{BufRead, BufReader, Write},
    process::{Child, ChildStdin, ChildStdout, Command, Stdio},
    time::Instant,
};
use tracing::{info, warn};

const WINDOW_NAME: &str = "Gesture Control";
const ESC_KEY: i32 = 27;
const Q_KEY: u8 = b'q';

const GREEN: (f64, f64, f64) = (0.0, 255.0, 0.0);
const YELLOW: (f64, f64, f64) = (0.0, 255.0, 255.0);
const WHITE: (f64, f64, f64) = (255.0, 255.0, 255.0);

#[derive(Debug, structopt::StructOpt)]
pub(crate) struct CameraOpt {
    /// Video capture device index.
    #[structopt(short, long, default_value = "0")]
    device: i32,

    /// The width of the captured frame.
    #[structopt(long)]
    frame_width: Option<u16>,

    /// The height of the captured frame.
    #[structopt(long)]
    frame_height: Option<u16>,

    /// Milliseconds to wait for a key press in the display window.
    #[structopt(short = "W", long, default_value = "5")]
    wait_key_ms: i32,

    /// Show and classify the frame as captured instead of mirrored.
    #[structopt(long)]
    no_mirror: bool,

    /// Landmarker command. It receives length-prefixed JPEG frames on stdin and
    /// answers each with one JSON landmark record on stdout.
    #[structopt(required = true, last = true)]
    landmarker: Vec<String>,
}

/// A camera whose frames are turned into hands by a landmarker subprocess.
pub(crate) struct Camera {
    capture: VideoCapture,
    raw_frame: Mat,
    frame: Mat,
    encoded: VectorOfu8,
    mirror: bool,
    wait_key_ms: i32,
    landmarker: Child,
    to_landmarker: ChildStdin,
    from_landmarker: BufReader<ChildStdout>,
    line: String,
    frame_num: usize,
}

impl Camera {
    pub(crate) fn new(opt: CameraOpt) -> Result<Self, Error> {
        let mut capture = VideoCapture::new(opt.device, CAP_ANY)
            .map_err(|e| Error::OpenCapture(e, opt.device))?;

        if let Some(width) = opt.frame_width.map(f64::from) {
            capture
                .set(CAP_PROP_FRAME_WIDTH, width)
                .map_err(Error::SetCaptureProperty)?;
        }

        if let Some(height) = opt.frame_height.map(f64::from) {
            capture
                .set(CAP_PROP_FRAME_HEIGHT, height)
                .map_err(Error::SetCaptureProperty)?;
        }

        let width = capture
            .get(CAP_PROP_FRAME_WIDTH)
            .map_err(Error::GetCaptureProperty)?
            .to_i32()
            .ok_or(Error::ConvertToI32)?;
        let height = capture
            .get(CAP_PROP_FRAME_HEIGHT)
            .map_err(Error::GetCaptureProperty)?
            .to_i32()
            .ok_or(Error::ConvertToI32)?;

        info!(message = "got dimensions from video capture", width, height);

        let zeros = || -> Result<Mat, Error> {
            Mat::zeros(height, width, CV_8UC3)
                .and_then(|expr| expr.to_mat())
                .map_err(Error::AllocateFrame)
        };

        let (program, args) = opt
            .landmarker
            .split_first()
            .ok_or(Error::EmptyLandmarkerCommand)?;
        let mut landmarker = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| Error::SpawnLandmarker(e, program.clone()))?;
        let to_landmarker = landmarker
            .stdin
            .take()
            .ok_or(Error::LandmarkerPipe("stdin"))?;
        let from_landmarker = BufReader::new(
            landmarker
                .stdout
                .take()
                .ok_or(Error::LandmarkerPipe("stdout"))?,
        );
        info!(landmarker = %program, pid = landmarker.id(), "spawned landmarker");

        Ok(Self {
            capture,
            raw_frame: zeros()?,
            frame: zeros()?,
            encoded: VectorOfu8::new(),
            mirror: !opt.no_mirror,
            wait_key_ms: opt.wait_key_ms,
            landmarker,
            to_landmarker,
            from_landmarker,
            line: String::new(),
            frame_num: 0,
        })
    }

    fn send_frame(&mut self) -> Result<(), Error> {
        opencv::imgcodecs::imencode(".jpg", &self.frame, &mut self.encoded, &VectorOfi32::new())
            .map_err(Error::EncodeFrame)?;
        let bytes = self.encoded.to_vec();
        let len = u32::try_from(bytes.len()).map_err(Error::ConvertFrameLength)?;

        self.to_landmarker
            .write_all(&len.to_le_bytes())
            .and_then(|_| self.to_landmarker.write_all(&bytes))
            .and_then(|_| self.to_landmarker.flush())
            .map_err(Error::WriteLandmarker)
    }

    fn draw_hand(&mut self, hand: &HandPose) -> Result<(), Error> {
        let width = f64::from(self.frame.cols());
        let height = f64::from(self.frame.rows());
        let to_pixel = |landmark: Landmark| -> Result<Point2i, Error> {
            let x = (f64::from(landmark.point.x()) * width)
                .round()
                .to_i32()
                .ok_or(Error::ConvertToI32)?;
            let y = (f64::from(landmark.point.y()) * height)
                .round()
                .to_i32()
                .ok_or(Error::ConvertToI32)?;
            Ok(Point2i::new(x, y))
        };

        let pixels = hand
            .landmarks()
            .map(|landmark| landmark.and_then(&to_pixel))
            .collect::<Result<Vec<_>, _>>()?;

        for (a, b) in HAND_CONNECTIONS.iter() {
            opencv::imgproc::line(
                &mut self.frame,
                pixels[a.idx()?],
                pixels[b.idx()?],
                Scalar::from(YELLOW),
                2,      // thickness
                LINE_8, // line_type
                0,      // shift
            )
            .map_err(Error::DrawLine)?;
        }

        for &pixel in &pixels {
            opencv::imgproc::circle(
                &mut self.frame,
                pixel,
                4,
                Scalar::from(GREEN),
                -1,     // filled
                LINE_8, // line_type
                0,      // shift
            )
            .map_err(Error::DrawCircle)?;
        }
        Ok(())
    }
}

impl FrameSource for Camera {
    fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        if !self
            .capture
            .read(&mut self.raw_frame)
            .map_err(Error::ReadFrame)?
        {
            warn!("reading frame returned false");
            return Ok(None);
        }
        let timestamp = Instant::now();
        self.frame_num += 1;

        if self.mirror {
            opencv::core::flip(&self.raw_frame, &mut self.frame, 1).map_err(Error::FlipFrame)?;
        } else {
            self.raw_frame
                .copy_to(&mut self.frame)
                .map_err(Error::CopyFrame)?;
        }

        self.send_frame()?;

        self.line.clear();
        if self
            .from_landmarker
            .read_line(&mut self.line)
            .map_err(Error::ReadLandmarker)?
            == 0
        {
            warn!("landmarker closed its output");
            return Ok(None);
        }

        // the landmarker answers in frame order, so the frame count is the record's line number
        let record = Record::parse(self.line.trim(), self.frame_num)?;
        let hands = record.into_hands(self.frame_num)?;
        Ok(Some(Frame { hands, timestamp }))
    }

    fn present(&mut self, frame: &Frame, outcome: &Outcome) -> Result<bool, Error> {
        for hand in &frame.hands {
            self.draw_hand(hand)?;
        }

        let text = format!("{} -> {}", outcome.gesture, outcome.action);
        opencv::imgproc::put_text(
            &mut self.frame,
            &text,
            Point2i::new(10, 30),
            FONT_HERSHEY_SIMPLEX,
            0.8,
            Scalar::from(WHITE),
            2,       // thickness
            LINE_AA, // line_type
            false,   // bottom_left_origin
        )
        .map_err(Error::PutText)?;
        opencv::highgui::imshow(WINDOW_NAME, &self.frame).map_err(Error::ImShow)?;

        let key = opencv::highgui::wait_key(self.wait_key_ms).map_err(Error::WaitKey)? & 0xFF;
        Ok(key != ESC_KEY && key != i32::from(Q_KEY))
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        if let Err(e) = self.landmarker.kill() {
            warn!(error = %e, "failed to stop landmarker");
        }
        if let Err(e) = self.landmarker.wait() {
            warn!(error = %e, "failed to reap landmarker");
        }
    }
}

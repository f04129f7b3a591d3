#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[cfg(any(feature = "camera", test))]
    #[error("failed to convert usize value to landmark kind: {0}")]
    ConvertUSizeToLandmarkKind(usize),

    #[cfg(any(feature = "camera", test))]
    #[error("failed to convert landmark variant to usize: {0:?}")]
    LandmarkVariantToUSize(crate::hand::LandmarkKind),

    #[error("failed to construct NotNan from f32: {1}")]
    ConstructNotNan(#[source] ordered_float::FloatIsNan, f32),

    #[error("landmark coordinate is not finite: {0}")]
    InfiniteCoordinate(f32),

    #[error("expected {0} hand landmarks, got {1}")]
    LandmarkCount(usize, usize),

    #[error("failed to parse landmark record on line {1}")]
    ParseRecord(#[source] serde_json::Error, usize),

    #[error("invalid hand on line {1}")]
    InvalidHand(#[source] Box<Error>, usize),

    #[error("invalid timestamp {0} on line {1}")]
    InvalidTimestamp(f64, usize),

    #[error("timestamp {0} on line {1} is too far from the start of the stream")]
    TimestampOverflow(f64, usize),

    #[error("line {0} mixes records with and without timestamps")]
    MixedTimestamps(usize),

    #[error("timestamp {0} on line {2} is earlier than the previous timestamp {1}")]
    NonMonotonicTimestamp(f64, f64, usize),

    #[error("failed to open landmark input: {1:?}")]
    OpenInput(#[source] std::io::Error, std::path::PathBuf),

    #[error("failed to read landmark input")]
    ReadInput(#[source] std::io::Error),

    #[error("failed to press key {0}: {1}")]
    PressKey(crate::keys::Key, String),

    #[cfg(feature = "keyboard")]
    #[error("failed to connect to the keyboard: {0}")]
    ConnectKeyboard(String),

    #[cfg(feature = "camera")]
    #[error("failed to open video capture device {1}")]
    OpenCapture(#[source] opencv::Error, i32),

    #[cfg(feature = "camera")]
    #[error("failed to set video capture property")]
    SetCaptureProperty(#[source] opencv::Error),

    #[cfg(feature = "camera")]
    #[error("failed to get video capture property")]
    GetCaptureProperty(#[source] opencv::Error),

    #[cfg(feature = "camera")]
    #[error("failed to convert value to i32")]
    ConvertToI32,

    #[cfg(feature = "camera")]
    #[error("failed to allocate frame")]
    AllocateFrame(#[source] opencv::Error),

    #[cfg(feature = "camera")]
    #[error("failed to read frame")]
    ReadFrame(#[source] opencv::Error),

    #[cfg(feature = "camera")]
    #[error("failed to mirror frame")]
    FlipFrame(#[source] opencv::Error),

    #[cfg(feature = "camera")]
    #[error("failed to copy frame")]
    CopyFrame(#[source] opencv::Error),

    #[cfg(feature = "camera")]
    #[error("failed to encode frame")]
    EncodeFrame(#[source] opencv::Error),

    #[cfg(feature = "camera")]
    #[error("failed to convert encoded frame length to u32")]
    ConvertFrameLength(#[source] std::num::TryFromIntError),

    #[cfg(feature = "camera")]
    #[error("landmarker command is empty")]
    EmptyLandmarkerCommand,

    #[cfg(feature = "camera")]
    #[error("failed to spawn landmarker: {1}")]
    SpawnLandmarker(#[source] std::io::Error, String),

    #[cfg(feature = "camera")]
    #[error("landmarker process has no {0} pipe")]
    LandmarkerPipe(&'static str),

    #[cfg(feature = "camera")]
    #[error("failed to send frame to landmarker")]
    WriteLandmarker(#[source] std::io::Error),

    #[cfg(feature = "camera")]
    #[error("failed to read landmarks from landmarker")]
    ReadLandmarker(#[source] std::io::Error),

    #[cfg(feature = "camera")]
    #[error("failed to draw line")]
    DrawLine(#[source] opencv::Error),

    #[cfg(feature = "camera")]
    #[error("failed to draw circle")]
    DrawCircle(#[source] opencv::Error),

    #[cfg(feature = "camera")]
    #[error("failed to draw text")]
    PutText(#[source] opencv::Error),

    #[cfg(feature = "camera")]
    #[error("failed to show image")]
    ImShow(#[source] opencv::Error),

    #[cfg(feature = "camera")]
    #[error("failed to wait for key")]
    WaitKey(#[source] opencv::Error),
}

// One error type for the whole simulator.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Severity name outside MILD / MODERATE / SEVERE / EXTREME.
    #[error("unknown glaucoma level: {0:?} (expected MILD, MODERATE, SEVERE or EXTREME)")]
    UnknownLevel(String),

    /// A filter parameter or buffer that cannot produce a well-formed frame.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("window init error: {0}")]
    WindowInit(String),

    #[error("window update error: {0}")]
    WindowUpdate(String),

    #[error("camera init error: {0}")]
    CameraInit(String),

    #[error("camera frame error: {0}")]
    CameraFrame(String),
}

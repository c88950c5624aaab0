use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    // connection could not be established
    TransportError = 1001,
    // no response within the resource bound
    TimeoutError = 1002,
    // response received with a non-success status
    HttpStatusError = 1003,
    // success status but unparsable or unexpected payload
    PayloadError = 1004,
    // user input rejected before any request
    ValidationError = 1005,
    // a newer cycle for the same resource took over
    Superseded = 1006,
}

/// error raised by a device sync cycle
#[derive(Debug, Clone)]
pub struct SyncError {
    pub code: ErrorCode,
    pub msg: String,
    // http status, only set for HttpStatusError
    pub status: Option<u16>,
}

impl SyncError {
    pub fn new(code: ErrorCode, msg: impl Into<String>) -> Self {
        SyncError { code, msg: msg.into(), status: None }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::TransportError, msg)
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::TimeoutError, msg)
    }

    pub fn http_status(status: u16, msg: impl Into<String>) -> Self {
        SyncError { code: ErrorCode::HttpStatusError, msg: msg.into(), status: Some(status) }
    }

    pub fn payload(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::PayloadError, msg)
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, msg)
    }

    pub fn superseded(resource: &str) -> Self {
        Self::new(ErrorCode::Superseded, format!("{} cycle superseded by a newer one", resource))
    }

    pub fn is_superseded(&self) -> bool {
        self.code == ErrorCode::Superseded
    }
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "sync error code: {}, status: {}, msg: {}", self.code as u16, status, self.msg),
            None => write!(f, "sync error code: {}, msg: {}", self.code as u16, self.msg),
        }
    }
}

impl Error for SyncError {}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        SyncError::payload(format!("json parse error: {}", e))
    }
}

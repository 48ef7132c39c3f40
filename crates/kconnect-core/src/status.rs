//! HTTP status classification

/// Closed classification of an HTTP status code.
///
/// Derived once per response and used for every branch on status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200..=299
    Success,
    /// 400..=499
    ClientError,
    /// 500..=599
    ServerError,
    /// Anything else (1xx, 3xx, out of range)
    Other,
}

impl StatusClass {
    /// Classify a numeric status code
    pub fn from_code(code: u16) -> Self {
        match code {
            200..=299 => StatusClass::Success,
            400..=499 => StatusClass::ClientError,
            500..=599 => StatusClass::ServerError,
            _ => StatusClass::Other,
        }
    }

    /// True for client and server errors
    pub fn is_failure(self) -> bool {
        matches!(self, StatusClass::ClientError | StatusClass::ServerError)
    }
}

impl From<u16> for StatusClass {
    fn from(code: u16) -> Self {
        Self::from_code(code)
    }
}

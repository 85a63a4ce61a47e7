use camhal_core::error::PreconditionError;
use thiserror::Error;

/// Status codes reported by libdc1394 (`dc1394error_t`).
///
/// `Success` is never wrapped in a [`DriverError`]; it exists so raw status
/// values round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success,
    Failure,
    NotACamera,
    FunctionNotSupported,
    CameraNotInitialized,
    MemoryAllocationFailure,
    TaggedRegisterNotFound,
    NoIsoChannel,
    NoBandwidth,
    IoctlFailure,
    CaptureIsNotSet,
    CaptureIsRunning,
    Raw1394Failure,
    Format7ErrorFlag1,
    Format7ErrorFlag2,
    InvalidArgumentValue,
    ReqValueOutsideRange,
    InvalidFeature,
    InvalidVideoFormat,
    InvalidVideoMode,
    InvalidFramerate,
    InvalidTriggerMode,
    InvalidTriggerSource,
    InvalidIsoSpeed,
    InvalidIidcVersion,
    InvalidColorCoding,
    InvalidColorFilter,
    InvalidCapturePolicy,
    InvalidErrorCode,
    InvalidBayerMethod,
    InvalidVideo1394Device,
    InvalidOperationMode,
    InvalidTriggerPolarity,
    InvalidFeatureMode,
    InvalidLogType,
    InvalidByteOrder,
    InvalidStereoMethod,
    BaslerNoMoreSffChunks,
    BaslerCorruptedSffChunk,
    BaslerUnknownSffChunk,
    /// A status value outside the range known to this crate.
    Unknown(i32),
}

// Ordered by decreasing raw value, starting at DC1394_SUCCESS (0).
const CODES: [(ErrorCode, &str); 40] = [
    (ErrorCode::Success, "Success"),
    (ErrorCode::Failure, "Failure."),
    (ErrorCode::NotACamera, "This node is not a camera"),
    (ErrorCode::FunctionNotSupported, "Function not supported by this camera"),
    (ErrorCode::CameraNotInitialized, "Camera not initialized"),
    (ErrorCode::MemoryAllocationFailure, "Memory allocation failure"),
    (ErrorCode::TaggedRegisterNotFound, "Tagged register not found"),
    (ErrorCode::NoIsoChannel, "Could not allocate an ISO channel"),
    (ErrorCode::NoBandwidth, "Could not allocate bandwidth"),
    (ErrorCode::IoctlFailure, "IOCTL failure"),
    (ErrorCode::CaptureIsNotSet, "Capture is not set"),
    (ErrorCode::CaptureIsRunning, "Capture is running"),
    (ErrorCode::Raw1394Failure, "RAW1394 failure"),
    (ErrorCode::Format7ErrorFlag1, "Format_7 Error_flag_1 is set"),
    (ErrorCode::Format7ErrorFlag2, "Format_7 Error_flag_2 is set"),
    (ErrorCode::InvalidArgumentValue, "Invalid argument value"),
    (ErrorCode::ReqValueOutsideRange, "Requested value is out of range"),
    (ErrorCode::InvalidFeature, "Invalid feature"),
    (ErrorCode::InvalidVideoFormat, "Invalid video format"),
    (ErrorCode::InvalidVideoMode, "Invalid video mode"),
    (ErrorCode::InvalidFramerate, "Invalid framerate"),
    (ErrorCode::InvalidTriggerMode, "Invalid trigger mode"),
    (ErrorCode::InvalidTriggerSource, "Invalid trigger source"),
    (ErrorCode::InvalidIsoSpeed, "Invalid ISO speed"),
    (ErrorCode::InvalidIidcVersion, "Invalid IIDC version"),
    (ErrorCode::InvalidColorCoding, "Invalid color coding"),
    (ErrorCode::InvalidColorFilter, "Invalid color filter"),
    (ErrorCode::InvalidCapturePolicy, "Invalid capture policy"),
    (ErrorCode::InvalidErrorCode, "Invalid error code"),
    (ErrorCode::InvalidBayerMethod, "Invalid Bayer method"),
    (ErrorCode::InvalidVideo1394Device, "Invalid video1394 device"),
    (ErrorCode::InvalidOperationMode, "Invalid operation mode"),
    (ErrorCode::InvalidTriggerPolarity, "Invalid trigger polarity"),
    (ErrorCode::InvalidFeatureMode, "Invalid feature mode"),
    (ErrorCode::InvalidLogType, "Invalid log type"),
    (ErrorCode::InvalidByteOrder, "Invalid byte order"),
    (ErrorCode::InvalidStereoMethod, "Invalid stereo method"),
    (ErrorCode::BaslerNoMoreSffChunks, "Basler: No more SFF chunks"),
    (ErrorCode::BaslerCorruptedSffChunk, "Basler: Corrupted SFF chunk"),
    (ErrorCode::BaslerUnknownSffChunk, "Basler: Unknown SFF chunk"),
];

impl ErrorCode {
    pub fn from_raw(raw: i32) -> Self {
        if raw > 0 {
            return Self::Unknown(raw);
        }
        CODES
            .get(raw.unsigned_abs() as usize)
            .map_or(Self::Unknown(raw), |(code, _)| *code)
    }

    pub fn raw(self) -> i32 {
        if let Self::Unknown(raw) = self {
            return raw;
        }
        CODES
            .iter()
            .position(|(code, _)| *code == self)
            .map_or(i32::MIN, |idx| -(idx as i32))
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// Built-in text for the status, as libdc1394 phrases it. Used when the
    /// driver does not supply its own.
    pub fn message(self) -> &'static str {
        CODES
            .iter()
            .find(|(code, _)| *code == self)
            .map_or("Unknown error code", |(_, msg)| *msg)
    }
}

/// A driver call reported a status other than success.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{message}")]
pub struct DriverError {
    code: ErrorCode,
    message: &'static str,
}

impl DriverError {
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    /// `code` together with the description the driver reported for it.
    pub fn with_message(code: ErrorCode, message: &'static str) -> Self {
        Self { code, message }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl From<ErrorCode> for DriverError {
    fn from(code: ErrorCode) -> Self {
        Self::new(code)
    }
}

/// Everything a [`Dc1394Camera`](crate::Dc1394Camera) operation can fail with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdapterError {
    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// The dequeued frame held fewer bytes than the configured mode needs.
    /// The slot has already been handed back to the driver.
    #[error("Truncated frame: expected {expected} bytes, driver delivered {actual}")]
    TruncatedFrame { expected: usize, actual: usize },
}

impl AdapterError {
    /// Status code of the originating driver call, if any.
    pub fn driver_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Driver(err) => Some(err.code()),
            _ => None,
        }
    }
}

impl From<ErrorCode> for AdapterError {
    fn from(code: ErrorCode) -> Self {
        Self::Driver(DriverError::new(code))
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;

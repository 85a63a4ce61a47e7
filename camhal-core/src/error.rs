use thiserror::Error;

/// Misuse of a device detected by the adapter itself, before any driver
/// call is issued.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("Device is not open")]
    NotOpen,

    #[error("Device is already open")]
    AlreadyOpen,

    #[error("Device is not capturing: call start() first")]
    NotCapturing,

    #[error("Device is already capturing")]
    AlreadyCapturing,

    #[error("Invalid bus node {node}: {available} device(s) enumerated")]
    InvalidNode { node: u32, available: u32 },

    #[error("Frame buffer too small: {required} bytes required, {provided} provided")]
    BufferTooSmall { required: usize, provided: usize },
}

pub type Result<T> = std::result::Result<T, PreconditionError>;

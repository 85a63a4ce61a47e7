use crate::error::{PreconditionError, Result};

/// Lifecycle of a device handle.
///
/// ```text
/// Closed --open--> Opened --start--> Capturing
///    ^               |  ^               |
///    +----close------+  +------stop-----+
/// ```
///
/// `close` is accepted from every state and always lands in `Closed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceState {
    #[default]
    Closed,
    Opened,
    Capturing,
}

impl DeviceState {
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn is_capturing(self) -> bool {
        matches!(self, Self::Capturing)
    }

    /// Any state with a live device handle.
    pub fn require_open(self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(PreconditionError::NotOpen)
        }
    }

    /// No device handle yet.
    pub fn require_closed(self) -> Result<()> {
        if self.is_open() {
            Err(PreconditionError::AlreadyOpen)
        } else {
            Ok(())
        }
    }

    /// Open, but transmission not yet armed.
    pub fn require_idle(self) -> Result<()> {
        match self {
            Self::Closed => Err(PreconditionError::NotOpen),
            Self::Opened => Ok(()),
            Self::Capturing => Err(PreconditionError::AlreadyCapturing),
        }
    }

    pub fn require_capturing(self) -> Result<()> {
        match self {
            Self::Capturing => Ok(()),
            _ => Err(PreconditionError::NotCapturing),
        }
    }

    /// Moves to `next`, emitting a trace event when the state actually changes.
    pub fn transition(&mut self, next: Self) {
        if *self != next {
            tracing::trace!(target: "camhal::state", from = ?*self, to = ?next, "device state change");
            *self = next;
        }
    }
}

#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

//! Backend-agnostic device contracts for CamHAL.
//!
//! A backend (e.g. `camhal-backend-dc1394`) implements [`traits::Device`] for
//! every device kind it exposes, and additionally [`traits::FrameSource`] and
//! [`traits::Camera`] for image producers.

pub mod error;
pub mod state;
pub mod time;
pub mod traits;

pub mod prelude {
    pub use crate::error::PreconditionError;
    pub use crate::state::DeviceState;
    pub use crate::time::period_from_hz;
    pub use crate::traits::{Camera, CyclicDevice, Device, FrameSource};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#![warn(missing_debug_implementations, rust_2018_idioms)]

//! IEEE-1394 (IIDC) camera backend for CamHAL, over libdc1394 v2.
//!
//! [`Dc1394Camera`] is generic over the [`driver::BusDriver`] it talks to.
//! With the `libdc1394` feature, [`Context`] binds it to the system library:
//!
//! ```no_run
//! # #[cfg(feature = "libdc1394")]
//! # fn demo() -> camhal_backend_dc1394::Result<()> {
//! use camhal_backend_dc1394::{Dc1394Camera, VideoMode};
//!
//! let mut camera = Dc1394Camera::system(0)?;
//! camera.open()?;
//! camera.set_video_mode(VideoMode::Mode640x480Rgb8)?;
//! camera.start()?;
//!
//! let mut frame = vec![0u8; camera.size()?];
//! camera.grab(&mut frame)?;
//!
//! camera.stop()?;
//! camera.close();
//! # Ok(())
//! # }
//! ```

pub mod camera;
pub mod config;
pub mod driver;
pub mod error;
pub mod pixel_map;
pub mod types;

// `Dc1394Camera` operations, grouped by concern.
mod controls;
mod device;
mod format;
mod stream;

cfg_if::cfg_if! {
    if #[cfg(feature = "libdc1394")] {
        pub mod ffi;
        pub use ffi::{CameraHandle, Context, VideoFrame};
    }
}

#[cfg(test)]
mod mock;

pub use camera::Dc1394Camera;
pub use config::{SessionConfig, CAPTURE_BUFFER_DEPTH};
pub use error::{AdapterError, DriverError, ErrorCode, Result};
pub use types::{
    CameraId, CaptureFlags, ColorCoding, Feature, FeatureMode, FeatureModes, Format7Region,
    Format7Settings, Framerate, IsoSpeed, OperationMode, RoiExtent, VideoMode,
};

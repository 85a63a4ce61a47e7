use std::fmt;
use std::time::Duration;

use camhal_core::error::PreconditionError;
use camhal_core::state::DeviceState;
use camhal_core::time::period_from_hz;
use camhal_core::traits::{Camera, CyclicDevice, Device, FrameSource};

use crate::config::{SessionConfig, CAPTURE_BUFFER_DEPTH};
use crate::driver::BusDriver;
use crate::error::{AdapterError, Result};
use crate::pixel_map;
use crate::types::{
    CaptureFlags, ColorCoding, Format7Region, Framerate, IsoSpeed, OperationMode, VideoMode,
};

/// IEEE-1394 (IIDC) camera exposed through the CamHAL device contracts.
///
/// The adapter owns one driver context for its whole lifetime and at most
/// one open camera, acquired by `open()` and released by `close()` or drop.
/// It mirrors the selected video mode, color coding, Format7 region, frame
/// rate, ISO speed and operation mode in a local cache that is only updated
/// after the corresponding driver call succeeded.
///
/// Not thread-safe: every call runs on the caller's thread and `grab()`
/// blocks it until a frame arrives.
pub struct Dc1394Camera<B: BusDriver> {
    // Declared before `bus`: the camera must be released ahead of the context.
    pub(crate) camera: Option<B::Camera>,
    pub(crate) bus: B,
    pub(crate) state: DeviceState,
    pub(crate) node: u32,
    pub(crate) cameras: u32,
    pub(crate) video_mode: VideoMode,
    pub(crate) color_coding: ColorCoding,
    pub(crate) format7: Format7Region,
    pub(crate) framerate: Framerate,
    pub(crate) speed: IsoSpeed,
    pub(crate) operation_mode: OperationMode,
    pub(crate) buffer_depth: u32,
    pub(crate) capture_flags: CaptureFlags,
}

impl<B: BusDriver> Dc1394Camera<B> {
    /// Adapter for the camera at bus position `node`, with baseline settings.
    pub fn new(bus: B, node: u32) -> Self {
        Self::with_config(bus, SessionConfig::new().node(node))
    }

    pub fn with_config(bus: B, config: SessionConfig) -> Self {
        Self {
            camera: None,
            bus,
            state: DeviceState::Closed,
            node: config.node,
            cameras: 0,
            video_mode: config.video_mode,
            color_coding: config.color_coding,
            format7: config.format7,
            framerate: config.framerate,
            speed: config.iso_speed,
            operation_mode: config.operation_mode,
            buffer_depth: CAPTURE_BUFFER_DEPTH,
            capture_flags: CaptureFlags::empty(),
        }
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn node(&self) -> u32 {
        self.node
    }

    /// Takes effect on the next `open()`; an open camera stays bound.
    pub fn set_node(&mut self, node: u32) {
        self.node = node;
    }

    /// Devices seen by the most recent `open()`.
    pub fn num_cameras(&self) -> u32 {
        self.cameras
    }

    pub fn capture_buffer_depth(&self) -> u32 {
        self.buffer_depth
    }

    /// Cached session values, as a config that `apply_config` would restore.
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            node: self.node,
            video_mode: self.video_mode,
            color_coding: self.color_coding,
            format7: self.format7,
            framerate: self.framerate,
            operation_mode: self.operation_mode,
            iso_speed: self.speed,
        }
    }

    /// Snapshot of the cached configuration (no driver round-trip).
    #[cfg(feature = "serialize")]
    pub fn export_state(&self) -> serde_json::Value {
        use serde_json::json;

        json!({
            "backend": "dc1394",
            "state": self.state,
            "cameras": self.cameras,
            "capture_buffer_depth": self.buffer_depth,
            "session": self.session(),
        })
    }

    /// Period of the cached frame rate.
    pub fn update_rate(&self) -> Duration {
        period_from_hz(self.framerate.hz())
    }

    pub fn bits_per_pixel(&self) -> u32 {
        pixel_map::bits_per_pixel(self.video_mode, self.color_coding)
    }

    pub fn color_coding_depth(&self) -> u32 {
        pixel_map::color_coding_depth(self.video_mode, self.color_coding)
    }

    pub(crate) fn handle(&self) -> Result<&B::Camera> {
        self.camera
            .as_ref()
            .ok_or(AdapterError::Precondition(PreconditionError::NotOpen))
    }

    pub(crate) fn handle_mut(&mut self) -> Result<&mut B::Camera> {
        self.camera
            .as_mut()
            .ok_or(AdapterError::Precondition(PreconditionError::NotOpen))
    }
}

impl<B: BusDriver> fmt::Debug for Dc1394Camera<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dc1394Camera")
            .field("state", &self.state)
            .field("node", &self.node)
            .field("cameras", &self.cameras)
            .field("video_mode", &self.video_mode)
            .field("color_coding", &self.color_coding)
            .field("format7", &self.format7)
            .field("framerate", &self.framerate)
            .field("speed", &self.speed)
            .field("operation_mode", &self.operation_mode)
            .finish_non_exhaustive()
    }
}

// --- CamHAL contracts ---

impl<B: BusDriver> Device for Dc1394Camera<B> {
    type Error = AdapterError;

    fn open(&mut self) -> Result<()> {
        Dc1394Camera::open(self)
    }

    fn close(&mut self) -> Result<()> {
        Dc1394Camera::close(self);
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        Dc1394Camera::start(self)
    }

    fn stop(&mut self) -> Result<()> {
        Dc1394Camera::stop(self)
    }

    /// Cadence comes from repeated `grab()` calls; the tick does nothing.
    fn step(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<B: BusDriver> CyclicDevice for Dc1394Camera<B> {
    fn update_rate(&self) -> Duration {
        Dc1394Camera::update_rate(self)
    }
}

impl<B: BusDriver> FrameSource for Dc1394Camera<B> {
    fn grab(&mut self, buffer: &mut [u8]) -> Result<()> {
        Dc1394Camera::grab(self, buffer)
    }
}

impl<B: BusDriver> Camera for Dc1394Camera<B> {
    fn bits_per_pixel(&self) -> u32 {
        Dc1394Camera::bits_per_pixel(self)
    }

    fn color_coding_depth(&self) -> u32 {
        Dc1394Camera::color_coding_depth(self)
    }

    fn width(&self) -> Result<u32> {
        Dc1394Camera::width(self)
    }

    fn height(&self) -> Result<u32> {
        Dc1394Camera::height(self)
    }

    fn size(&self) -> Result<usize> {
        Dc1394Camera::size(self)
    }
}

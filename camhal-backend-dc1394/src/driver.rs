//! Boundary to the vendor driver.
//!
//! One method per libdc1394 call the adapter issues. Implementations report
//! any non-success status as a [`DriverError`] and never retry.

use crate::error::DriverError;
use crate::types::{
    CameraId, CaptureFlags, ColorCoding, Feature, FeatureMode, Framerate, IsoSpeed,
    OperationMode, VideoMode,
};

pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Driver-level context (`dc1394_t`). Dropping it releases the context.
pub trait BusDriver {
    type Camera: CameraDriver;

    /// Identifiers of every camera visible on the bus, in enumeration order.
    /// The driver's own list resource is released before this returns.
    fn enumerate(&self) -> DriverResult<Vec<CameraId>>;

    /// Opens the camera with the given GUID. Dropping the returned handle
    /// releases the camera.
    fn camera_new(&self, guid: u64) -> DriverResult<Self::Camera>;
}

/// One open camera (`dc1394camera_t`).
pub trait CameraDriver {
    /// A dequeued ring-buffer slot, readable until handed back through
    /// [`capture_enqueue`](Self::capture_enqueue).
    type Frame: AsRef<[u8]>;

    fn reset(&mut self) -> DriverResult<()>;
    fn set_power(&mut self, on: bool) -> DriverResult<()>;

    // Features
    fn feature_is_present(&self, feature: Feature) -> DriverResult<bool>;
    fn feature_is_readable(&self, feature: Feature) -> DriverResult<bool>;
    fn feature_is_switchable(&self, feature: Feature) -> DriverResult<bool>;
    fn feature_get_power(&self, feature: Feature) -> DriverResult<bool>;
    fn feature_set_power(&mut self, feature: Feature, on: bool) -> DriverResult<()>;
    fn feature_get_mode(&self, feature: Feature) -> DriverResult<FeatureMode>;
    fn feature_set_mode(&mut self, feature: Feature, mode: FeatureMode) -> DriverResult<()>;
    fn feature_get_modes(&self, feature: Feature) -> DriverResult<Vec<FeatureMode>>;
    fn feature_get_value(&self, feature: Feature) -> DriverResult<u32>;
    fn feature_set_value(&mut self, feature: Feature, value: u32) -> DriverResult<()>;
    fn feature_get_absolute_value(&self, feature: Feature) -> DriverResult<f32>;
    fn feature_set_absolute_value(&mut self, feature: Feature, value: f32) -> DriverResult<()>;
    fn feature_get_boundaries(&self, feature: Feature) -> DriverResult<(u32, u32)>;
    fn feature_get_absolute_boundaries(&self, feature: Feature) -> DriverResult<(f32, f32)>;
    fn feature_has_absolute_control(&self, feature: Feature) -> DriverResult<bool>;

    // Video
    fn image_size_from_video_mode(&self, mode: VideoMode) -> DriverResult<(u32, u32)>;
    fn video_get_mode(&self) -> DriverResult<VideoMode>;
    fn video_set_mode(&mut self, mode: VideoMode) -> DriverResult<()>;
    fn video_get_framerate(&self) -> DriverResult<Framerate>;
    fn video_set_framerate(&mut self, framerate: Framerate) -> DriverResult<()>;
    fn video_get_iso_speed(&self) -> DriverResult<IsoSpeed>;
    fn video_set_iso_speed(&mut self, speed: IsoSpeed) -> DriverResult<()>;
    fn video_get_operation_mode(&self) -> DriverResult<OperationMode>;
    fn video_set_operation_mode(&mut self, mode: OperationMode) -> DriverResult<()>;
    fn video_set_transmission(&mut self, on: bool) -> DriverResult<()>;

    // Format7
    fn format7_get_max_image_size(&self, mode: VideoMode) -> DriverResult<(u32, u32)>;
    #[allow(clippy::too_many_arguments)]
    fn format7_set_roi(
        &mut self,
        mode: VideoMode,
        color_coding: ColorCoding,
        packet_size: i32,
        left: i32,
        top: i32,
        width: i32,
        height: i32,
    ) -> DriverResult<()>;

    // Capture
    fn capture_setup(&mut self, num_dma_buffers: u32, flags: CaptureFlags) -> DriverResult<()>;

    /// Blocks the calling thread until a frame is available
    /// (`DC1394_CAPTURE_POLICY_WAIT`).
    fn capture_dequeue(&mut self) -> DriverResult<Self::Frame>;
    fn capture_enqueue(&mut self, frame: Self::Frame) -> DriverResult<()>;
    fn capture_stop(&mut self) -> DriverResult<()>;
}

//! Driver traits implemented over the system libdc1394 v2, through the
//! `libdc1394-sys` bindings.
//!
//! Enumerations cross the boundary as their raw `u32` values and are
//! converted with the checked `TryFrom` impls in [`crate::types`].

use std::ffi::CStr;
use std::ptr;

use libdc1394_sys as ffi;
use libdc1394_sys::{dc1394bool_t, dc1394error_t, dc1394feature_t, dc1394switch_t};

use crate::camera::Dc1394Camera;
use crate::driver::{BusDriver, CameraDriver, DriverResult};
use crate::error::{DriverError, ErrorCode};
use crate::types::{
    CameraId, CaptureFlags, ColorCoding, Feature, FeatureMode, Framerate, IsoSpeed,
    OperationMode, VideoMode,
};

/// Wraps a non-success status, with the text libdc1394 reports for it.
fn driver_error(raw: dc1394error_t::Type) -> DriverError {
    let code = ErrorCode::from_raw(raw);
    let text = unsafe { ffi::dc1394_error_get_string(raw) };
    if text.is_null() {
        return DriverError::new(code);
    }
    // Points into libdc1394's static message table.
    match unsafe { CStr::from_ptr(text) }.to_str() {
        Ok(message) => DriverError::with_message(code, message),
        Err(_) => DriverError::new(code),
    }
}

/// Runs an unsafe libdc1394 call and returns early with a [`DriverError`]
/// on any non-success status.
macro_rules! checked_call {
    ($call:expr) => {
        match unsafe { $call } {
            dc1394error_t::DC1394_SUCCESS => (),
            raw => {
                let err = driver_error(raw);
                tracing::trace!(
                    target: "camhal::dc1394::ffi",
                    call = stringify!($call),
                    code = ?err.code()
                );
                return Err(err);
            }
        }
    };
}

fn switch(on: bool) -> dc1394switch_t::Type {
    if on {
        dc1394switch_t::DC1394_ON
    } else {
        dc1394switch_t::DC1394_OFF
    }
}

// --- context ---

/// Owned `dc1394_t`.
#[derive(Debug)]
pub struct Context {
    handle: *mut ffi::dc1394_t,
}

// The context is only ever used from the thread that currently owns it.
unsafe impl Send for Context {}

impl Context {
    pub fn new() -> DriverResult<Self> {
        let handle = unsafe { ffi::dc1394_new() };
        if handle.is_null() {
            return Err(driver_error(dc1394error_t::DC1394_FAILURE));
        }
        Ok(Self { handle })
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        unsafe { ffi::dc1394_free(self.handle) };
    }
}

/// Frees the enumeration list on every exit path.
struct CameraList(*mut ffi::dc1394camera_list_t);

impl Drop for CameraList {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe { ffi::dc1394_camera_free_list(self.0) };
        }
    }
}

impl BusDriver for Context {
    type Camera = CameraHandle;

    fn enumerate(&self) -> DriverResult<Vec<CameraId>> {
        let mut list = CameraList(ptr::null_mut());
        checked_call!(ffi::dc1394_camera_enumerate(self.handle, &mut list.0));

        if list.0.is_null() {
            return Ok(Vec::new());
        }
        let raw = unsafe { &*list.0 };
        if raw.num == 0 || raw.ids.is_null() {
            return Ok(Vec::new());
        }

        let ids = unsafe { std::slice::from_raw_parts(raw.ids, raw.num as usize) };
        Ok(ids
            .iter()
            .map(|id| CameraId {
                guid: id.guid,
                unit: id.unit,
            })
            .collect())
    }

    fn camera_new(&self, guid: u64) -> DriverResult<CameraHandle> {
        let handle = unsafe { ffi::dc1394_camera_new(self.handle, guid) };
        if handle.is_null() {
            return Err(driver_error(dc1394error_t::DC1394_FAILURE));
        }
        Ok(CameraHandle { handle })
    }
}

// --- camera ---

/// Owned `dc1394camera_t`.
#[derive(Debug)]
pub struct CameraHandle {
    handle: *mut ffi::dc1394camera_t,
}

unsafe impl Send for CameraHandle {}

impl Drop for CameraHandle {
    fn drop(&mut self) {
        unsafe { ffi::dc1394_camera_free(self.handle) };
    }
}

/// A dequeued ring-buffer slot. Must go back through `capture_enqueue`;
/// dropping it leaves the slot with the caller until `capture_stop`.
#[derive(Debug)]
pub struct VideoFrame {
    frame: *mut ffi::dc1394video_frame_t,
}

impl AsRef<[u8]> for VideoFrame {
    fn as_ref(&self) -> &[u8] {
        let frame = unsafe { &*self.frame };
        if frame.image.is_null() {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(frame.image, frame.image_bytes as usize) }
    }
}

impl CameraHandle {
    fn query_bool(
        &self,
        f: unsafe extern "C" fn(
            *mut ffi::dc1394camera_t,
            dc1394feature_t::Type,
            *mut dc1394bool_t::Type,
        ) -> dc1394error_t::Type,
        feature: Feature,
    ) -> DriverResult<bool> {
        let mut value = dc1394bool_t::DC1394_FALSE;
        checked_call!(f(self.handle, feature.raw(), &mut value));
        Ok(value != dc1394bool_t::DC1394_FALSE)
    }
}

impl CameraDriver for CameraHandle {
    type Frame = VideoFrame;

    fn reset(&mut self) -> DriverResult<()> {
        checked_call!(ffi::dc1394_camera_reset(self.handle));
        Ok(())
    }

    fn set_power(&mut self, on: bool) -> DriverResult<()> {
        checked_call!(ffi::dc1394_camera_set_power(self.handle, switch(on)));
        Ok(())
    }

    fn feature_is_present(&self, feature: Feature) -> DriverResult<bool> {
        self.query_bool(ffi::dc1394_feature_is_present, feature)
    }

    fn feature_is_readable(&self, feature: Feature) -> DriverResult<bool> {
        self.query_bool(ffi::dc1394_feature_is_readable, feature)
    }

    fn feature_is_switchable(&self, feature: Feature) -> DriverResult<bool> {
        self.query_bool(ffi::dc1394_feature_is_switchable, feature)
    }

    fn feature_get_power(&self, feature: Feature) -> DriverResult<bool> {
        let mut pwr = dc1394switch_t::DC1394_OFF;
        checked_call!(ffi::dc1394_feature_get_power(self.handle, feature.raw(), &mut pwr));
        Ok(pwr != dc1394switch_t::DC1394_OFF)
    }

    fn feature_set_power(&mut self, feature: Feature, on: bool) -> DriverResult<()> {
        checked_call!(ffi::dc1394_feature_set_power(self.handle, feature.raw(), switch(on)));
        Ok(())
    }

    fn feature_get_mode(&self, feature: Feature) -> DriverResult<FeatureMode> {
        let mut mode = 0;
        checked_call!(ffi::dc1394_feature_get_mode(self.handle, feature.raw(), &mut mode));
        FeatureMode::try_from(mode)
    }

    fn feature_set_mode(&mut self, feature: Feature, mode: FeatureMode) -> DriverResult<()> {
        checked_call!(ffi::dc1394_feature_set_mode(self.handle, feature.raw(), mode.raw()));
        Ok(())
    }

    fn feature_get_modes(&self, feature: Feature) -> DriverResult<Vec<FeatureMode>> {
        let mut modes = ffi::dc1394feature_modes_t {
            num: 0,
            modes: [0; 3],
        };
        checked_call!(ffi::dc1394_feature_get_modes(self.handle, feature.raw(), &mut modes));

        let num = (modes.num as usize).min(modes.modes.len());
        Ok(FeatureMode::from_raw_list(&modes.modes[..num]))
    }

    fn feature_get_value(&self, feature: Feature) -> DriverResult<u32> {
        let mut value = 0;
        checked_call!(ffi::dc1394_feature_get_value(self.handle, feature.raw(), &mut value));
        Ok(value)
    }

    fn feature_set_value(&mut self, feature: Feature, value: u32) -> DriverResult<()> {
        checked_call!(ffi::dc1394_feature_set_value(self.handle, feature.raw(), value));
        Ok(())
    }

    fn feature_get_absolute_value(&self, feature: Feature) -> DriverResult<f32> {
        let mut value = 0.0;
        checked_call!(ffi::dc1394_feature_get_absolute_value(
            self.handle,
            feature.raw(),
            &mut value
        ));
        Ok(value)
    }

    fn feature_set_absolute_value(&mut self, feature: Feature, value: f32) -> DriverResult<()> {
        checked_call!(ffi::dc1394_feature_set_absolute_value(self.handle, feature.raw(), value));
        Ok(())
    }

    fn feature_get_boundaries(&self, feature: Feature) -> DriverResult<(u32, u32)> {
        let (mut min, mut max) = (0, 0);
        checked_call!(ffi::dc1394_feature_get_boundaries(
            self.handle,
            feature.raw(),
            &mut min,
            &mut max
        ));
        Ok((min, max))
    }

    fn feature_get_absolute_boundaries(&self, feature: Feature) -> DriverResult<(f32, f32)> {
        let (mut min, mut max) = (0.0, 0.0);
        checked_call!(ffi::dc1394_feature_get_absolute_boundaries(
            self.handle,
            feature.raw(),
            &mut min,
            &mut max
        ));
        Ok((min, max))
    }

    fn feature_has_absolute_control(&self, feature: Feature) -> DriverResult<bool> {
        self.query_bool(ffi::dc1394_feature_has_absolute_control, feature)
    }

    fn image_size_from_video_mode(&self, mode: VideoMode) -> DriverResult<(u32, u32)> {
        let (mut width, mut height) = (0, 0);
        checked_call!(ffi::dc1394_get_image_size_from_video_mode(
            self.handle,
            mode.raw(),
            &mut width,
            &mut height
        ));
        Ok((width, height))
    }

    fn video_get_mode(&self) -> DriverResult<VideoMode> {
        let mut mode = 0;
        checked_call!(ffi::dc1394_video_get_mode(self.handle, &mut mode));
        VideoMode::try_from(mode)
    }

    fn video_set_mode(&mut self, mode: VideoMode) -> DriverResult<()> {
        checked_call!(ffi::dc1394_video_set_mode(self.handle, mode.raw()));
        Ok(())
    }

    fn video_get_framerate(&self) -> DriverResult<Framerate> {
        let mut framerate = 0;
        checked_call!(ffi::dc1394_video_get_framerate(self.handle, &mut framerate));
        Framerate::try_from(framerate)
    }

    fn video_set_framerate(&mut self, framerate: Framerate) -> DriverResult<()> {
        checked_call!(ffi::dc1394_video_set_framerate(self.handle, framerate.raw()));
        Ok(())
    }

    fn video_get_iso_speed(&self) -> DriverResult<IsoSpeed> {
        let mut speed = 0;
        checked_call!(ffi::dc1394_video_get_iso_speed(self.handle, &mut speed));
        IsoSpeed::try_from(speed)
    }

    fn video_set_iso_speed(&mut self, speed: IsoSpeed) -> DriverResult<()> {
        checked_call!(ffi::dc1394_video_set_iso_speed(self.handle, speed.raw()));
        Ok(())
    }

    fn video_get_operation_mode(&self) -> DriverResult<OperationMode> {
        let mut mode = 0;
        checked_call!(ffi::dc1394_video_get_operation_mode(self.handle, &mut mode));
        OperationMode::try_from(mode)
    }

    fn video_set_operation_mode(&mut self, mode: OperationMode) -> DriverResult<()> {
        checked_call!(ffi::dc1394_video_set_operation_mode(self.handle, mode.raw()));
        Ok(())
    }

    fn video_set_transmission(&mut self, on: bool) -> DriverResult<()> {
        checked_call!(ffi::dc1394_video_set_transmission(self.handle, switch(on)));
        Ok(())
    }

    fn format7_get_max_image_size(&self, mode: VideoMode) -> DriverResult<(u32, u32)> {
        let (mut width, mut height) = (0, 0);
        checked_call!(ffi::dc1394_format7_get_max_image_size(
            self.handle,
            mode.raw(),
            &mut width,
            &mut height
        ));
        Ok((width, height))
    }

    fn format7_set_roi(
        &mut self,
        mode: VideoMode,
        color_coding: ColorCoding,
        packet_size: i32,
        left: i32,
        top: i32,
        width: i32,
        height: i32,
    ) -> DriverResult<()> {
        checked_call!(ffi::dc1394_format7_set_roi(
            self.handle,
            mode.raw(),
            color_coding.raw(),
            packet_size,
            left,
            top,
            width,
            height
        ));
        Ok(())
    }

    fn capture_setup(&mut self, num_dma_buffers: u32, flags: CaptureFlags) -> DriverResult<()> {
        checked_call!(ffi::dc1394_capture_setup(self.handle, num_dma_buffers, flags.bits()));
        Ok(())
    }

    fn capture_dequeue(&mut self) -> DriverResult<VideoFrame> {
        let mut frame = ptr::null_mut();
        checked_call!(ffi::dc1394_capture_dequeue(
            self.handle,
            ffi::dc1394capture_policy_t::DC1394_CAPTURE_POLICY_WAIT,
            &mut frame
        ));
        // WAIT never reports success without a frame
        if frame.is_null() {
            return Err(driver_error(dc1394error_t::DC1394_FAILURE));
        }
        Ok(VideoFrame { frame })
    }

    fn capture_enqueue(&mut self, frame: VideoFrame) -> DriverResult<()> {
        checked_call!(ffi::dc1394_capture_enqueue(self.handle, frame.frame));
        Ok(())
    }

    fn capture_stop(&mut self) -> DriverResult<()> {
        checked_call!(ffi::dc1394_capture_stop(self.handle));
        Ok(())
    }
}

impl Dc1394Camera<Context> {
    /// Adapter over a fresh libdc1394 context, for the camera at `node`.
    pub fn system(node: u32) -> DriverResult<Self> {
        Ok(Self::new(Context::new()?, node))
    }
}

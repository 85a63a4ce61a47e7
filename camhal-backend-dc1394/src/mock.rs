//! Scripted in-memory driver for unit tests.
//!
//! `MockBus` and every `MockCamera` it opens share one `MockState`, so a
//! test keeps a handle to the state, drives the adapter, then inspects the
//! recorded calls or flips a failure switch in between.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::driver::{BusDriver, CameraDriver, DriverResult};
use crate::error::{DriverError, ErrorCode};
use crate::pixel_map;
use crate::types::{
    CameraId, CaptureFlags, ColorCoding, Feature, FeatureMode, Framerate, IsoSpeed,
    OperationMode, VideoMode,
};

/// One driver entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    Enumerate,
    CameraNew,
    Reset,
    SetPower,
    FeatureIsPresent,
    FeatureIsReadable,
    FeatureIsSwitchable,
    FeatureGetPower,
    FeatureSetPower,
    FeatureGetMode,
    FeatureSetMode,
    FeatureGetModes,
    FeatureGetValue,
    FeatureSetValue,
    FeatureGetAbsoluteValue,
    FeatureSetAbsoluteValue,
    FeatureGetBoundaries,
    FeatureGetAbsoluteBoundaries,
    FeatureHasAbsoluteControl,
    ImageSizeFromVideoMode,
    VideoGetMode,
    VideoSetMode,
    VideoGetFramerate,
    VideoSetFramerate,
    VideoGetIsoSpeed,
    VideoSetIsoSpeed,
    VideoGetOperationMode,
    VideoSetOperationMode,
    VideoSetTransmission,
    Format7GetMaxImageSize,
    Format7SetRoi,
    CaptureSetup,
    CaptureDequeue,
    CaptureEnqueue,
    CaptureStop,
}

#[derive(Debug, Clone)]
pub(crate) struct MockFeature {
    pub(crate) present: bool,
    pub(crate) power: bool,
    pub(crate) mode: FeatureMode,
    pub(crate) supported: Vec<FeatureMode>,
    pub(crate) value: u32,
    pub(crate) bounds: (u32, u32),
    pub(crate) absolute: f32,
    pub(crate) absolute_bounds: (f32, f32),
    pub(crate) absolute_control: bool,
}

impl Default for MockFeature {
    fn default() -> Self {
        Self {
            present: true,
            power: true,
            mode: FeatureMode::Manual,
            supported: vec![FeatureMode::Manual, FeatureMode::Auto],
            value: 128,
            bounds: (0, 255),
            absolute: 0.5,
            absolute_bounds: (0.0, 1.0),
            absolute_control: false,
        }
    }
}

/// Arguments of the last `format7_set_roi` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RoiCall {
    pub(crate) mode: VideoMode,
    pub(crate) coding: ColorCoding,
    pub(crate) packet_size: i32,
    pub(crate) rect: [i32; 4],
}

#[derive(Debug)]
pub(crate) struct MockState {
    pub(crate) cameras: Vec<CameraId>,
    pub(crate) calls: Vec<Op>,
    pub(crate) failures: HashMap<Op, ErrorCode>,
    pub(crate) opened_guid: Option<u64>,
    pub(crate) features: HashMap<Feature, MockFeature>,
    pub(crate) video_mode: VideoMode,
    pub(crate) framerate: Framerate,
    pub(crate) iso_speed: IsoSpeed,
    pub(crate) operation_mode: OperationMode,
    /// Overrides the geometry reported for a video mode.
    pub(crate) geometry: HashMap<VideoMode, (u32, u32)>,
    pub(crate) format7_max: (u32, u32),
    pub(crate) roi: Option<RoiCall>,
    pub(crate) capture: Option<(u32, CaptureFlags)>,
    pub(crate) powered: bool,
    pub(crate) transmitting: bool,
    /// Overrides the byte length of dequeued frames.
    pub(crate) frame_len: Option<usize>,
    pub(crate) frames_out: usize,
    pub(crate) released: Vec<&'static str>,
}

impl MockState {
    fn new(cameras: usize) -> Self {
        Self {
            cameras: (0..cameras)
                .map(|i| CameraId {
                    guid: 0x0814_4360_0000_0000 + i as u64,
                    unit: 0,
                })
                .collect(),
            calls: Vec::new(),
            failures: HashMap::new(),
            opened_guid: None,
            features: HashMap::new(),
            video_mode: VideoMode::Mode640x480Rgb8,
            framerate: Framerate::Fps15,
            iso_speed: IsoSpeed::Mbps400,
            operation_mode: OperationMode::Legacy,
            geometry: HashMap::new(),
            format7_max: (1280, 1024),
            roi: None,
            capture: None,
            powered: false,
            transmitting: false,
            frame_len: None,
            frames_out: 0,
            released: Vec::new(),
        }
    }

    pub(crate) fn fail(&mut self, op: Op, code: ErrorCode) {
        self.failures.insert(op, code);
    }

    pub(crate) fn heal(&mut self, op: Op) {
        self.failures.remove(&op);
    }

    pub(crate) fn count(&self, op: Op) -> usize {
        self.calls.iter().filter(|c| **c == op).count()
    }

    /// Records the call, then reports the scripted failure if one is set.
    fn call(&mut self, op: Op) -> DriverResult<()> {
        self.calls.push(op);
        match self.failures.get(&op) {
            Some(code) => Err(DriverError::new(*code)),
            None => Ok(()),
        }
    }

    fn feature(&mut self, feature: Feature) -> &mut MockFeature {
        self.features.entry(feature).or_default()
    }

    fn image_size(&self, mode: VideoMode) -> DriverResult<(u32, u32)> {
        use VideoMode::*;

        if let Some(size) = self.geometry.get(&mode) {
            return Ok(*size);
        }
        let size = match mode {
            Mode160x120Yuv444 => (160, 120),
            Mode320x240Yuv422 => (320, 240),
            Mode640x480Yuv411 | Mode640x480Yuv422 | Mode640x480Rgb8 | Mode640x480Mono8
            | Mode640x480Mono16 => (640, 480),
            Mode800x600Yuv422 | Mode800x600Rgb8 | Mode800x600Mono8 | Mode800x600Mono16 => {
                (800, 600)
            }
            Mode1024x768Yuv422 | Mode1024x768Rgb8 | Mode1024x768Mono8 | Mode1024x768Mono16 => {
                (1024, 768)
            }
            Mode1280x960Yuv422 | Mode1280x960Rgb8 | Mode1280x960Mono8 | Mode1280x960Mono16 => {
                (1280, 960)
            }
            Mode1600x1200Yuv422 | Mode1600x1200Rgb8 | Mode1600x1200Mono8
            | Mode1600x1200Mono16 => (1600, 1200),
            Exif => return Err(DriverError::new(ErrorCode::InvalidVideoMode)),
            _ => match self.roi {
                Some(roi) if roi.mode == mode => {
                    let pick = |px: i32, max: u32| u32::try_from(px).unwrap_or(max);
                    (
                        pick(roi.rect[2], self.format7_max.0),
                        pick(roi.rect[3], self.format7_max.1),
                    )
                }
                _ => self.format7_max,
            },
        };
        Ok(size)
    }

    fn next_frame(&self) -> DriverResult<Vec<u8>> {
        let len = match self.frame_len {
            Some(len) => len,
            None => {
                let (w, h) = self.image_size(self.video_mode)?;
                let coding = self.roi.map_or(ColorCoding::Raw8, |roi| roi.coding);
                pixel_map::frame_size(w, h, self.video_mode, coding).unwrap_or(0)
            }
        };
        Ok((0..len).map(|i| (i % 251) as u8).collect())
    }
}

pub(crate) type Shared = Rc<RefCell<MockState>>;

#[derive(Debug)]
pub(crate) struct MockBus {
    state: Shared,
}

impl MockBus {
    /// A bus with `cameras` devices, plus a handle on its shared state.
    pub(crate) fn with_cameras(cameras: usize) -> (Self, Shared) {
        let state = Rc::new(RefCell::new(MockState::new(cameras)));
        (
            Self {
                state: Rc::clone(&state),
            },
            state,
        )
    }
}

impl Drop for MockBus {
    fn drop(&mut self) {
        self.state.borrow_mut().released.push("context");
    }
}

impl BusDriver for MockBus {
    type Camera = MockCamera;

    fn enumerate(&self) -> DriverResult<Vec<CameraId>> {
        let mut state = self.state.borrow_mut();
        state.call(Op::Enumerate)?;
        Ok(state.cameras.clone())
    }

    fn camera_new(&self, guid: u64) -> DriverResult<MockCamera> {
        let mut state = self.state.borrow_mut();
        state.call(Op::CameraNew)?;
        state.opened_guid = Some(guid);
        Ok(MockCamera {
            state: Rc::clone(&self.state),
        })
    }
}

#[derive(Debug)]
pub(crate) struct MockCamera {
    state: Shared,
}

impl Drop for MockCamera {
    fn drop(&mut self) {
        self.state.borrow_mut().released.push("camera");
    }
}

#[derive(Debug)]
pub(crate) struct MockFrame(Vec<u8>);

impl AsRef<[u8]> for MockFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl MockCamera {
    fn with<T>(&self, op: Op, f: impl FnOnce(&mut MockState) -> DriverResult<T>) -> DriverResult<T> {
        let mut state = self.state.borrow_mut();
        state.call(op)?;
        f(&mut state)
    }
}

impl CameraDriver for MockCamera {
    type Frame = MockFrame;

    fn reset(&mut self) -> DriverResult<()> {
        self.with(Op::Reset, |_| Ok(()))
    }

    fn set_power(&mut self, on: bool) -> DriverResult<()> {
        self.with(Op::SetPower, |s| {
            s.powered = on;
            Ok(())
        })
    }

    fn feature_is_present(&self, feature: Feature) -> DriverResult<bool> {
        self.with(Op::FeatureIsPresent, |s| Ok(s.feature(feature).present))
    }

    fn feature_is_readable(&self, feature: Feature) -> DriverResult<bool> {
        self.with(Op::FeatureIsReadable, |s| Ok(s.feature(feature).present))
    }

    fn feature_is_switchable(&self, feature: Feature) -> DriverResult<bool> {
        self.with(Op::FeatureIsSwitchable, |s| Ok(s.feature(feature).present))
    }

    fn feature_get_power(&self, feature: Feature) -> DriverResult<bool> {
        self.with(Op::FeatureGetPower, |s| Ok(s.feature(feature).power))
    }

    fn feature_set_power(&mut self, feature: Feature, on: bool) -> DriverResult<()> {
        self.with(Op::FeatureSetPower, |s| {
            s.feature(feature).power = on;
            Ok(())
        })
    }

    fn feature_get_mode(&self, feature: Feature) -> DriverResult<FeatureMode> {
        self.with(Op::FeatureGetMode, |s| Ok(s.feature(feature).mode))
    }

    fn feature_set_mode(&mut self, feature: Feature, mode: FeatureMode) -> DriverResult<()> {
        self.with(Op::FeatureSetMode, |s| {
            let entry = s.feature(feature);
            if !entry.supported.contains(&mode) {
                return Err(DriverError::new(ErrorCode::InvalidFeatureMode));
            }
            entry.mode = mode;
            Ok(())
        })
    }

    fn feature_get_modes(&self, feature: Feature) -> DriverResult<Vec<FeatureMode>> {
        self.with(Op::FeatureGetModes, |s| Ok(s.feature(feature).supported.clone()))
    }

    fn feature_get_value(&self, feature: Feature) -> DriverResult<u32> {
        self.with(Op::FeatureGetValue, |s| Ok(s.feature(feature).value))
    }

    fn feature_set_value(&mut self, feature: Feature, value: u32) -> DriverResult<()> {
        self.with(Op::FeatureSetValue, |s| {
            let entry = s.feature(feature);
            if value < entry.bounds.0 || value > entry.bounds.1 {
                return Err(DriverError::new(ErrorCode::ReqValueOutsideRange));
            }
            entry.value = value;
            Ok(())
        })
    }

    fn feature_get_absolute_value(&self, feature: Feature) -> DriverResult<f32> {
        self.with(Op::FeatureGetAbsoluteValue, |s| Ok(s.feature(feature).absolute))
    }

    fn feature_set_absolute_value(&mut self, feature: Feature, value: f32) -> DriverResult<()> {
        self.with(Op::FeatureSetAbsoluteValue, |s| {
            s.feature(feature).absolute = value;
            Ok(())
        })
    }

    fn feature_get_boundaries(&self, feature: Feature) -> DriverResult<(u32, u32)> {
        self.with(Op::FeatureGetBoundaries, |s| Ok(s.feature(feature).bounds))
    }

    fn feature_get_absolute_boundaries(&self, feature: Feature) -> DriverResult<(f32, f32)> {
        self.with(Op::FeatureGetAbsoluteBoundaries, |s| {
            Ok(s.feature(feature).absolute_bounds)
        })
    }

    fn feature_has_absolute_control(&self, feature: Feature) -> DriverResult<bool> {
        self.with(Op::FeatureHasAbsoluteControl, |s| {
            Ok(s.feature(feature).absolute_control)
        })
    }

    fn image_size_from_video_mode(&self, mode: VideoMode) -> DriverResult<(u32, u32)> {
        self.with(Op::ImageSizeFromVideoMode, |s| s.image_size(mode))
    }

    fn video_get_mode(&self) -> DriverResult<VideoMode> {
        self.with(Op::VideoGetMode, |s| Ok(s.video_mode))
    }

    fn video_set_mode(&mut self, mode: VideoMode) -> DriverResult<()> {
        self.with(Op::VideoSetMode, |s| {
            s.video_mode = mode;
            Ok(())
        })
    }

    fn video_get_framerate(&self) -> DriverResult<Framerate> {
        self.with(Op::VideoGetFramerate, |s| Ok(s.framerate))
    }

    fn video_set_framerate(&mut self, framerate: Framerate) -> DriverResult<()> {
        self.with(Op::VideoSetFramerate, |s| {
            s.framerate = framerate;
            Ok(())
        })
    }

    fn video_get_iso_speed(&self) -> DriverResult<IsoSpeed> {
        self.with(Op::VideoGetIsoSpeed, |s| Ok(s.iso_speed))
    }

    fn video_set_iso_speed(&mut self, speed: IsoSpeed) -> DriverResult<()> {
        self.with(Op::VideoSetIsoSpeed, |s| {
            s.iso_speed = speed;
            Ok(())
        })
    }

    fn video_get_operation_mode(&self) -> DriverResult<OperationMode> {
        self.with(Op::VideoGetOperationMode, |s| Ok(s.operation_mode))
    }

    fn video_set_operation_mode(&mut self, mode: OperationMode) -> DriverResult<()> {
        self.with(Op::VideoSetOperationMode, |s| {
            s.operation_mode = mode;
            Ok(())
        })
    }

    fn video_set_transmission(&mut self, on: bool) -> DriverResult<()> {
        self.with(Op::VideoSetTransmission, |s| {
            s.transmitting = on;
            Ok(())
        })
    }

    fn format7_get_max_image_size(&self, mode: VideoMode) -> DriverResult<(u32, u32)> {
        self.with(Op::Format7GetMaxImageSize, |s| {
            if !mode.is_format7() {
                return Err(DriverError::new(ErrorCode::InvalidVideoMode));
            }
            Ok(s.format7_max)
        })
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
        self.with(Op::Format7SetRoi, |s| {
            if !mode.is_format7() {
                return Err(DriverError::new(ErrorCode::InvalidVideoMode));
            }
            s.video_mode = mode;
            s.roi = Some(RoiCall {
                mode,
                coding: color_coding,
                packet_size,
                rect: [left, top, width, height],
            });
            Ok(())
        })
    }

    fn capture_setup(&mut self, num_dma_buffers: u32, flags: CaptureFlags) -> DriverResult<()> {
        self.with(Op::CaptureSetup, |s| {
            s.capture = Some((num_dma_buffers, flags));
            Ok(())
        })
    }

    fn capture_dequeue(&mut self) -> DriverResult<MockFrame> {
        self.with(Op::CaptureDequeue, |s| {
            if s.capture.is_none() {
                return Err(DriverError::new(ErrorCode::CaptureIsNotSet));
            }
            let frame = s.next_frame()?;
            s.frames_out += 1;
            Ok(MockFrame(frame))
        })
    }

    fn capture_enqueue(&mut self, _frame: MockFrame) -> DriverResult<()> {
        self.with(Op::CaptureEnqueue, |s| {
            s.frames_out -= 1;
            Ok(())
        })
    }

    fn capture_stop(&mut self) -> DriverResult<()> {
        self.with(Op::CaptureStop, |s| {
            s.capture = None;
            Ok(())
        })
    }
}

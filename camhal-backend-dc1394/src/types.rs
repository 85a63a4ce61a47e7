//! IIDC enumerations, carrying the numeric values libdc1394 uses on the wire.

use bitflags::bitflags;

use crate::error::{DriverError, ErrorCode};

/// Declares a `#[repr(u32)]` enum mirroring a libdc1394 enumeration, with
/// lossless conversion to the raw value and checked conversion back.
macro_rules! dc1394_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident (invalid = $invalid:ident) {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u32)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn raw(self) -> u32 {
                self as u32
            }
        }

        impl TryFrom<u32> for $name {
            type Error = DriverError;

            fn try_from(raw: u32) -> Result<Self, Self::Error> {
                match raw {
                    $( $value => Ok(Self::$variant), )+
                    _ => Err(DriverError::new(ErrorCode::$invalid)),
                }
            }
        }
    };
}

dc1394_enum! {
    /// Fixed-geometry video modes (formats 0-2), EXIF, and the eight
    /// scalable Format7 modes.
    pub enum VideoMode (invalid = InvalidVideoMode) {
        Mode160x120Yuv444 = 64,
        Mode320x240Yuv422 = 65,
        Mode640x480Yuv411 = 66,
        Mode640x480Yuv422 = 67,
        Mode640x480Rgb8 = 68,
        Mode640x480Mono8 = 69,
        Mode640x480Mono16 = 70,
        Mode800x600Yuv422 = 71,
        Mode800x600Rgb8 = 72,
        Mode800x600Mono8 = 73,
        Mode1024x768Yuv422 = 74,
        Mode1024x768Rgb8 = 75,
        Mode1024x768Mono8 = 76,
        Mode800x600Mono16 = 77,
        Mode1024x768Mono16 = 78,
        Mode1280x960Yuv422 = 79,
        Mode1280x960Rgb8 = 80,
        Mode1280x960Mono8 = 81,
        Mode1600x1200Yuv422 = 82,
        Mode1600x1200Rgb8 = 83,
        Mode1600x1200Mono8 = 84,
        Mode1280x960Mono16 = 85,
        Mode1600x1200Mono16 = 86,
        Exif = 87,
        Format7_0 = 88,
        Format7_1 = 89,
        Format7_2 = 90,
        Format7_3 = 91,
        Format7_4 = 92,
        Format7_5 = 93,
        Format7_6 = 94,
        Format7_7 = 95,
    }
}

impl VideoMode {
    /// Scalable modes take their geometry and color coding from the
    /// Format7 registers instead of the mode itself.
    pub fn is_format7(self) -> bool {
        matches!(
            self,
            Self::Format7_0
                | Self::Format7_1
                | Self::Format7_2
                | Self::Format7_3
                | Self::Format7_4
                | Self::Format7_5
                | Self::Format7_6
                | Self::Format7_7
        )
    }
}

impl Default for VideoMode {
    fn default() -> Self {
        Self::Mode640x480Rgb8
    }
}

dc1394_enum! {
    /// Pixel sample formats.
    pub enum ColorCoding (invalid = InvalidColorCoding) {
        Mono8 = 352,
        Yuv411 = 353,
        Yuv422 = 354,
        Yuv444 = 355,
        Rgb8 = 356,
        Mono16 = 357,
        Rgb16 = 358,
        Mono16Signed = 359,
        Rgb16Signed = 360,
        Raw8 = 361,
        Raw16 = 362,
    }
}

impl Default for ColorCoding {
    fn default() -> Self {
        Self::Raw8
    }
}

dc1394_enum! {
    /// Discrete frame rates of the fixed video modes.
    pub enum Framerate (invalid = InvalidFramerate) {
        Fps1_875 = 32,
        Fps3_75 = 33,
        Fps7_5 = 34,
        Fps15 = 35,
        Fps30 = 36,
        Fps60 = 37,
        Fps120 = 38,
        Fps240 = 39,
    }
}

impl Framerate {
    pub const MIN: Self = Self::Fps1_875;

    pub fn hz(self) -> f64 {
        match self {
            Self::Fps1_875 => 1.875,
            Self::Fps3_75 => 3.75,
            Self::Fps7_5 => 7.5,
            Self::Fps15 => 15.0,
            Self::Fps30 => 30.0,
            Self::Fps60 => 60.0,
            Self::Fps120 => 120.0,
            Self::Fps240 => 240.0,
        }
    }
}

impl Default for Framerate {
    fn default() -> Self {
        Self::MIN
    }
}

dc1394_enum! {
    /// Isochronous bus speed tiers.
    pub enum IsoSpeed (invalid = InvalidIsoSpeed) {
        Mbps100 = 0,
        Mbps200 = 1,
        Mbps400 = 2,
        Mbps800 = 3,
        Mbps1600 = 4,
        Mbps3200 = 5,
    }
}

impl Default for IsoSpeed {
    fn default() -> Self {
        Self::Mbps400
    }
}

dc1394_enum! {
    /// Bus operation mode: legacy 1394a or 1394b.
    pub enum OperationMode (invalid = InvalidOperationMode) {
        Legacy = 480,
        Ieee1394B = 481,
    }
}

impl Default for OperationMode {
    fn default() -> Self {
        Self::Legacy
    }
}

dc1394_enum! {
    /// Camera controls addressable through the feature interface.
    pub enum Feature (invalid = InvalidFeature) {
        Brightness = 416,
        Exposure = 417,
        Sharpness = 418,
        WhiteBalance = 419,
        Hue = 420,
        Saturation = 421,
        Gamma = 422,
        Shutter = 423,
        Gain = 424,
        Iris = 425,
        Focus = 426,
        Temperature = 427,
        Trigger = 428,
        TriggerDelay = 429,
        WhiteShading = 430,
        FrameRate = 431,
        Zoom = 432,
        Pan = 433,
        Tilt = 434,
        OpticalFilter = 435,
        CaptureSize = 436,
        CaptureQuality = 437,
    }
}

dc1394_enum! {
    pub enum FeatureMode (invalid = InvalidFeatureMode) {
        Manual = 736,
        Auto = 737,
        OnePushAuto = 738,
    }
}

impl FeatureMode {
    /// Known modes of a raw driver list, in order. Values outside the three
    /// control modes are skipped.
    pub fn from_raw_list(raw: &[u32]) -> Vec<Self> {
        raw.iter().filter_map(|raw| Self::try_from(*raw).ok()).collect()
    }
}

/// Control modes a feature supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureModes {
    pub manual: bool,
    pub auto: bool,
    pub one_push_auto: bool,
}

impl FromIterator<FeatureMode> for FeatureModes {
    fn from_iter<I: IntoIterator<Item = FeatureMode>>(iter: I) -> Self {
        let mut modes = Self::default();
        for mode in iter {
            match mode {
                FeatureMode::Manual => modes.manual = true,
                FeatureMode::Auto => modes.auto = true,
                FeatureMode::OnePushAuto => modes.one_push_auto = true,
            }
        }
        modes
    }
}

/// One Format7 region-of-interest dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum RoiExtent {
    /// Let the camera pick the largest value it supports.
    #[default]
    MaxAvailable,
    Pixels(u32),
}

impl RoiExtent {
    /// `DC1394_USE_MAX_AVAIL`
    pub const USE_MAX_AVAIL: i32 = -2;

    /// Encoding for `dc1394_format7_set_roi`. Pixel counts beyond `i32::MAX`
    /// are rejected with `InvalidArgumentValue`.
    pub fn raw(self) -> Result<i32, DriverError> {
        match self {
            Self::MaxAvailable => Ok(Self::USE_MAX_AVAIL),
            Self::Pixels(px) => roi_pixels(px),
        }
    }
}

fn roi_pixels(px: u32) -> Result<i32, DriverError> {
    i32::try_from(px).map_err(|_| DriverError::new(ErrorCode::InvalidArgumentValue))
}

impl From<u32> for RoiExtent {
    fn from(px: u32) -> Self {
        Self::Pixels(px)
    }
}

/// Format7 region of interest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Format7Region {
    pub left: u32,
    pub top: u32,
    pub width: RoiExtent,
    pub height: RoiExtent,
}

impl Format7Region {
    pub fn new(left: u32, top: u32, width: impl Into<RoiExtent>, height: impl Into<RoiExtent>) -> Self {
        Self {
            left,
            top,
            width: width.into(),
            height: height.into(),
        }
    }

    /// `[left, top, width, height]` as passed to `dc1394_format7_set_roi`.
    pub fn raw(&self) -> Result<[i32; 4], DriverError> {
        Ok([
            roi_pixels(self.left)?,
            roi_pixels(self.top)?,
            self.width.raw()?,
            self.height.raw()?,
        ])
    }
}

/// Consistent snapshot of the cached Format7 selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Format7Settings {
    pub video_mode: VideoMode,
    pub color_coding: ColorCoding,
    pub region: Format7Region,
}

/// Bus identity of an enumerated camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraId {
    pub guid: u64,
    pub unit: u16,
}

bitflags! {
    /// `dc1394capture_flags_t`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CaptureFlags: u32 {
        const CHANNEL_ALLOC = 0x0000_0001;
        const BANDWIDTH_ALLOC = 0x0000_0002;
        const DEFAULT = 0x0000_0004;
        const AUTO_ISO = 0x0000_0008;
    }
}

/// `DC1394_QUERY_FROM_CAMERA`: packet size argument of `format7_set_roi`.
pub const QUERY_FROM_CAMERA: i32 = -1;

use crate::types::{ColorCoding, Format7Region, Framerate, IsoSpeed, OperationMode, VideoMode};

/// Number of driver ring-buffer slots allocated by `start()`.
pub const CAPTURE_BUFFER_DEPTH: u32 = 8;

/// Initial session selection of a [`Dc1394Camera`](crate::Dc1394Camera).
///
/// Seeds the adapter's cached state at construction; nothing reaches the
/// device until [`apply_config`](crate::Dc1394Camera::apply_config) runs on
/// an open camera.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct SessionConfig {
    /// Position in the bus enumeration.
    pub node: u32,
    pub video_mode: VideoMode,
    /// Only consulted for Format7 modes.
    pub color_coding: ColorCoding,
    /// Only consulted for Format7 modes.
    pub format7: Format7Region,
    /// Only consulted for fixed modes.
    pub framerate: Framerate,
    /// 1394b is needed for speeds above 400 Mb/s.
    pub operation_mode: OperationMode,
    pub iso_speed: IsoSpeed,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            node: 0,
            video_mode: VideoMode::default(),
            color_coding: ColorCoding::default(),
            format7: Format7Region::default(),
            framerate: Framerate::default(),
            operation_mode: OperationMode::default(),
            iso_speed: IsoSpeed::default(),
        }
    }

    pub fn node(mut self, node: u32) -> Self {
        self.node = node;
        self
    }

    /// Select a fixed video mode.
    pub fn video_mode(mut self, mode: VideoMode) -> Self {
        self.video_mode = mode;
        self
    }

    /// Select a Format7 mode together with its coding and region.
    pub fn format7(mut self, mode: VideoMode, coding: ColorCoding, region: Format7Region) -> Self {
        self.video_mode = mode;
        self.color_coding = coding;
        self.format7 = region;
        self
    }

    pub fn framerate(mut self, framerate: Framerate) -> Self {
        self.framerate = framerate;
        self
    }

    pub fn operation_mode(mut self, mode: OperationMode) -> Self {
        self.operation_mode = mode;
        self
    }

    pub fn iso_speed(mut self, speed: IsoSpeed) -> Self {
        self.iso_speed = speed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoiExtent;

    #[test]
    fn baseline() {
        let config = SessionConfig::default();
        assert_eq!(config.node, 0);
        assert_eq!(config.video_mode, VideoMode::Mode640x480Rgb8);
        assert_eq!(config.color_coding, ColorCoding::Raw8);
        assert_eq!(config.format7.left, 0);
        assert_eq!(config.format7.height, RoiExtent::MaxAvailable);
        assert_eq!(config.framerate, Framerate::Fps1_875);
        assert_eq!(config.operation_mode, OperationMode::Legacy);
        assert_eq!(config.iso_speed, IsoSpeed::Mbps400);
    }

    #[test]
    fn builder_chains() {
        let region = Format7Region::new(16, 8, 320u32, 240u32);
        let config = SessionConfig::new()
            .node(2)
            .format7(VideoMode::Format7_1, ColorCoding::Mono16, region)
            .operation_mode(OperationMode::Ieee1394B)
            .iso_speed(IsoSpeed::Mbps800);

        assert_eq!(config.node, 2);
        assert_eq!(config.video_mode, VideoMode::Format7_1);
        assert_eq!(config.color_coding, ColorCoding::Mono16);
        assert_eq!(config.format7, region);
        assert_eq!(config.operation_mode, OperationMode::Ieee1394B);
        assert_eq!(config.iso_speed, IsoSpeed::Mbps800);
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn partial_json_fills_defaults() -> anyhow::Result<()> {
        let config: SessionConfig =
            serde_json::from_str(r#"{ "node": 1, "framerate": "Fps30" }"#)?;
        assert_eq!(config.node, 1);
        assert_eq!(config.framerate, Framerate::Fps30);
        assert_eq!(config.video_mode, VideoMode::Mode640x480Rgb8);
        Ok(())
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn region_extents_serialize_by_name() -> anyhow::Result<()> {
        let config = SessionConfig::new().format7(
            VideoMode::Format7_0,
            ColorCoding::Raw8,
            Format7Region::new(0, 0, 640u32, RoiExtent::MaxAvailable),
        );
        let json = serde_json::to_value(&config)?;
        assert_eq!(json["format7"]["width"]["Pixels"], 640);
        assert_eq!(json["format7"]["height"], "MaxAvailable");
        Ok(())
    }
}

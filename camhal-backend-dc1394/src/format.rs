//! Video geometry, Format7, frame rate, ISO speed and operation mode.
//!
//! Getters marked *live* query the camera on every call; setters push to the
//! camera and update the local cache only once the driver accepted the value.

use crate::camera::Dc1394Camera;
use crate::driver::{BusDriver, CameraDriver};
use crate::error::Result;
use crate::pixel_map;
use crate::types::{
    ColorCoding, Format7Region, Format7Settings, Framerate, IsoSpeed, OperationMode, VideoMode,
    QUERY_FROM_CAMERA,
};

impl<B: BusDriver> Dc1394Camera<B> {
    fn dimensions(&self) -> Result<(u32, u32)> {
        Ok(self.handle()?.image_size_from_video_mode(self.video_mode)?)
    }

    /// Frame width in pixels of the selected video mode, as reported by the
    /// camera (live).
    pub fn width(&self) -> Result<u32> {
        self.dimensions().map(|(width, _)| width)
    }

    /// Frame height in pixels (live).
    pub fn height(&self) -> Result<u32> {
        self.dimensions().map(|(_, height)| height)
    }

    /// Bytes in one raw frame: `width * height * bits_per_pixel / 8`.
    ///
    /// Returns 0 when the (mode, coding) pair has no known pixel layout.
    pub fn size(&self) -> Result<usize> {
        let (width, height) = self.dimensions()?;
        match pixel_map::frame_size(width, height, self.video_mode, self.color_coding) {
            Some(size) => Ok(size),
            None => {
                tracing::warn!(
                    target: "camhal::dc1394",
                    video_mode = ?self.video_mode,
                    color_coding = ?self.color_coding,
                    "no pixel layout for video mode, frame size is 0"
                );
                Ok(0)
            }
        }
    }

    /// Live.
    pub fn video_mode(&self) -> Result<VideoMode> {
        Ok(self.handle()?.video_get_mode()?)
    }

    pub fn set_video_mode(&mut self, mode: VideoMode) -> Result<()> {
        self.handle_mut()?.video_set_mode(mode)?;
        self.video_mode = mode;
        Ok(())
    }

    /// Cached mode, coding and region from the last successful
    /// [`set_format7`](Self::set_format7). No driver round-trip.
    pub fn format7(&self) -> Format7Settings {
        Format7Settings {
            video_mode: self.video_mode,
            color_coding: self.color_coding,
            region: self.format7,
        }
    }

    /// Pushes a Format7 mode, coding and region in one driver call. The
    /// packet size is left for the camera to choose.
    ///
    /// A region value that does not fit the driver's `i32` arguments fails
    /// with `InvalidArgumentValue` before anything reaches the camera.
    pub fn set_format7(
        &mut self,
        mode: VideoMode,
        coding: ColorCoding,
        region: Format7Region,
    ) -> Result<()> {
        let [left, top, width, height] = region.raw()?;

        self.handle_mut()?.format7_set_roi(
            mode,
            coding,
            QUERY_FROM_CAMERA,
            left,
            top,
            width,
            height,
        )?;

        self.video_mode = mode;
        self.color_coding = coding;
        self.format7 = region;
        Ok(())
    }

    /// Largest `(width, height)` the camera supports in `mode`.
    pub fn format7_maximum_image_size(&self, mode: VideoMode) -> Result<(u32, u32)> {
        Ok(self.handle()?.format7_get_max_image_size(mode)?)
    }

    /// Live.
    pub fn framerate(&self) -> Result<Framerate> {
        Ok(self.handle()?.video_get_framerate()?)
    }

    pub fn set_framerate(&mut self, framerate: Framerate) -> Result<()> {
        self.handle_mut()?.video_set_framerate(framerate)?;
        self.framerate = framerate;
        Ok(())
    }

    /// Live.
    pub fn speed(&self) -> Result<IsoSpeed> {
        Ok(self.handle()?.video_get_iso_speed()?)
    }

    pub fn set_speed(&mut self, speed: IsoSpeed) -> Result<()> {
        self.handle_mut()?.video_set_iso_speed(speed)?;
        self.speed = speed;
        Ok(())
    }

    /// Live.
    pub fn operation_mode(&self) -> Result<OperationMode> {
        Ok(self.handle()?.video_get_operation_mode()?)
    }

    pub fn set_operation_mode(&mut self, mode: OperationMode) -> Result<()> {
        self.handle_mut()?.video_set_operation_mode(mode)?;
        self.operation_mode = mode;
        Ok(())
    }
}

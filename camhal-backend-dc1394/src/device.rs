use camhal_core::error::PreconditionError;
use camhal_core::state::DeviceState;

use crate::camera::Dc1394Camera;
use crate::config::SessionConfig;
use crate::driver::{BusDriver, CameraDriver};
use crate::error::Result;

impl<B: BusDriver> Dc1394Camera<B> {
    /// Enumerates the bus and binds to the camera at position `node`.
    ///
    /// The device count is recorded before the node is range-checked, so
    /// `num_cameras()` reflects this enumeration even when the node is out
    /// of range.
    pub fn open(&mut self) -> Result<()> {
        self.state.require_closed()?;

        // 1. Scan the bus (the driver's list is released inside enumerate)
        let ids = self.bus.enumerate()?;
        self.cameras = u32::try_from(ids.len()).unwrap_or(u32::MAX);

        // 2. Select our node
        let id = ids
            .get(self.node as usize)
            .ok_or(PreconditionError::InvalidNode {
                node: self.node,
                available: self.cameras,
            })?;

        // 3. Open the camera handle
        let camera = self.bus.camera_new(id.guid)?;
        self.camera = Some(camera);
        self.state.transition(DeviceState::Opened);

        tracing::debug!(
            target: "camhal::dc1394",
            node = self.node,
            guid = id.guid,
            cameras = self.cameras,
            "camera opened"
        );

        Ok(())
    }

    /// Releases the camera handle. A no-op when already closed; the driver
    /// context stays alive until the adapter is dropped.
    pub fn close(&mut self) {
        if self.camera.take().is_some() {
            tracing::debug!(target: "camhal::dc1394", node = self.node, "camera closed");
        }
        self.state.transition(DeviceState::Closed);
    }

    /// Hardware reset of the open camera.
    pub fn reset(&mut self) -> Result<()> {
        self.handle_mut()?.reset()?;
        tracing::debug!(target: "camhal::dc1394", node = self.node, "camera reset");
        Ok(())
    }

    /// Pushes `config` to the open device, then adopts its node for the
    /// next `open()`.
    ///
    /// Format7 modes are set through `set_format7`; fixed modes through
    /// `set_video_mode` followed by `set_framerate`. The operation mode goes
    /// ahead of the ISO speed, which is set last. The first failing call
    /// aborts; earlier calls are not undone.
    pub fn apply_config(&mut self, config: &SessionConfig) -> Result<()> {
        self.state.require_open()?;

        if config.video_mode.is_format7() {
            self.set_format7(config.video_mode, config.color_coding, config.format7)?;
        } else {
            self.set_video_mode(config.video_mode)?;
            self.set_framerate(config.framerate)?;
        }
        self.set_operation_mode(config.operation_mode)?;
        self.set_speed(config.iso_speed)?;
        self.node = config.node;

        Ok(())
    }
}

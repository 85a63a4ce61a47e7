use camhal_core::error::PreconditionError;
use camhal_core::state::DeviceState;

use crate::camera::Dc1394Camera;
use crate::driver::{BusDriver, CameraDriver};
use crate::error::{AdapterError, Result};

impl<B: BusDriver> Dc1394Camera<B> {
    /// Allocates the capture ring, powers the camera up and enables
    /// isochronous transmission.
    ///
    /// A failing step aborts the sequence without undoing the earlier ones;
    /// `stop()` or `close()` cleans up.
    pub fn start(&mut self) -> Result<()> {
        self.state.require_idle()?;

        let depth = self.buffer_depth;
        let flags = self.capture_flags;
        let camera = self.handle_mut()?;
        camera.capture_setup(depth, flags)?;
        camera.set_power(true)?;
        camera.video_set_transmission(true)?;

        self.state.transition(DeviceState::Capturing);
        tracing::debug!(
            target: "camhal::dc1394",
            node = self.node,
            buffers = depth,
            "capture started"
        );
        Ok(())
    }

    /// Blocks until the camera delivers a frame and copies its first
    /// `size()` bytes into `buffer`.
    ///
    /// The ring slot is always handed back once dequeued. If that hand-back
    /// fails, `buffer` already holds the frame and the driver error is
    /// still returned.
    pub fn grab(&mut self, buffer: &mut [u8]) -> Result<()> {
        self.state.require_capturing()?;

        let size = self.size()?;
        if buffer.len() < size {
            return Err(PreconditionError::BufferTooSmall {
                required: size,
                provided: buffer.len(),
            }
            .into());
        }

        let camera = self.handle_mut()?;
        let frame = camera.capture_dequeue()?;

        let actual = frame.as_ref().len();
        if actual < size {
            camera.capture_enqueue(frame)?;
            return Err(AdapterError::TruncatedFrame {
                expected: size,
                actual,
            });
        }

        buffer[..size].copy_from_slice(&frame.as_ref()[..size]);
        camera.capture_enqueue(frame)?;

        tracing::trace!(target: "camhal::dc1394", bytes = size, "frame grabbed");
        Ok(())
    }

    /// Disables transmission, powers the camera down and releases the
    /// capture ring.
    ///
    /// Only needs an open camera, so it can follow a partially failed
    /// `start()`. Earlier steps are not undone when a later one fails.
    pub fn stop(&mut self) -> Result<()> {
        let camera = self.handle_mut()?;
        camera.video_set_transmission(false)?;
        camera.set_power(false)?;
        camera.capture_stop()?;

        self.state.transition(DeviceState::Opened);
        tracing::debug!(target: "camhal::dc1394", node = self.node, "capture stopped");
        Ok(())
    }
}

use std::time::Duration;

// --- Device contracts ---
//
// Every operation is synchronous and returns only after the underlying
// driver call has completed. Implementations assume serialized access:
// none of these traits require `Sync`, and callers sharing a device across
// threads must provide their own exclusion.

/// 1. Lifecycle shared by every device kind.
pub trait Device {
    type Error: std::error::Error;

    /// Binds the adapter to a physical device.
    fn open(&mut self) -> Result<(), Self::Error>;

    /// Releases the physical device. Calling it on a closed device is a no-op.
    fn close(&mut self) -> Result<(), Self::Error>;

    /// Arms the device for operation (e.g. starts streaming).
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Disarms the device.
    fn stop(&mut self) -> Result<(), Self::Error>;

    /// Periodic tick hook, driven by the owning scheduler.
    fn step(&mut self) -> Result<(), Self::Error>;
}

/// 2. Devices driven on a fixed cadence.
pub trait CyclicDevice: Device {
    /// Interval between two `step` calls. A zero duration means the device
    /// does not publish a cadence.
    fn update_rate(&self) -> Duration;
}

/// 3. Data plane: synchronous frame acquisition.
pub trait FrameSource: Device {
    /// Blocks until one frame is available and copies it into `buffer`.
    fn grab(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error>;
}

/// 4. Image geometry of a frame source.
pub trait Camera: FrameSource {
    /// Bits occupied by one pixel in the raw frame, or 0 when unknown.
    fn bits_per_pixel(&self) -> u32;

    /// Sample depth of one color channel, or 0 when unknown.
    fn color_coding_depth(&self) -> u32;

    fn width(&self) -> Result<u32, Self::Error>;

    fn height(&self) -> Result<u32, Self::Error>;

    /// Bytes in one raw frame: `width * height * bits_per_pixel / 8`.
    fn size(&self) -> Result<usize, Self::Error>;
}

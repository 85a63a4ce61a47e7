use std::time::Instant;

use anyhow::{Context, Result};
use camhal_backend_dc1394::{Dc1394Camera, Feature, Framerate, IsoSpeed, VideoMode};

const FRAMES: usize = 30;

fn main() -> Result<()> {
    // 1. Logging, so the adapter's tracing events show up
    tracing_subscriber::fmt::init();

    println!("=== CamHAL IEEE-1394 Demo ===");

    // 2. Optional node index as the first argument
    let node = match std::env::args().nth(1) {
        Some(arg) => arg.parse().context("node must be a number")?,
        None => 0,
    };

    // 3. Open and configure
    let mut camera = Dc1394Camera::system(node).context("failed to create libdc1394 context")?;
    camera
        .open()
        .with_context(|| format!("failed to open camera at node {node}"))?;
    println!("Found {} camera(s), using node {}", camera.num_cameras(), node);

    camera.set_speed(IsoSpeed::Mbps400)?;
    camera.set_video_mode(VideoMode::Mode640x480Mono8)?;
    camera.set_framerate(Framerate::Fps30)?;

    if camera.is_feature_present(Feature::Shutter)? {
        let (min, max) = camera.feature_boundaries(Feature::Shutter)?;
        println!(
            "Shutter: {} (range {}..={})",
            camera.feature_value(Feature::Shutter)?,
            min,
            max
        );
    }

    let (width, height) = (camera.width()?, camera.height()?);
    let size = camera.size()?;
    println!(
        "Mode {:?}: {}x{}, {} bpp, {} bytes/frame, period {:?}",
        camera.video_mode()?,
        width,
        height,
        camera.bits_per_pixel(),
        size,
        camera.update_rate()
    );

    // 4. Capture
    camera.start().context("failed to start capture")?;

    let mut buffer = vec![0u8; size];
    let started = Instant::now();
    for i in 0..FRAMES {
        camera.grab(&mut buffer)?;
        let mean = buffer.iter().map(|b| u64::from(*b)).sum::<u64>() / size.max(1) as u64;
        println!("frame {:>3}: mean level {}", i, mean);
    }
    let elapsed = started.elapsed();
    println!(
        "{} frames in {:.2?} ({:.1} fps)",
        FRAMES,
        elapsed,
        FRAMES as f64 / elapsed.as_secs_f64()
    );

    // 5. Teardown
    camera.stop()?;
    camera.close();

    Ok(())
}

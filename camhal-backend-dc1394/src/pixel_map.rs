//! Capability table: raw frame layout of every (video mode, color coding) pair.
//!
//! Fixed modes imply their coding; Format7 modes dispatch on the coding. An
//! unknown combination yields 0, which callers must read as "cannot compute
//! a frame size" rather than as an error.

use crate::types::{ColorCoding, VideoMode};

/// Bits one pixel occupies in the raw frame.
pub fn bits_per_pixel(video_mode: VideoMode, color_coding: ColorCoding) -> u32 {
    use VideoMode::*;

    match video_mode {
        Mode640x480Mono8 | Mode800x600Mono8 | Mode1024x768Mono8 | Mode1280x960Mono8
        | Mode1600x1200Mono8 => 8,

        Mode640x480Yuv411 => 12,

        Mode640x480Mono16 | Mode800x600Mono16 | Mode1024x768Mono16 | Mode1280x960Mono16
        | Mode1600x1200Mono16 | Mode320x240Yuv422 | Mode640x480Yuv422 | Mode800x600Yuv422
        | Mode1024x768Yuv422 | Mode1280x960Yuv422 | Mode1600x1200Yuv422 => 16,

        Mode640x480Rgb8 | Mode800x600Rgb8 | Mode1024x768Rgb8 | Mode1280x960Rgb8
        | Mode1600x1200Rgb8 | Mode160x120Yuv444 => 24,

        Format7_0 | Format7_1 | Format7_2 | Format7_3 | Format7_4 | Format7_5 | Format7_6
        | Format7_7 => format7_bits_per_pixel(color_coding),

        Exif => 0,
    }
}

fn format7_bits_per_pixel(color_coding: ColorCoding) -> u32 {
    use ColorCoding::*;

    match color_coding {
        Mono8 | Raw8 => 8,
        Yuv411 => 12,
        Mono16 | Mono16Signed | Raw16 | Yuv422 => 16,
        Rgb8 | Yuv444 => 24,
        Rgb16 | Rgb16Signed => 48,
    }
}

/// Depth of one sample of one channel (8 or 16).
pub fn color_coding_depth(video_mode: VideoMode, color_coding: ColorCoding) -> u32 {
    use VideoMode::*;

    match video_mode {
        Mode640x480Mono8 | Mode800x600Mono8 | Mode1024x768Mono8 | Mode1280x960Mono8
        | Mode1600x1200Mono8 | Mode640x480Rgb8 | Mode800x600Rgb8 | Mode1024x768Rgb8
        | Mode1280x960Rgb8 | Mode1600x1200Rgb8 | Mode640x480Yuv411 | Mode320x240Yuv422
        | Mode640x480Yuv422 | Mode800x600Yuv422 | Mode1024x768Yuv422 | Mode1280x960Yuv422
        | Mode1600x1200Yuv422 | Mode160x120Yuv444 => 8,

        Mode640x480Mono16 | Mode800x600Mono16 | Mode1024x768Mono16 | Mode1280x960Mono16
        | Mode1600x1200Mono16 => 16,

        Format7_0 | Format7_1 | Format7_2 | Format7_3 | Format7_4 | Format7_5 | Format7_6
        | Format7_7 => format7_color_coding_depth(color_coding),

        Exif => 0,
    }
}

fn format7_color_coding_depth(color_coding: ColorCoding) -> u32 {
    use ColorCoding::*;

    match color_coding {
        Mono8 | Raw8 | Rgb8 | Yuv411 | Yuv422 | Yuv444 => 8,
        Mono16 | Mono16Signed | Raw16 | Rgb16 | Rgb16Signed => 16,
    }
}

/// Bytes in one raw frame, or `None` when the pair has no known layout.
pub fn frame_size(
    width: u32,
    height: u32,
    video_mode: VideoMode,
    color_coding: ColorCoding,
) -> Option<usize> {
    match bits_per_pixel(video_mode, color_coding) {
        0 => None,
        bits => Some(width as usize * height as usize * bits as usize / 8),
    }
}

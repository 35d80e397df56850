use crate::sim::{CameraFrame, SimError};

// ITU-R BT.601 luma weights.
const LUMA: [f32; 3] = [0.299, 0.587, 0.114];

/// Collapse colour channels to luminance and/or scale pixels into [0, 1].
///
/// Single-channel frames pass through the grayscale step unchanged; any
/// alpha channel is dropped. Frames whose pixel buffer does not match
/// `width * height * channels` are rejected.
pub fn post_process_image(
    frame: CameraFrame,
    normalized: bool,
    grayscale: bool,
) -> Result<CameraFrame, SimError> {
    let expected = frame.width as usize * frame.height as usize * frame.channels as usize;
    if frame.pixels.len() != expected {
        return Err(SimError::MalformedFrame {
            expected,
            got: frame.pixels.len(),
        });
    }

    let mut frame = if grayscale && frame.channels >= 3 {
        to_grayscale(&frame)
    } else {
        frame
    };

    if normalized {
        for px in frame.pixels.iter_mut() {
            *px /= 255.0;
        }
    }
    Ok(frame)
}

fn to_grayscale(frame: &CameraFrame) -> CameraFrame {
    let channels = frame.channels as usize;
    let pixels = frame
        .pixels
        .chunks_exact(channels)
        .map(|px| px[0] * LUMA[0] + px[1] * LUMA[1] + px[2] * LUMA[2])
        .collect();

    CameraFrame {
        width: frame.width,
        height: frame.height,
        channels: 1,
        pixels,
    }
}

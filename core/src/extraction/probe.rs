use crate::types::FrameFormat;
use image::GenericImageView;
use log::debug;

/// Decodes a frame to get its width and height
///
/// Best effort: video streams are not attempted, and anything the image
/// decoders reject (JPEG lossless, JPEG-LS, JPEG 2000, raw samples, ...)
/// simply has no dimensions.
pub fn probe_dimensions(data: &[u8], format: FrameFormat) -> Option<(u32, u32)> {
    if format.is_video() {
        return None;
    }

    match image::load_from_memory(data) {
        Ok(img) => Some(img.dimensions()),
        Err(e) => {
            debug!("No dimensions for {} frame: {}", format, e);
            None
        }
    }
}

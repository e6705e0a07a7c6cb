//! Pixel data frame extraction
//!
//! Writes every frame of a Pixel Data element to its own file, in
//! encoding order, and records what was written.

mod naming;
mod probe;

pub use naming::frame_file_name;
pub use probe::probe_dimensions;

use crate::dataset::PixelData;
use crate::error::DcmpeekError;
use crate::types::{CodecFamily, FrameFormat};
use log::{info, warn};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// One frame written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRecord {
    /// Zero-based frame index within the source file
    pub index: usize,
    /// Format detected from the frame bytes
    pub format: FrameFormat,
    /// Where the frame was written
    pub path: PathBuf,
    /// Width and height, when the frame could be decoded as an image
    pub dimensions: Option<(u32, u32)>,
}

impl fmt::Display for ExtractionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.format.mime_type(), self.path.display())?;
        if let Some((width, height)) = self.dimensions {
            write!(f, ", width={}, height={}", width, height)?;
        }
        Ok(())
    }
}

/// Outcome of extracting the frames of one file
///
/// Frames that could not be written show up in `errors` only; the
/// remaining frames are still extracted.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<ExtractionRecord>,
    pub errors: Vec<DcmpeekError>,
}

/// Writes pixel data frames into an output directory
#[derive(Debug, Clone)]
pub struct FrameExtractor {
    output_dir: PathBuf,
}

impl FrameExtractor {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Extracts all frames of `pixel_data`
    ///
    /// `source` names the output files, `family` provides the extension
    /// for frames whose signature is not recognized.
    pub fn extract(&self, pixel_data: &PixelData, source: &Path, family: CodecFamily) -> Extraction {
        let mut extraction = Extraction::default();

        for (index, frame) in pixel_data.frames.iter().enumerate() {
            let format = FrameFormat::detect(frame);
            let extension = format
                .extension()
                .unwrap_or_else(|| family.fallback_extension());
            let path = self
                .output_dir
                .join(frame_file_name(source, index, extension));

            if let Err(e) = fs::write(&path, frame) {
                let err = DcmpeekError::ExtractionWrite {
                    index,
                    path,
                    source: e,
                };
                warn!("{}", err);
                extraction.errors.push(err);
                continue;
            }
            info!("Extracted frame {} ({}) to {}", index, format, path.display());

            extraction.records.push(ExtractionRecord {
                index,
                format,
                dimensions: probe_dimensions(frame, format),
                path,
            });
        }

        extraction
    }
}

#[cfg(test)]
mod tests {
    use super::probe::tests::jpeg_bytes;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extract_three_frames() {
        let temp_dir = TempDir::new().unwrap();
        let extractor = FrameExtractor::new(temp_dir.path());
        let pixel_data = PixelData::new(vec![jpeg_bytes(8, 8), jpeg_bytes(8, 8), jpeg_bytes(8, 8)]);

        let extraction = extractor.extract(&pixel_data, Path::new("/in/scan.dcm"), CodecFamily::Jpeg);

        assert!(extraction.errors.is_empty());
        let indices: Vec<usize> = extraction.records.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        for record in &extraction.records {
            assert_eq!(
                record.path,
                temp_dir.path().join(format!("scan.dcm.{}.jpg", record.index))
            );
            assert!(record.path.is_file());
        }
    }

    #[test]
    fn test_write_failure_skips_only_that_frame() {
        let temp_dir = TempDir::new().unwrap();
        // a directory where frame 1 should go makes that single write fail
        fs::create_dir(temp_dir.path().join("scan.dcm.1.jpg")).unwrap();

        let extractor = FrameExtractor::new(temp_dir.path());
        let pixel_data = PixelData::new(vec![jpeg_bytes(4, 4), jpeg_bytes(4, 4), jpeg_bytes(4, 4)]);
        let extraction = extractor.extract(&pixel_data, Path::new("scan.dcm"), CodecFamily::Jpeg);

        let indices: Vec<usize> = extraction.records.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(extraction.errors.len(), 1);
        assert!(matches!(
            extraction.errors[0],
            DcmpeekError::ExtractionWrite { index: 1, .. }
        ));
        assert!(temp_dir.path().join("scan.dcm.0.jpg").is_file());
        assert!(temp_dir.path().join("scan.dcm.2.jpg").is_file());
    }

    #[test]
    fn test_jpeg_frame_has_dimensions() {
        let temp_dir = TempDir::new().unwrap();
        let extractor = FrameExtractor::new(temp_dir.path());
        let pixel_data = PixelData::new(vec![jpeg_bytes(32, 16)]);

        let extraction = extractor.extract(&pixel_data, Path::new("a.dcm"), CodecFamily::Jpeg);
        let record = &extraction.records[0];
        assert_eq!(record.format, FrameFormat::Jpeg);
        assert_eq!(record.dimensions, Some((32, 16)));
        assert_eq!(fs::read(&record.path).unwrap(), pixel_data.frames[0]);
    }

    #[test]
    fn test_unknown_frame_uses_codec_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let extractor = FrameExtractor::new(temp_dir.path());
        let pixel_data = PixelData::new(vec![vec![0x12, 0x34, 0x56, 0x78]]);

        let extraction = extractor.extract(&pixel_data, Path::new("a.dcm"), CodecFamily::Jpeg2000);
        assert!(extraction.errors.is_empty());
        let record = &extraction.records[0];
        assert_eq!(record.format, FrameFormat::Unknown);
        assert_eq!(record.dimensions, None);
        assert_eq!(record.path, temp_dir.path().join("a.dcm.0.j2k"));
    }

    #[test]
    fn test_record_display() {
        let record = ExtractionRecord {
            index: 0,
            format: FrameFormat::Jpeg,
            path: PathBuf::from("/out/a.dcm.0.jpg"),
            dimensions: Some((640, 480)),
        };
        assert_eq!(
            record.to_string(),
            "image/jpeg: /out/a.dcm.0.jpg, width=640, height=480"
        );

        let no_dims = ExtractionRecord {
            dimensions: None,
            ..record
        };
        assert_eq!(no_dims.to_string(), "image/jpeg: /out/a.dcm.0.jpg");
    }
}

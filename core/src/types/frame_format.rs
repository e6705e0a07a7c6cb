use std::fmt;

/// Container format of a single pixel data frame
///
/// Detected from the frame's own leading bytes. Frames of a multi-frame
/// object are self-describing, so the transfer syntax is only used as a
/// fallback hint when nothing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameFormat {
    Jpeg,
    JpegLs,
    Jpeg2000Codestream,
    Jp2,
    Png,
    Gif,
    Bmp,
    Tiff,
    MpegProgramStream,
    MpegVideo,
    H264,
    Mp4,
    Unknown,
}

const JPEG_SOI: &[u8] = &[0xFF, 0xD8, 0xFF];
const JPEG_LS_SOF55: &[u8] = &[0xFF, 0xD8, 0xFF, 0xF7];
const J2K_SOC_SIZ: &[u8] = &[0xFF, 0x4F, 0xFF, 0x51];
const JP2_SIGNATURE: &[u8] = &[
    0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A,
];
const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const MPEG_PACK_START: &[u8] = &[0x00, 0x00, 0x01, 0xBA];
const MPEG_SEQUENCE_HEADER: &[u8] = &[0x00, 0x00, 0x01, 0xB3];
const ANNEX_B_START_CODE: &[u8] = &[0x00, 0x00, 0x00, 0x01];

impl FrameFormat {
    /// Detects the format from the frame's signature bytes
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(JPEG_LS_SOF55) {
            FrameFormat::JpegLs
        } else if data.starts_with(JPEG_SOI) {
            FrameFormat::Jpeg
        } else if data.starts_with(J2K_SOC_SIZ) {
            FrameFormat::Jpeg2000Codestream
        } else if data.starts_with(JP2_SIGNATURE) {
            FrameFormat::Jp2
        } else if data.starts_with(PNG_SIGNATURE) {
            FrameFormat::Png
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            FrameFormat::Gif
        } else if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
            FrameFormat::Tiff
        } else if data.starts_with(MPEG_PACK_START) {
            FrameFormat::MpegProgramStream
        } else if data.starts_with(MPEG_SEQUENCE_HEADER) {
            FrameFormat::MpegVideo
        } else if data.starts_with(ANNEX_B_START_CODE) || is_short_annex_b(data) {
            FrameFormat::H264
        } else if data.len() >= 8 && &data[4..8] == b"ftyp" {
            FrameFormat::Mp4
        } else if data.len() >= 14 && data.starts_with(b"BM") {
            FrameFormat::Bmp
        } else {
            FrameFormat::Unknown
        }
    }

    /// MIME type label
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::JpegLs => "image/jls",
            Self::Jpeg2000Codestream => "image/j2c",
            Self::Jp2 => "image/jp2",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
            Self::MpegProgramStream | Self::MpegVideo => "video/mpeg",
            Self::H264 => "video/h264",
            Self::Mp4 => "video/mp4",
            Self::Unknown => "application/octet-stream",
        }
    }

    /// File extension, `None` when the format was not recognized
    pub const fn extension(self) -> Option<&'static str> {
        match self {
            Self::Jpeg => Some("jpg"),
            Self::JpegLs => Some("jls"),
            Self::Jpeg2000Codestream => Some("j2k"),
            Self::Jp2 => Some("jp2"),
            Self::Png => Some("png"),
            Self::Gif => Some("gif"),
            Self::Bmp => Some("bmp"),
            Self::Tiff => Some("tif"),
            Self::MpegProgramStream => Some("mpg"),
            Self::MpegVideo => Some("m2v"),
            Self::H264 => Some("h264"),
            Self::Mp4 => Some("mp4"),
            Self::Unknown => None,
        }
    }

    /// Whether this is a video stream rather than a still image
    pub const fn is_video(self) -> bool {
        matches!(
            self,
            Self::MpegProgramStream | Self::MpegVideo | Self::H264 | Self::Mp4
        )
    }
}

impl fmt::Display for FrameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mime_type())
    }
}

/// Three byte start code followed by an SPS or access unit delimiter NAL
fn is_short_annex_b(data: &[u8]) -> bool {
    if data.len() < 4 || data[..3] != [0x00, 0x00, 0x01] {
        return false;
    }
    let nal = data[3];
    nal & 0x80 == 0 && matches!(nal & 0x1F, 7 | 9)
}

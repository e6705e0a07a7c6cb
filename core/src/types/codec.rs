use std::fmt;

/// Codec family a transfer syntax belongs to
///
/// Determines how embedded pixel data frames have to be interpreted.
/// Anything that is not a JPEG, JPEG 2000 or MPEG encapsulation
/// (native little/big endian, deflate, RLE, ...) is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecFamily {
    Jpeg,
    Jpeg2000,
    Mpeg,
    Other,
}

impl CodecFamily {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            CodecFamily::Jpeg => "jpeg",
            CodecFamily::Jpeg2000 => "jpeg2000",
            CodecFamily::Mpeg => "mpeg",
            CodecFamily::Other => "other",
        }
    }

    /// Extension used for frames whose signature was not recognized
    pub fn fallback_extension(&self) -> &'static str {
        match self {
            CodecFamily::Jpeg2000 => "j2k",
            CodecFamily::Mpeg => "mpg",
            CodecFamily::Jpeg | CodecFamily::Other => "jpg",
        }
    }
}

impl fmt::Display for CodecFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

//! Core type definitions for DICOM inspection
//!
//! - [`CodecFamily`]: Codec family selected by a transfer syntax
//! - [`DisplayFilter`]: Standard or verbose tag selection
//! - [`FrameFormat`]: Container format detected from a frame's bytes
//! - [`InspectOptions`]: Run configuration

mod codec;
mod filter;
mod frame_format;
mod options;

pub use codec::CodecFamily;
pub use filter::{DisplayFilter, STANDARD_TAGS};
pub use frame_format::FrameFormat;
pub use options::InspectOptions;

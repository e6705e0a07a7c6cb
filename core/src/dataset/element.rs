use dicom_core::header::Header;
use dicom_core::value::{PrimitiveValue, Value as DicomValue};
use dicom_core::{Tag, VR};
use dicom_object::mem::InMemElement;
use std::fmt;

use super::tags::PIXEL_DATA;

/// One element of a decoded dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub vr: VR,
    pub value: ElementValue,
}

/// Value of an element, resolved once when the dataset is decoded
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
    /// Printable representation of a primitive value
    Scalar(String),
    /// Nested sequence, only its item count is kept
    Sequence { items: usize },
    /// Frames of the Pixel Data element
    PixelData(PixelData),
}

/// Pixel data frames in encoding order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PixelData {
    pub frames: Vec<Vec<u8>>,
    /// Whether the frames come from an encapsulated (compressed) pixel sequence
    pub encapsulated: bool,
}

impl Element {
    pub fn new(tag: Tag, vr: VR, value: ElementValue) -> Self {
        Self { tag, vr, value }
    }

    /// Creates an element holding a printable value
    pub fn scalar(tag: Tag, vr: VR, value: impl Into<String>) -> Self {
        Self::new(tag, vr, ElementValue::Scalar(value.into()))
    }

    /// Converts an element of a decoded DICOM object
    ///
    /// `number_of_frames` is only used to split the Pixel Data element.
    pub fn from_dicom(elem: &InMemElement, number_of_frames: Option<u32>) -> Self {
        let tag = elem.tag();
        let vr = elem.vr();

        let value = match elem.value() {
            DicomValue::Sequence(seq) => ElementValue::Sequence {
                items: seq.items().len(),
            },
            DicomValue::PixelSequence(seq) => {
                let frames = split_fragments(seq.fragments(), seq.offset_table(), number_of_frames);
                ElementValue::PixelData(PixelData {
                    frames,
                    encapsulated: true,
                })
            }
            DicomValue::Primitive(value) if tag == PIXEL_DATA => {
                let frames = split_native(&value.to_bytes(), number_of_frames);
                ElementValue::PixelData(PixelData {
                    frames,
                    encapsulated: false,
                })
            }
            DicomValue::Primitive(value) => ElementValue::Scalar(printable(value, vr)),
        };

        Self { tag, vr, value }
    }

    /// Returns the pixel data frames if this is the Pixel Data element
    pub fn pixel_data(&self) -> Option<&PixelData> {
        match &self.value {
            ElementValue::PixelData(data) => Some(data),
            _ => None,
        }
    }
}

impl fmt::Display for ElementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementValue::Scalar(s) => write!(f, "{}", s),
            ElementValue::Sequence { items } => write!(
                f,
                "(Sequence with {} item{})",
                items,
                if *items == 1 { "" } else { "s" }
            ),
            ElementValue::PixelData(data) => write!(
                f,
                "(Pixel data, {} frame{})",
                data.frames.len(),
                if data.frames.len() == 1 { "" } else { "s" }
            ),
        }
    }
}

impl PixelData {
    pub fn new(frames: Vec<Vec<u8>>) -> Self {
        Self {
            frames,
            encapsulated: true,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn printable(value: &PrimitiveValue, vr: VR) -> String {
    match vr {
        VR::OB | VR::OW | VR::OF | VR::OD | VR::OL | VR::UN => {
            format!("({} bytes)", value.to_bytes().len())
        }
        _ => value
            .to_str()
            .trim_end_matches(&['\0', ' '][..])
            .to_string(),
    }
}

/// Splits encapsulated fragments into frames
///
/// - as many fragments as frames: one frame per fragment
/// - single frame (or no frame count): all fragments concatenated
/// - otherwise the basic offset table decides where each frame starts
fn split_fragments(
    fragments: &[Vec<u8>],
    offset_table: &[u32],
    number_of_frames: Option<u32>,
) -> Vec<Vec<u8>> {
    // an absent frame count means a single frame
    let frame_count = number_of_frames.unwrap_or(1) as usize;

    if fragments.is_empty() || frame_count == fragments.len() {
        return fragments.to_vec();
    }

    if frame_count <= 1 {
        return vec![fragments.concat()];
    }

    if offset_table.len() != frame_count {
        return fragments.to_vec();
    }

    // each fragment item has an 8 byte item header before its data
    let mut frames: Vec<Vec<u8>> = vec![Vec::new(); frame_count];
    let mut position: u64 = 0;
    for fragment in fragments {
        let frame_index = offset_table
            .iter()
            .rposition(|&offset| u64::from(offset) <= position)
            .unwrap_or(0);
        frames[frame_index].extend_from_slice(fragment);
        position += 8 + fragment.len() as u64;
    }
    frames
}

/// Splits native pixel data into equally sized frames
fn split_native(bytes: &[u8], number_of_frames: Option<u32>) -> Vec<Vec<u8>> {
    if bytes.is_empty() {
        return Vec::new();
    }

    let frame_count = number_of_frames.unwrap_or(1).max(1) as usize;
    if frame_count == 1 || bytes.len() % frame_count != 0 {
        return vec![bytes.to_vec()];
    }

    bytes
        .chunks(bytes.len() / frame_count)
        .map(|chunk| chunk.to_vec())
        .collect()
}

//! Decoded DICOM datasets
//!
//! A [`Dataset`] is the read-only view this crate works on: the elements
//! of one file, including its file meta group, with every value already
//! resolved into an [`ElementValue`].

mod element;
pub mod tags;

pub use element::{Element, ElementValue, PixelData};

use crate::error::{DcmpeekError, Result};
use crate::transfer_syntax;
use crate::types::CodecFamily;
use dicom_core::{Tag, VR};
use dicom_object::{DefaultDicomObject, InMemDicomObject, OpenFileOptions};
use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tags::{
    IMPLEMENTATION_CLASS_UID, IMPLEMENTATION_VERSION_NAME, MEDIA_STORAGE_SOP_CLASS_UID,
    MEDIA_STORAGE_SOP_INSTANCE_UID, NUMBER_OF_FRAMES, PIXEL_DATA,
    SOURCE_APPLICATION_ENTITY_TITLE, TRANSFER_SYNTAX_UID,
};

/// Elements of one decoded DICOM file, ordered by tag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    path: PathBuf,
    elements: BTreeMap<Tag, Element>,
}

impl Dataset {
    /// Reads and decodes a DICOM file
    ///
    /// Unless `keep_pixel_data` is set, reading stops before Pixel Data so
    /// the frames are never loaded into memory.
    ///
    /// # Errors
    ///
    /// Returns a decode error naming the file if it is not a readable DICOM file.
    pub fn open(path: impl AsRef<Path>, keep_pixel_data: bool) -> Result<Self> {
        let path = path.as_ref();
        let mut options = OpenFileOptions::new();
        if !keep_pixel_data {
            options = options.read_until(PIXEL_DATA);
        }

        let obj = options
            .open_file(path)
            .map_err(|e| DcmpeekError::decode(path, e))?;

        debug!(
            "Decoded {} (transfer syntax {})",
            path.display(),
            obj.meta().transfer_syntax()
        );

        Ok(Self::from_file_object(path, &obj))
    }

    /// Builds a dataset from an opened DICOM file, meta group included
    pub fn from_file_object(path: impl Into<PathBuf>, obj: &DefaultDicomObject) -> Self {
        let meta = obj.meta();
        let mut dataset = Self::from_object(path, obj);

        let meta_elements = [
            (MEDIA_STORAGE_SOP_CLASS_UID, VR::UI, Some(&meta.media_storage_sop_class_uid)),
            (MEDIA_STORAGE_SOP_INSTANCE_UID, VR::UI, Some(&meta.media_storage_sop_instance_uid)),
            (TRANSFER_SYNTAX_UID, VR::UI, Some(&meta.transfer_syntax)),
            (IMPLEMENTATION_CLASS_UID, VR::UI, Some(&meta.implementation_class_uid)),
            (IMPLEMENTATION_VERSION_NAME, VR::SH, meta.implementation_version_name.as_ref()),
            (SOURCE_APPLICATION_ENTITY_TITLE, VR::AE, meta.source_application_entity_title.as_ref()),
        ];

        for (tag, vr, value) in meta_elements {
            if let Some(value) = value {
                let value = value.trim_end_matches(&['\0', ' '][..]);
                dataset.insert(Element::scalar(tag, vr, value));
            }
        }

        dataset
    }

    /// Builds a dataset from the main data set of a DICOM object
    pub fn from_object(path: impl Into<PathBuf>, obj: &InMemDicomObject) -> Self {
        let number_of_frames = obj
            .element(NUMBER_OF_FRAMES)
            .ok()
            .and_then(|elem| elem.to_int::<u32>().ok());

        Self::from_elements(
            path,
            obj.into_iter()
                .map(|elem| Element::from_dicom(elem, number_of_frames)),
        )
    }

    /// Builds a dataset from already converted elements
    pub fn from_elements(
        path: impl Into<PathBuf>,
        elements: impl IntoIterator<Item = Element>,
    ) -> Self {
        Self {
            path: path.into(),
            elements: elements.into_iter().map(|e| (e.tag, e)).collect(),
        }
    }

    /// Adds or replaces an element
    pub fn insert(&mut self, element: Element) {
        self.elements.insert(element.tag, element);
    }

    /// Path of the file this dataset was decoded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks up an element by tag
    pub fn element(&self, tag: Tag) -> Option<&Element> {
        self.elements.get(&tag)
    }

    /// Iterates over the elements present, in tag order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Transfer syntax UID from the file meta group
    pub fn transfer_syntax(&self) -> Option<&str> {
        match self.element(TRANSFER_SYNTAX_UID).map(|e| &e.value) {
            Some(ElementValue::Scalar(uid)) => Some(uid.as_str()),
            _ => None,
        }
    }

    /// Codec family of the pixel data, [`CodecFamily::Other`] if unknown
    pub fn codec_family(&self) -> CodecFamily {
        self.transfer_syntax()
            .map(transfer_syntax::classify)
            .unwrap_or(CodecFamily::Other)
    }

    /// The Pixel Data element, if it was decoded
    pub fn pixel_data(&self) -> Option<&PixelData> {
        self.element(PIXEL_DATA).and_then(Element::pixel_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tags::{PATIENT_NAME, ROWS, SOP_CLASS_UID};
    use dicom_core::value::PrimitiveValue;
    use dicom_core::DataElement;
    use dicom_object::meta::FileMetaTableBuilder;
    use tempfile::TempDir;

    fn sample_object() -> InMemDicomObject {
        InMemDicomObject::from_element_iter([
            DataElement::new(
                SOP_CLASS_UID,
                VR::UI,
                PrimitiveValue::from("1.2.840.10008.5.1.4.1.1.7"),
            ),
            DataElement::new(PATIENT_NAME, VR::PN, PrimitiveValue::from("Doe^Jane")),
            DataElement::new(ROWS, VR::US, PrimitiveValue::from(4_u16)),
            DataElement::new(PIXEL_DATA, VR::OB, PrimitiveValue::from(vec![7_u8; 16])),
        ])
    }

    fn write_sample(dir: &Path) -> PathBuf {
        let path = dir.join("sample.dcm");
        let obj = sample_object()
            .with_meta(
                FileMetaTableBuilder::new()
                    .transfer_syntax("1.2.840.10008.1.2.1")
                    .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.7")
                    .media_storage_sop_instance_uid("1.2.3.4.5"),
            )
            .unwrap();
        obj.write_to_file(&path).unwrap();
        path
    }

    #[test]
    fn test_from_object_keeps_tag_order() {
        let dataset = Dataset::from_object("mem.dcm", &sample_object());
        let tags: Vec<Tag> = dataset.elements().map(|e| e.tag).collect();
        assert_eq!(tags, vec![SOP_CLASS_UID, PATIENT_NAME, ROWS, PIXEL_DATA]);
        assert_eq!(dataset.pixel_data().unwrap().len(), 1);
    }

    #[test]
    fn test_open_includes_meta_group() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_sample(temp_dir.path());

        let dataset = Dataset::open(&path, true).unwrap();
        assert_eq!(dataset.transfer_syntax(), Some("1.2.840.10008.1.2.1"));
        assert_eq!(dataset.codec_family(), CodecFamily::Other);
        assert_eq!(
            dataset.element(PATIENT_NAME).unwrap().value,
            ElementValue::Scalar("Doe^Jane".to_string())
        );
        assert_eq!(dataset.pixel_data().unwrap().frames, vec![vec![7_u8; 16]]);
    }

    #[test]
    fn test_open_drops_pixel_data() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_sample(temp_dir.path());

        let dataset = Dataset::open(&path, false).unwrap();
        assert!(dataset.pixel_data().is_none());
        assert!(dataset.element(ROWS).is_some());
    }

    #[test]
    fn test_open_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.dcm");
        std::fs::write(&path, b"definitely not DICOM").unwrap();

        let err = Dataset::open(&path, false).unwrap_err();
        assert!(matches!(err, DcmpeekError::Decode { .. }));
    }

    #[test]
    fn test_codec_family_from_elements() {
        let dataset = Dataset::from_elements(
            "a.dcm",
            [Element::scalar(TRANSFER_SYNTAX_UID, VR::UI, "1.2.840.10008.1.2.4.90")],
        );
        assert_eq!(dataset.codec_family(), CodecFamily::Jpeg2000);
        assert!(Dataset::default().transfer_syntax().is_none());
    }
}

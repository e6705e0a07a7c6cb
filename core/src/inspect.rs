//! Dataset inspection
//!
//! Walks the tag catalog against one dataset and produces the report
//! lines, delegating the Pixel Data element to the frame extractor.

use crate::catalog::TagCatalog;
use crate::dataset::tags::{PIXEL_DATA, TRANSFER_SYNTAX_UID};
use crate::dataset::{Dataset, ElementValue};
use crate::error::DcmpeekError;
use crate::extraction::{ExtractionRecord, FrameExtractor};
use crate::transfer_syntax;
use crate::types::DisplayFilter;
use log::debug;

/// One line of a file report
#[derive(Debug, Clone, PartialEq)]
pub enum ReportLine {
    /// `name: value`
    Element { name: String, value: String },
    /// Pixel Data frame written to disk
    Frame {
        name: String,
        record: ExtractionRecord,
    },
}

impl ReportLine {
    pub fn element(name: impl Into<String>, value: impl Into<String>) -> Self {
        ReportLine::Element {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ReportLine::Element { name, .. } | ReportLine::Frame { name, .. } => name,
        }
    }

    /// Text after the name
    pub fn value(&self) -> String {
        match self {
            ReportLine::Element { value, .. } => value.clone(),
            ReportLine::Frame { record, .. } => record.to_string(),
        }
    }
}

/// Report lines and contained errors of one inspected dataset
#[derive(Debug, Default)]
pub struct Inspection {
    pub lines: Vec<ReportLine>,
    pub errors: Vec<DcmpeekError>,
}

/// Produces the report lines of a dataset in catalog order
pub struct DatasetInspector<'a> {
    catalog: &'a TagCatalog,
    filter: DisplayFilter,
    extractor: Option<&'a FrameExtractor>,
}

impl<'a> DatasetInspector<'a> {
    pub fn new(catalog: &'a TagCatalog, filter: DisplayFilter) -> Self {
        Self {
            catalog,
            filter,
            extractor: None,
        }
    }

    /// Enables pixel data extraction
    pub fn with_extractor(mut self, extractor: &'a FrameExtractor) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Inspects one dataset
    ///
    /// Tags of the catalog that are absent from the dataset are skipped.
    /// Pixel Data is never printed as text: it is either extracted or
    /// left out.
    pub fn inspect(&self, dataset: &Dataset) -> Inspection {
        let mut inspection = Inspection::default();
        let extract = self.extractor.is_some();

        for (name, tag) in self.catalog.entries() {
            let Some(element) = dataset.element(*tag) else {
                continue;
            };
            if !self.filter.allows(*tag, extract) {
                continue;
            }

            match (&element.value, self.extractor) {
                (ElementValue::PixelData(pixel_data), Some(extractor)) => {
                    let extraction =
                        extractor.extract(pixel_data, dataset.path(), dataset.codec_family());
                    inspection
                        .lines
                        .extend(extraction.records.into_iter().map(|record| ReportLine::Frame {
                            name: name.clone(),
                            record,
                        }));
                    inspection.errors.extend(extraction.errors);
                }
                (ElementValue::PixelData(_), None) => {}
                (value, _) if *tag == PIXEL_DATA => {
                    debug!("Pixel Data of {} holds no frames: {}", dataset.path().display(), value);
                }
                (value, _) if *tag == TRANSFER_SYNTAX_UID => {
                    let uid = value.to_string();
                    let text = match transfer_syntax::label(&uid) {
                        Some(label) => format!("{} ({})", uid, label),
                        None => uid,
                    };
                    inspection.lines.push(ReportLine::element(name.as_str(), text));
                }
                (value, _) => {
                    inspection
                        .lines
                        .push(ReportLine::element(name.as_str(), value.to_string()));
                }
            }
        }

        inspection
    }
}

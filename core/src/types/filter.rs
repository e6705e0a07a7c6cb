use crate::dataset::tags::{
    COLUMNS, PATIENT_ID, PATIENT_NAME, PIXEL_DATA, ROWS, SOP_CLASS_UID, SOP_INSTANCE_UID,
    TRANSFER_SYNTAX_UID,
};
use dicom_core::Tag;

/// Tags printed in standard (non-verbose) mode
pub const STANDARD_TAGS: [Tag; 7] = [
    SOP_CLASS_UID,
    SOP_INSTANCE_UID,
    PATIENT_NAME,
    TRANSFER_SYNTAX_UID,
    PATIENT_ID,
    COLUMNS,
    ROWS,
];

/// Which elements of a dataset end up in the report
///
/// Selected once per run and constant afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayFilter {
    /// Only the fixed allow-list in [`STANDARD_TAGS`], plus Pixel Data
    /// when extraction is requested
    #[default]
    Standard,
    /// Every tag the registry can resolve
    Verbose,
}

impl DisplayFilter {
    /// Selects the filter from the verbose flag
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            DisplayFilter::Verbose
        } else {
            DisplayFilter::Standard
        }
    }

    /// Checks whether an element with the given tag passes the filter
    ///
    /// Pixel Data passes only when extraction is requested, whatever
    /// the filter: its raw content is never printed as text.
    pub fn allows(&self, tag: Tag, extract: bool) -> bool {
        if tag == PIXEL_DATA {
            return extract;
        }
        match self {
            DisplayFilter::Verbose => true,
            DisplayFilter::Standard => STANDARD_TAGS.contains(&tag),
        }
    }
}

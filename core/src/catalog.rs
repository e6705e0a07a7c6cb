//! Catalog of known tag names
//!
//! The catalog fixes the order in which a dataset is reported: every
//! name the standard data dictionary knows, sorted, no matter where (or
//! whether) the tag appears in a given file.

use crate::error::{DcmpeekError, Result};
use dicom_core::dictionary::{DataDictionary, DataDictionaryEntry};
use dicom_core::Tag;
use dicom_object::StandardDataDictionary;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Groups holding the attributes of the standard data dictionary
///
/// Repeating groups (50xx, 60xx) are listed by their base group only.
const STANDARD_GROUPS: &[u16] = &[
    0x0000, 0x0002, 0x0004, 0x0006, 0x0008, 0x0010, 0x0012, 0x0014, 0x0016, 0x0018, 0x0020,
    0x0022, 0x0024, 0x0028, 0x0032, 0x0034, 0x0038, 0x003A, 0x0040, 0x0042, 0x0044, 0x0046,
    0x0048, 0x0050, 0x0052, 0x0054, 0x0060, 0x0062, 0x0064, 0x0066, 0x0068, 0x006A, 0x0070,
    0x0072, 0x0074, 0x0076, 0x0078, 0x007A, 0x007C, 0x0080, 0x0082, 0x0088, 0x0100, 0x0400,
    0x1000, 0x1010, 0x2000, 0x2010, 0x2020, 0x2030, 0x2040, 0x2050, 0x2100, 0x2110, 0x2120,
    0x2130, 0x2200, 0x3002, 0x3004, 0x3006, 0x3008, 0x300A, 0x300C, 0x300E, 0x3010, 0x4000,
    0x4008, 0x4010, 0x4FFE, 0x5000, 0x5166, 0x5200, 0x5400, 0x5600, 0x6000, 0x7F00, 0x7FE0,
    0xFFFA, 0xFFFC, 0xFFFE,
];

/// Sorted list of tag names with the tag each name resolves to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagCatalog {
    entries: Vec<(String, Tag)>,
}

impl TagCatalog {
    /// Builds a catalog from (name, tag) pairs
    ///
    /// Names are sorted ascending (case-sensitive). A name listed twice
    /// keeps its first tag.
    pub fn from_entries<N: Into<String>>(entries: impl IntoIterator<Item = (N, Tag)>) -> Self {
        let mut by_name: BTreeMap<String, Tag> = BTreeMap::new();
        for (name, tag) in entries {
            by_name.entry(name.into()).or_insert(tag);
        }
        Self {
            entries: by_name.into_iter().collect(),
        }
    }

    /// The catalog of the standard data dictionary
    ///
    /// Built on first use and shared for the rest of the process.
    pub fn standard() -> &'static TagCatalog {
        static CATALOG: OnceLock<TagCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            let catalog = Self::from_entries(STANDARD_GROUPS.iter().flat_map(|&group| {
                (0..=u16::MAX).filter_map(move |element| {
                    let tag = Tag(group, element);
                    StandardDataDictionary
                        .by_tag(tag)
                        .map(|entry| (entry.alias().to_string(), tag))
                })
            }));
            log::debug!("Tag catalog holds {} names", catalog.len());
            catalog
        })
    }

    /// All tag names, sorted ascending
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// All (name, tag) pairs in name order
    pub fn entries(&self) -> &[(String, Tag)] {
        &self.entries
    }

    /// Resolves a name to its tag
    pub fn tag(&self, name: &str) -> Option<Tag> {
        self.entries
            .binary_search_by(|(n, _)| n.as_str().cmp(name))
            .ok()
            .map(|i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All known tag names of the standard dictionary, sorted ascending
pub fn all_tag_names() -> Vec<String> {
    TagCatalog::standard().names().map(str::to_string).collect()
}

/// Resolves a tag to its name in the standard data dictionary
///
/// # Errors
///
/// Returns a tag resolution error for tags without a dictionary entry,
/// typically private attributes.
pub fn tag_name(tag: Tag) -> Result<&'static str> {
    StandardDataDictionary
        .by_tag(tag)
        .map(|entry| entry.alias)
        .ok_or(DcmpeekError::TagResolution(tag))
}

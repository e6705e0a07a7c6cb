//! Transfer syntax classification
//!
//! Maps a transfer syntax UID to the codec family of its pixel data.
//! The tables are immutable; lookups are exact string matches.

use crate::types::CodecFamily;

/// A known transfer syntax: UID and human readable label
pub type TransferSyntaxEntry = (&'static str, &'static str);

pub const JPEG_TRANSFER_SYNTAXES: &[TransferSyntaxEntry] = &[
    ("1.2.840.10008.1.2.4.50", "JPEG Baseline (Process 1)"),
    ("1.2.840.10008.1.2.4.51", "JPEG Baseline (Processes 2 & 4)"),
    ("1.2.840.10008.1.2.4.52", "JPEG Extended (Processes 3 & 5) Retired"),
    (
        "1.2.840.10008.1.2.4.53",
        "JPEG Spectral Selection, Nonhierarchical (Processes 6 & 8) Retired",
    ),
    (
        "1.2.840.10008.1.2.4.54",
        "JPEG Spectral Selection, Nonhierarchical (Processes 7 & 9) Retired",
    ),
    (
        "1.2.840.10008.1.2.4.55",
        "JPEG Full Progression, Nonhierarchical (Processes 10 & 12) Retired",
    ),
    (
        "1.2.840.10008.1.2.4.56",
        "JPEG Full Progression, Nonhierarchical (Processes 11 & 13) Retired",
    ),
    ("1.2.840.10008.1.2.4.57", "JPEG Lossless, Nonhierarchical (Processes 14)"),
    (
        "1.2.840.10008.1.2.4.58",
        "JPEG Lossless, Nonhierarchical (Processes 15) Retired",
    ),
    (
        "1.2.840.10008.1.2.4.59",
        "JPEG Extended, Hierarchical (Processes 16 & 18) Retired",
    ),
    (
        "1.2.840.10008.1.2.4.60",
        "JPEG Extended, Hierarchical (Processes 17 & 19) Retired",
    ),
    (
        "1.2.840.10008.1.2.4.61",
        "JPEG Spectral Selection, Hierarchical (Processes 20 & 22) Retired",
    ),
    (
        "1.2.840.10008.1.2.4.62",
        "JPEG Spectral Selection, Hierarchical (Processes 21 & 23) Retired",
    ),
    (
        "1.2.840.10008.1.2.4.63",
        "JPEG Full Progression, Hierarchical (Processes 24 & 26) Retired",
    ),
    (
        "1.2.840.10008.1.2.4.64",
        "JPEG Full Progression, Hierarchical (Processes 25 & 27) Retired",
    ),
    (
        "1.2.840.10008.1.2.4.65",
        "JPEG Lossless, Nonhierarchical (Process 28) Retired",
    ),
    (
        "1.2.840.10008.1.2.4.66",
        "JPEG Lossless, Nonhierarchical (Process 29) Retired",
    ),
    (
        "1.2.840.10008.1.2.4.70",
        "JPEG Lossless, Nonhierarchical, First-Order Prediction",
    ),
    ("1.2.840.10008.1.2.4.80", "JPEG-LS Lossless Image Compression"),
    (
        "1.2.840.10008.1.2.4.81",
        "JPEG-LS Lossy (Near-Lossless) Image Compression",
    ),
];

pub const JPEG_2000_TRANSFER_SYNTAXES: &[TransferSyntaxEntry] = &[
    (
        "1.2.840.10008.1.2.4.90",
        "JPEG 2000 Image Compression (Lossless Only)",
    ),
    ("1.2.840.10008.1.2.4.91", "JPEG 2000 Image Compression"),
    (
        "1.2.840.10008.1.2.4.92",
        "JPEG 2000 Part 2 Multicomponent Image Compression (Lossless Only)",
    ),
    (
        "1.2.840.10008.1.2.4.93",
        "JPEG 2000 Part 2 Multicomponent Image Compression",
    ),
    ("1.2.840.10008.1.2.4.94", "JPIP Referenced"),
    ("1.2.840.10008.1.2.4.95", "JPIP Referenced Deflate"),
];

pub const MPEG_TRANSFER_SYNTAXES: &[TransferSyntaxEntry] = &[
    ("1.2.840.10008.1.2.4.100", "MPEG2 Main Profile Main Level"),
    (
        "1.2.840.10008.1.2.4.102",
        "MPEG-4 AVC/H.264 High Profile / Level 4.1",
    ),
    (
        "1.2.840.10008.1.2.4.103",
        "MPEG-4 AVC/H.264 BD-compatible High Profile / Level 4.1",
    ),
];

const TABLES: [(CodecFamily, &[TransferSyntaxEntry]); 3] = [
    (CodecFamily::Jpeg, JPEG_TRANSFER_SYNTAXES),
    (CodecFamily::Jpeg2000, JPEG_2000_TRANSFER_SYNTAXES),
    (CodecFamily::Mpeg, MPEG_TRANSFER_SYNTAXES),
];

/// Looks up a transfer syntax UID in the codec tables
///
/// Trailing NUL and space padding from the DICOM encoding is ignored.
/// Returns `None` for transfer syntaxes outside the three codec families.
pub fn lookup(uid: &str) -> Option<(CodecFamily, &'static str)> {
    let uid = trim_uid(uid);
    TABLES.iter().find_map(|(family, table)| {
        table
            .iter()
            .find(|(known, _)| *known == uid)
            .map(|(_, label)| (*family, *label))
    })
}

/// Classifies a transfer syntax UID
///
/// Never fails: unknown UIDs, including the uncompressed ones, are
/// [`CodecFamily::Other`].
///
/// ```
/// use dcmpeek_core::transfer_syntax::classify;
/// use dcmpeek_core::CodecFamily;
///
/// assert_eq!(classify("1.2.840.10008.1.2.4.50"), CodecFamily::Jpeg);
/// assert_eq!(classify("1.2.840.10008.1.2.1"), CodecFamily::Other);
/// ```
pub fn classify(uid: &str) -> CodecFamily {
    lookup(uid)
        .map(|(family, _)| family)
        .unwrap_or(CodecFamily::Other)
}

/// Human readable label of a transfer syntax in the codec tables
pub fn label(uid: &str) -> Option<&'static str> {
    lookup(uid).map(|(_, label)| label)
}

/// Classifies a UID that is known to be in the codec tables
///
/// # Panics
///
/// Panics if the UID is in none of the tables. A miss here means the
/// tables are out of sync with the caller, which is a bug.
pub fn classify_known(uid: &str) -> CodecFamily {
    match lookup(uid) {
        Some((family, _)) => family,
        None => panic!("transfer syntax {:?} is missing from the codec tables", uid),
    }
}

fn trim_uid(uid: &str) -> &str {
    uid.trim_end_matches(&['\0', ' '][..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn test_every_table_entry_classifies_to_its_family() {
        for (family, table) in TABLES {
            for (uid, _) in table {
                assert_eq!(classify(uid), family, "{}", uid);
                assert_eq!(classify_known(uid), family, "{}", uid);
            }
        }
    }

    #[test]
    fn test_uids_are_unique_across_tables() {
        let mut seen = HashSet::new();
        for (_, table) in TABLES {
            for (uid, _) in table {
                assert!(seen.insert(*uid), "duplicate uid {}", uid);
            }
        }
        assert_eq!(seen.len(), 29);
    }

    #[rstest]
    #[case("1.2.840.10008.1.2", CodecFamily::Other)]
    #[case("1.2.840.10008.1.2.1", CodecFamily::Other)]
    #[case("1.2.840.10008.1.2.5", CodecFamily::Other)]
    #[case("1.2.840.10008.1.2.4.50\0", CodecFamily::Jpeg)]
    #[case("1.2.840.10008.1.2.4.91 ", CodecFamily::Jpeg2000)]
    #[case("1.2.840.10008.1.2.4.102", CodecFamily::Mpeg)]
    #[case("", CodecFamily::Other)]
    fn test_classify(#[case] uid: &str, #[case] expected: CodecFamily) {
        assert_eq!(classify(uid), expected);
    }

    #[test]
    fn test_match_is_exact_not_prefix() {
        // a prefix of a JPEG 2000 UID
        assert_eq!(classify("1.2.840.10008.1.2.4.9"), CodecFamily::Other);
        assert_eq!(classify("1.2.840.10008.1.2.4.500"), CodecFamily::Other);
    }

    #[test]
    fn test_label() {
        assert_eq!(
            label("1.2.840.10008.1.2.4.70"),
            Some("JPEG Lossless, Nonhierarchical, First-Order Prediction")
        );
        assert_eq!(label("1.2.840.10008.1.2.1"), None);
    }

    #[test]
    #[should_panic(expected = "missing from the codec tables")]
    fn test_classify_known_panics_on_unknown_uid() {
        classify_known("1.2.840.10008.1.2.1");
    }
}

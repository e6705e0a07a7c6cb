//! Tag name search
//!
//! Scans the elements actually present in a dataset and keeps those whose
//! tag name matches a case-insensitive regular expression.

use crate::catalog::tag_name;
use crate::dataset::Dataset;
use crate::error::DcmpeekError;
use crate::inspect::{Inspection, ReportLine};
use log::warn;
use regex::Regex;

/// Searches a dataset for tag names matching `pattern`
///
/// `pattern` must already be the compiled case-insensitive expression
/// (see [`InspectOptions::search_regex`](crate::InspectOptions::search_regex)).
/// Elements whose tag has no dictionary entry are recorded as errors and
/// skipped, the scan carries on with the next element.
pub fn search(dataset: &Dataset, pattern: &Regex) -> Inspection {
    let mut inspection = Inspection::default();

    for element in dataset.elements() {
        let name = match tag_name(element.tag) {
            Ok(name) => name,
            Err(e) => {
                warn!("{}: {}", dataset.path().display(), e);
                inspection.errors.push(e);
                continue;
            }
        };

        if pattern.is_match(name) {
            inspection
                .lines
                .push(ReportLine::element(name, element.value.to_string()));
        }
    }

    inspection
}

/// Compiles a search pattern the way the command line does
pub fn compile(pattern: &str) -> Result<Regex, DcmpeekError> {
    Ok(Regex::new(&format!("(?i){}", pattern))?)
}

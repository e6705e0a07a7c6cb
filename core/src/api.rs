use crate::catalog::TagCatalog;
use crate::dataset::Dataset;
use crate::error::{DcmpeekError, Result};
use crate::extraction::FrameExtractor;
use crate::inspect::{DatasetInspector, Inspection, ReportLine};
use crate::search::search;
use crate::types::InspectOptions;
use crate::walk::walk_files;
use log::{error, info};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Main entry point for inspecting DICOM files
///
/// Owns the validated run configuration and processes one file at a
/// time: decode, then either search or inspect (and extract).
///
/// # Example
///
/// ```
/// use dcmpeek_core::dataset::{tags, Dataset, Element};
/// use dcmpeek_core::{FileProcessor, InspectOptions};
/// use dicom_core::VR;
///
/// let processor = FileProcessor::new(InspectOptions::default()).unwrap();
///
/// let dataset = Dataset::from_elements(
///     "ct.dcm",
///     [
///         Element::scalar(tags::PATIENT_NAME, VR::PN, "Doe^John"),
///         Element::scalar(tags::MODALITY, VR::CS, "CT"),
///     ],
/// );
///
/// let report = processor.process_dataset(&dataset);
///
/// // standard mode: Modality is not reported
/// assert_eq!(report.lines.len(), 1);
/// assert_eq!(report.lines[0].name(), "PatientName");
/// ```
pub struct FileProcessor {
    options: InspectOptions,
    search: Option<Regex>,
    extractor: Option<FrameExtractor>,
}

impl FileProcessor {
    /// Creates a processor from run options
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the options do not validate.
    pub fn new(options: InspectOptions) -> Result<Self> {
        options.validate()?;

        let search = options.search_regex()?;
        let extractor = options
            .extract_dir
            .as_ref()
            .filter(|_| options.extract_requested())
            .map(FrameExtractor::new);

        Ok(Self {
            options,
            search,
            extractor,
        })
    }

    pub fn options(&self) -> &InspectOptions {
        &self.options
    }

    /// Decodes and reports a single file
    ///
    /// Pixel data is only read when frames are extracted.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the file cannot be read as DICOM.
    /// Errors on single tags or frames end up in the report instead.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<FileReport> {
        let dataset = Dataset::open(path, self.extractor.is_some())?;
        Ok(self.process_dataset(&dataset))
    }

    /// Reports an already decoded dataset
    pub fn process_dataset(&self, dataset: &Dataset) -> FileReport {
        let inspection = match &self.search {
            Some(pattern) => search(dataset, pattern),
            None => {
                let mut inspector =
                    DatasetInspector::new(TagCatalog::standard(), self.options.filter);
                if let Some(extractor) = &self.extractor {
                    inspector = inspector.with_extractor(extractor);
                }
                inspector.inspect(dataset)
            }
        };

        FileReport::new(dataset.path(), inspection)
    }

    /// Processes every file below `root`
    ///
    /// Each regular file gets its own report, handed to `on_report` as soon
    /// as it is done, including files that failed to decode. A failing file
    /// never stops the run. Directories and symbolic links are skipped.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `root` cannot be accessed.
    pub fn run<F>(&self, root: &Path, recursive: bool, mut on_report: F) -> Result<RunSummary>
    where
        F: FnMut(&FileReport),
    {
        let mut summary = RunSummary::default();

        walk_files(root, recursive, |path, metadata| {
            if !metadata.is_file() {
                return Ok(());
            }

            let report = match self.process_file(path) {
                Ok(report) => {
                    summary.processed += 1;
                    summary.element_errors += report.errors.len();
                    report
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    error!("{}", e);
                    summary.failed += 1;
                    FileReport::failed(path, e)
                }
            };

            on_report(&report);
            Ok(())
        })?;

        info!(
            "Processed {} files, {} failed",
            summary.processed, summary.failed
        );
        Ok(summary)
    }
}

/// Report of one processed file
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub lines: Vec<ReportLine>,
    /// Errors contained while processing the file
    pub errors: Vec<DcmpeekError>,
    /// Whether the file could be decoded at all
    pub decoded: bool,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>, inspection: Inspection) -> Self {
        Self {
            path: path.into(),
            lines: inspection.lines,
            errors: inspection.errors,
            decoded: true,
        }
    }

    /// Report of a file that could not be decoded
    pub fn failed(path: impl Into<PathBuf>, error: DcmpeekError) -> Self {
        Self {
            path: path.into(),
            lines: Vec::new(),
            errors: vec![error],
            decoded: false,
        }
    }
}

/// Totals of a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files decoded and reported
    pub processed: usize,
    /// Files that could not be decoded
    pub failed: usize,
    /// Tag and frame errors contained inside processed files
    pub element_errors: usize,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

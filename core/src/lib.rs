pub mod api;
pub mod catalog;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod extraction;
pub mod inspect;
pub mod search;
pub mod transfer_syntax;
pub mod types;
pub mod walk;

pub use api::{FileProcessor, FileReport, RunSummary};
pub use catalog::TagCatalog;
pub use cli::report::TextReport;
pub use dataset::Dataset;
pub use error::{DcmpeekError, Result};
pub use extraction::{ExtractionRecord, FrameExtractor};
pub use inspect::{DatasetInspector, ReportLine};
pub use types::*;

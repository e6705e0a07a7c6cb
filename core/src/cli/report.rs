use crate::api::FileReport;
use std::fmt;

/// Text report of one processed file
///
/// The file path comes first, then one line per reported element, then any
/// contained errors, then a blank line.
pub struct TextReport<'a> {
    report: &'a FileReport,
    compact: bool,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report; `compact` prints values without names
    pub fn new(report: &'a FileReport, compact: bool) -> Self {
        Self { report, compact }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.report.path.display())?;

        for line in &self.report.lines {
            if self.compact {
                writeln!(f, "{}", line.value())?;
            } else {
                writeln!(f, "{:<25}: {}", line.name(), line.value())?;
            }
        }

        for error in &self.report.errors {
            writeln!(f, "error: {}", error)?;
        }

        writeln!(f)
    }
}

/// Serializes one file report as a single JSON object
#[cfg(feature = "json")]
pub fn to_json(report: &FileReport) -> Result<String, serde_json::Error> {
    use crate::inspect::ReportLine;
    use serde::Serialize;

    #[derive(Serialize)]
    struct ReportJson<'a> {
        path: String,
        lines: Vec<LineJson<'a>>,
        frames: Vec<FrameJson<'a>>,
        errors: Vec<String>,
    }

    #[derive(Serialize)]
    struct LineJson<'a> {
        name: &'a str,
        value: &'a str,
    }

    #[derive(Serialize)]
    struct FrameJson<'a> {
        index: usize,
        mime: &'a str,
        path: String,
        width: Option<u32>,
        height: Option<u32>,
    }

    let mut output = ReportJson {
        path: report.path.display().to_string(),
        lines: Vec::new(),
        frames: Vec::new(),
        errors: report.errors.iter().map(|e| e.to_string()).collect(),
    };

    for line in &report.lines {
        match line {
            ReportLine::Element { name, value } => output.lines.push(LineJson { name, value }),
            ReportLine::Frame { record, .. } => output.frames.push(FrameJson {
                index: record.index,
                mime: record.format.mime_type(),
                path: record.path.display().to_string(),
                width: record.dimensions.map(|(w, _)| w),
                height: record.dimensions.map(|(_, h)| h),
            }),
        }
    }

    serde_json::to_string(&output)
}

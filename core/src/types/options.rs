use super::DisplayFilter;
use crate::error::{DcmpeekError, Result};
use crate::search;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Run configuration for inspecting DICOM files
///
/// # Example
///
/// ```
/// use dcmpeek_core::{DisplayFilter, InspectOptions};
///
/// let options = InspectOptions::default()
///     .with_search("^patient")
///     .with_compact_output(true);
///
/// assert!(options.is_search());
/// assert_eq!(options.filter, DisplayFilter::Standard);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectOptions {
    /// Regular expression matched case-insensitively against tag names.
    /// Empty disables search mode.
    pub search: String,

    /// Directory receiving extracted pixel data frames
    pub extract_dir: Option<PathBuf>,

    /// Standard or verbose tag selection
    pub filter: DisplayFilter,

    /// Print values only, without the padded tag name
    pub compact_output: bool,
}

impl InspectOptions {
    pub fn with_search(mut self, pattern: impl Into<String>) -> Self {
        self.search = pattern.into();
        self
    }

    pub fn with_extract_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extract_dir = Some(dir.into());
        self
    }

    pub fn with_filter(mut self, filter: DisplayFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_compact_output(mut self, compact: bool) -> Self {
        self.compact_output = compact;
        self
    }

    /// Search mode replaces inspection and extraction entirely
    pub fn is_search(&self) -> bool {
        !self.search.is_empty()
    }

    /// Whether pixel data frames are extracted
    pub fn extract_requested(&self) -> bool {
        !self.is_search() && self.extract_dir.is_some()
    }

    /// Compiles the case-insensitive search expression
    ///
    /// The pattern is used as-is, so regex metacharacters keep their meaning.
    pub fn search_regex(&self) -> Result<Option<Regex>> {
        if !self.is_search() {
            return Ok(None);
        }
        search::compile(&self.search).map(Some)
    }

    /// Validates the configuration once, before any file is processed
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - The search pattern is not a valid regular expression
    /// - The extraction directory cannot be created or is not writable
    pub fn validate(&self) -> Result<()> {
        self.search_regex()?;

        if let Some(dir) = self.extract_dir.as_deref().filter(|_| self.extract_requested()) {
            ensure_writable_dir(dir)?;
        }

        Ok(())
    }
}

fn ensure_writable_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| {
        DcmpeekError::Configuration(format!("cannot create {}: {}", dir.display(), e))
    })?;

    let metadata = fs::metadata(dir).map_err(|e| {
        DcmpeekError::Configuration(format!("cannot access {}: {}", dir.display(), e))
    })?;

    if !metadata.is_dir() {
        return Err(DcmpeekError::Configuration(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    // mode bits say nothing about who owns the directory
    tempfile::tempfile_in(dir).map_err(|e| {
        DcmpeekError::Configuration(format!("{} is not writable: {}", dir.display(), e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_search_disables_extraction() {
        let options = InspectOptions::default()
            .with_extract_dir("/tmp/frames")
            .with_search("Patient");
        assert!(options.is_search());
        assert!(!options.extract_requested());
    }

    #[test]
    fn test_search_regex_is_case_insensitive() {
        let options = InspectOptions::default().with_search("^patient");
        let regex = options.search_regex().unwrap().unwrap();
        assert!(regex.is_match("PatientName"));
        assert!(!regex.is_match("OtherPatientIDs"));
    }

    #[test]
    fn test_empty_search_has_no_regex() {
        assert!(InspectOptions::default().search_regex().unwrap().is_none());
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let options = InspectOptions::default().with_search("Patient(");
        let err = options.validate().unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_validate_creates_extract_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("frames").join("nested");
        let options = InspectOptions::default().with_extract_dir(&dir);

        options.validate().unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_validate_leaves_extract_dir_empty() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("frames");
        InspectOptions::default().with_extract_dir(&dir).validate().unwrap();
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_rejects_unwritable_extract_dir() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("locked");
        fs::create_dir(&dir).unwrap();
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

        // privileged users write regardless of the mode
        let writable = fs::write(dir.join("check"), b"x").is_ok();
        let result = InspectOptions::default().with_extract_dir(&dir).validate();
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();

        if writable {
            assert!(result.is_ok());
        } else {
            assert!(matches!(result, Err(DcmpeekError::Configuration(_))));
        }
    }

    #[test]
    fn test_validate_rejects_file_as_extract_dir() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("not_a_dir");
        fs::write(&file, b"x").unwrap();

        let err = InspectOptions::default()
            .with_extract_dir(&file)
            .validate()
            .unwrap_err();
        assert!(matches!(err, DcmpeekError::Configuration(_)));
    }
}

use std::path::Path;

/// File name of an extracted frame: `<source file name>.<frame index>.<ext>`
///
/// The index keeps frames of one source apart and sorts them in encoding order.
pub fn frame_file_name(source: &Path, index: usize, extension: &str) -> String {
    let base = source
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| "frame".into());

    format!("{}.{}.{}", base, index, extension)
}

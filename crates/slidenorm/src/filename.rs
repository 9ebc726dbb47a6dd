use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// File name suffix of a tissue tile.
pub const TILE_SUFFIX: &str = ".tile.tissue.png";

/// File name suffix of a normalized tissue tile.
pub const NORMALIZED_TILE_SUFFIX: &str = ".normalized.tile.tissue.png";

/// Derive the output path of a normalized tile.
///
/// Without an explicit `out`, the `.tile.tissue.png` suffix of the input file name is
/// replaced by `.normalized.tile.tissue.png`. If `ext` is given, the extension of the
/// resulting file name is replaced by it (or appended if there is none).
///
/// The function does no I/O. A result equal to `file` means no distinct name could be
/// derived; the caller decides how to handle it.
///
/// # Example
///
/// ```
/// use std::path::{Path, PathBuf};
/// use slidenorm::filename::derive_output_path;
///
/// assert_eq!(
///     derive_output_path(Path::new("x0.y0.tile.tissue.png"), None, None),
///     PathBuf::from("x0.y0.normalized.tile.tissue.png")
/// );
/// assert_eq!(
///     derive_output_path(Path::new("input.png"), Some("ext"), None),
///     PathBuf::from("input.ext")
/// );
/// ```
pub fn derive_output_path(file: &Path, ext: Option<&str>, out: Option<&Path>) -> PathBuf {
    let output = match out {
        Some(out) => out.to_path_buf(),
        None => insert_normalized_marker(file),
    };

    match ext {
        Some(ext) => replace_extension(&output, ext.trim_start_matches('.')),
        None => output,
    }
}

fn insert_normalized_marker(file: &Path) -> PathBuf {
    match file.file_name().and_then(|name| name.to_str()) {
        Some(name) if name.contains(TILE_SUFFIX) => {
            file.with_file_name(name.replace(TILE_SUFFIX, NORMALIZED_TILE_SUFFIX))
        }
        _ => file.to_path_buf(),
    }
}

/// Strip everything after the last `.` of the file name and append `ext`.
///
/// Works on the `OsStr` of the file name, so names that are not valid UTF-8 are kept intact.
fn replace_extension(path: &Path, ext: &str) -> PathBuf {
    let name = path.file_name().unwrap_or_default();
    let stem = match name.as_encoded_bytes().iter().rposition(|&b| b == b'.') {
        // a lone leading dot is part of the stem for `file_stem`
        Some(0) => OsStr::new(""),
        _ => path.file_stem().unwrap_or_default(),
    };

    let mut new_name = stem.to_os_string();
    new_name.push(".");
    new_name.push(ext);
    path.with_file_name(new_name)
}

#[cfg(test)]
mod tests {
    use super::derive_output_path;
    use std::path::{Path, PathBuf};

    fn derive(file: &str, ext: Option<&str>, out: Option<&str>) -> PathBuf {
        derive_output_path(Path::new(file), ext, out.map(Path::new))
    }

    #[test]
    fn test_extension_override() {
        assert_eq!(derive("input", Some("ext"), None), PathBuf::from("input.ext"));
        assert_eq!(
            derive("input.png", Some("ext"), None),
            PathBuf::from("input.ext")
        );
    }

    #[test]
    fn test_default_marker() {
        assert_eq!(
            derive("x0.y0.tile.tissue.png", None, None),
            PathBuf::from("x0.y0.normalized.tile.tissue.png")
        );
        assert_eq!(
            derive("slides/s1/x0.y0.tile.tissue.png", None, None),
            PathBuf::from("slides/s1/x0.y0.normalized.tile.tissue.png")
        );
    }

    #[test]
    fn test_marker_then_extension() {
        assert_eq!(
            derive("x0.y0.tile.tissue.png", Some("jpg"), None),
            PathBuf::from("x0.y0.normalized.tile.tissue.jpg")
        );
    }

    #[test]
    fn test_no_marker_keeps_input() {
        assert_eq!(derive("input.png", None, None), PathBuf::from("input.png"));
    }

    #[test]
    fn test_explicit_out() {
        assert_eq!(
            derive("x0.y0.tile.tissue.png", None, Some("out/tile.png")),
            PathBuf::from("out/tile.png")
        );
        assert_eq!(
            derive("x0.y0.tile.tissue.png", Some("tif"), Some("out/tile.png")),
            PathBuf::from("out/tile.tif")
        );
    }

    #[test]
    fn test_dotted_directory_is_kept() {
        assert_eq!(
            derive("./run.2024/input", Some("png"), None),
            PathBuf::from("./run.2024/input.png")
        );
    }

    #[test]
    fn test_leading_dot_in_extension() {
        assert_eq!(
            derive("input.png", Some(".jpg"), None),
            derive("input.png", Some("jpg"), None)
        );
    }

    #[test]
    fn test_leading_dot_name() {
        assert_eq!(derive(".png", Some("jpg"), None), PathBuf::from(".jpg"));
        assert_eq!(derive("tile.", Some("jpg"), None), PathBuf::from("tile.jpg"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_is_kept() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let file = Path::new(OsStr::from_bytes(b"tiles/x\xff0.png"));
        assert_eq!(
            derive_output_path(file, Some("jpg"), None),
            Path::new(OsStr::from_bytes(b"tiles/x\xff0.jpg"))
        );

        // no marker can be inserted, the input path comes back untouched
        let file = Path::new(OsStr::from_bytes(b"x\xff0.tile.tissue.png"));
        assert_eq!(derive_output_path(file, None, None), file);
    }
}

use std::path::{Path, PathBuf};

const UPDATED_SUFFIX: &str = "_updated.json";

/// Output path for an input file: its basename with a trailing `.json`
/// turned into `_updated.json`.
///
/// The directory prefix is dropped, so the result is relative to the
/// current working directory. Names without a `.json` extension get
/// `_updated.json` appended, so the result never names the input itself.
pub fn derive_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let name = match input.file_name() {
        Some(name) => Path::new(name),
        None => return input.to_path_buf(),
    };

    let mut out = match (name.extension(), name.file_stem()) {
        (Some(ext), Some(stem)) if ext == "json" => stem.to_os_string(),
        _ => name.as_os_str().to_os_string(),
    };
    out.push(UPDATED_SUFFIX);
    PathBuf::from(out)
}

/// True when both paths exist and resolve to the same file.
pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_directory_prefix() {
        assert_eq!(
            derive_output_path("data/quiz_nice_15.json"),
            PathBuf::from("quiz_nice_15_updated.json")
        );
    }

    #[test]
    fn bare_file_name() {
        assert_eq!(
            derive_output_path("quiz_nice_15.json"),
            PathBuf::from("quiz_nice_15_updated.json")
        );
    }

    #[test]
    fn nested_and_absolute_inputs() {
        assert_eq!(
            derive_output_path("/srv/quizzes/fr/argot.json"),
            PathBuf::from("argot_updated.json")
        );
        assert_eq!(
            derive_output_path("./quiz.json"),
            PathBuf::from("quiz_updated.json")
        );
    }

    #[test]
    fn only_the_trailing_extension_is_rewritten() {
        assert_eq!(
            derive_output_path("quiz.json.json"),
            PathBuf::from("quiz.json_updated.json")
        );
    }

    #[test]
    fn other_extensions_never_map_onto_the_input() {
        assert_eq!(
            derive_output_path("data/quiz.txt"),
            PathBuf::from("quiz.txt_updated.json")
        );
        assert_eq!(derive_output_path("quiz"), PathBuf::from("quiz_updated.json"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_kept_byte_for_byte() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let input = Path::new(OsStr::from_bytes(b"data/quiz_\xff.json"));
        let out = derive_output_path(input);
        assert_eq!(out.as_os_str().as_bytes(), b"quiz_\xff_updated.json");
    }
}

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::error::{Result, ThemeError};
use crate::paths::{derive_output_path, same_file};

pub const DEFAULT_INPUT: &str = "quiz_nice_15.json";
pub const DEFAULT_THEME: &str = "Nice";
pub const COUNT_THEME: &str = "francais_familier";
pub const THEME_KEY: &str = "theme";

const NON_STRING_THEME: &str = "<non-string>";
const MISSING_THEME: &str = "<missing>";

/// One quiz record. Keys other than `theme` are carried through untouched.
pub type QuizItem = Map<String, Value>;

pub type QuizCollection = Vec<QuizItem>;

/// Where to read, where to write, and which theme values to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatorConfig {
    pub input: PathBuf,
    /// Explicit output path; derived from `input` when `None`
    pub output: Option<PathBuf>,
    /// Value assigned to items without a theme
    pub default_theme: String,
    /// Theme counted in the summary line
    pub count_theme: String,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: None,
            default_theme: DEFAULT_THEME.to_string(),
            count_theme: COUNT_THEME.to_string(),
        }
    }
}

impl AnnotatorConfig {
    pub fn with_input<P: Into<PathBuf>>(input: P) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| derive_output_path(&self.input))
    }
}

/// Outcome of a full load → annotate → save → summarize pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotateReport {
    pub total: usize,
    pub filled: usize,
    pub matching: usize,
    pub count_theme: String,
    pub output: PathBuf,
    /// Items per theme after annotation
    pub themes: BTreeMap<String, usize>,
}

impl fmt::Display for AnnotateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Updated {} items with theme '{}'",
            self.matching, self.count_theme
        )
    }
}

pub struct ThemeAnnotator {
    config: AnnotatorConfig,
}

impl ThemeAnnotator {
    pub fn new(config: AnnotatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// Run the whole pipeline. Nothing is written when loading fails or
    /// when the output path resolves to the input file.
    pub fn run(&self) -> Result<AnnotateReport> {
        let cfg = &self.config;

        let mut items = load(&cfg.input)?;
        info!("Loaded {} items from {}", items.len(), cfg.input.display());

        let filled = annotate(&mut items, &cfg.default_theme);
        info!("Filled {filled} items with theme {:?}", cfg.default_theme);

        let output = cfg.output_path();
        if same_file(&cfg.input, &output) {
            return Err(ThemeError::OutputIsInput { path: output });
        }
        save(&items, &output)?;
        info!("Wrote {} items to {}", items.len(), output.display());

        let matching = summarize(&items, &cfg.count_theme);

        Ok(AnnotateReport {
            total: items.len(),
            filled,
            matching,
            count_theme: cfg.count_theme.clone(),
            output,
            themes: theme_counts(&items),
        })
    }
}

/// Read `path` and check that it holds an array of objects.
pub fn load<P: AsRef<Path>>(path: P) -> Result<QuizCollection> {
    let path = path.as_ref();

    let raw = fs::read_to_string(path).map_err(|source| ThemeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let json: Value = serde_json::from_str(&raw).map_err(|source| ThemeError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let arr = match json {
        Value::Array(arr) => arr,
        other => {
            return Err(ThemeError::NotAnArray {
                path: path.to_path_buf(),
                found: json_kind(&other),
            })
        }
    };

    arr.into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(ThemeError::NotAnObject {
                path: path.to_path_buf(),
                index,
            }),
        })
        .collect()
}

/// Give every item lacking a `theme` key the default theme.
///
/// Existing values are never touched, whatever their type. Returns how many
/// items were filled.
pub fn annotate(items: &mut [QuizItem], default_theme: &str) -> usize {
    let mut filled = 0;
    for (index, item) in items.iter_mut().enumerate() {
        if !item.contains_key(THEME_KEY) {
            item.insert(
                THEME_KEY.to_string(),
                Value::String(default_theme.to_string()),
            );
            debug!("item {index}: theme set to {default_theme:?}");
            filled += 1;
        }
    }
    filled
}

/// Pretty-print `items` (2-space indent, non-ASCII kept verbatim) to `path`.
///
/// The JSON goes to a temporary file next to `path` which is then renamed
/// into place, so a failed run never leaves a truncated output.
pub fn save<P: AsRef<Path>>(items: &[QuizItem], path: P) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| ThemeError::Write {
        path: path.to_path_buf(),
        source,
    };

    let pretty = serde_json::to_vec_pretty(items).map_err(ThemeError::Serialize)?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(&pretty).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    // NamedTempFile is created 0600; the output gets a fixed 0644, umask is not applied
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Number of items whose theme is exactly `theme`.
pub fn summarize(items: &[QuizItem], theme: &str) -> usize {
    items
        .iter()
        .filter(|item| item.get(THEME_KEY).and_then(Value::as_str) == Some(theme))
        .count()
}

/// Items per theme value, sorted by theme.
pub fn theme_counts(items: &[QuizItem]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        let key = match item.get(THEME_KEY) {
            Some(Value::String(s)) => s.as_str(),
            Some(_) => NON_STRING_THEME,
            None => MISSING_THEME,
        };
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

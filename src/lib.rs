//! Fill in a default `theme` on every item of a JSON quiz file.
//!
//! ```rust,no_run
//! use quiz_theme::{AnnotatorConfig, ThemeAnnotator};
//!
//! let report = ThemeAnnotator::new(AnnotatorConfig::default()).run()?;
//! println!("{report}");
//! # Ok::<(), quiz_theme::ThemeError>(())
//! ```

mod annotator;
mod error;
mod paths;

pub use annotator::{
    annotate, load, save, summarize, theme_counts, AnnotateReport, AnnotatorConfig,
    QuizCollection, QuizItem, ThemeAnnotator, COUNT_THEME, DEFAULT_INPUT, DEFAULT_THEME,
    THEME_KEY,
};
pub use error::{Result, ThemeError};
pub use paths::derive_output_path;

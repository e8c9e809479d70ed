//! Widget tree error types.

use thiserror::Error;

use super::WidgetId;
use super::widget::Dock;

#[derive(Debug, Error)]
pub enum UiError {
    // -- configuration --
    #[error("relative {axis} sizes exceed a total of 1.0 (got {total})")]
    FractionsExceedOne { axis: &'static str, total: f64 },

    #[error("invalid cell size {0}: must be NaN (auto), 0..=1 (fraction) or > 1 (pixels)")]
    InvalidCellSize(f32),

    #[error("{container} accepts at most {limit} children")]
    TooManyChildren {
        container: &'static str,
        limit: usize,
    },

    #[error("invalid dock side {0:?} for this operation")]
    InvalidDock(Dock),

    #[error("column count {count} out of range 1..={max}")]
    InvalidColumnCount { count: usize, max: usize },

    #[error("invalid row pattern: {0}")]
    Regex(#[from] regex::Error),

    // -- structural --
    #[error("widget {0:?} does not exist (removed or never created)")]
    StaleWidget(WidgetId),

    #[error("widget {id:?} is not a {expected}")]
    WrongKind { id: WidgetId, expected: &'static str },

    #[error("row index {index} out of range (row count {len})")]
    RowOutOfRange { index: usize, len: usize },

    #[error("column index {index} out of range (column count {len})")]
    ColumnOutOfRange { index: usize, len: usize },

    #[error("section index {index} out of range (section count {len})")]
    SectionOutOfRange { index: usize, len: usize },

    #[error("widget {row:?} does not belong to {owner:?}")]
    ForeignWidget { row: WidgetId, owner: WidgetId },

    // -- markup --
    #[error("view parse error: {0}")]
    Parse(#[from] kdl::KdlError),

    #[error("unknown element `{0}`")]
    UnknownElement(String),

    #[error("unknown property `{property}` on `{element}`")]
    UnknownProperty { element: String, property: String },

    #[error("invalid value for `{property}`: {reason}")]
    InvalidValue { property: String, reason: String },

    #[error("unknown event handler `{0}`")]
    UnknownHandler(String),

    #[error("element `{element}` cannot be placed here: {reason}")]
    Misplaced { element: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UiError {
    /// True for errors caused by an invalid configuration (as opposed to
    /// operating on a missing or mismatched node).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            UiError::FractionsExceedOne { .. }
                | UiError::InvalidCellSize(_)
                | UiError::TooManyChildren { .. }
                | UiError::InvalidDock(_)
                | UiError::InvalidColumnCount { .. }
                | UiError::Regex(_)
                | UiError::Parse(_)
                | UiError::UnknownElement(_)
                | UiError::UnknownProperty { .. }
                | UiError::InvalidValue { .. }
                | UiError::UnknownHandler(_)
                | UiError::Misplaced { .. }
        )
    }
}

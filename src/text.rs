/// Column geometry and the compiled-in layout presets.
pub mod config;
/// Flowing wrapped lines into columns.
pub mod fit;
/// Linear font-size search.
pub mod search;
/// Greedy word wrapping.
pub mod wrap;

pub use config::{
    LayoutConfig, MIN_FONT_SIZE, Perspective, SecondColumn, SingleColumnConfig, TwoColumnConfig,
};
pub use fit::{ColumnFit, FitAttempt, PlacedLine, TextFitter, fit_column};
pub use search::SearchOutcome;
pub use wrap::{WordWrap, WrappedLine, wrap_text};

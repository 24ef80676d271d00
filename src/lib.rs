//! # Edict
//!
//! Sets free-form text onto a template image inside one or two skewed
//! columns, shrinking the font until everything fits, and exports the
//! composite as PNG.
//!
//! ## Overview
//!
//! The layout is described by a [`TextFitter`]: a list of column geometries
//! plus an initial font size. Text is word-wrapped into the first column;
//! whatever does not fit flows into the next column, and if the last column
//! overflows the font size is reduced one pixel at a time down to a floor of
//! 5px. The [`Generator`] ties this to fonts and draws the final frame.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use edict::{Assets, Generator, TextStyle, text::TwoColumnConfig};
//!
//! let generator = Generator::new(TwoColumnConfig::EXECUTIVE_ORDER.into(), TextStyle::default());
//! generator.load_system_fonts();
//! generator.select_style_family()?;
//!
//! let assets = Assets::load("base.jpg".as_ref(), "overlay.png".as_ref())?;
//! if let Some(frame) = generator.render(&assets, "We the people") {
//!     edict::export::save_png(&frame.image, "executive-order.png".as_ref())?;
//! }
//! # Ok::<(), edict::Error>(())
//! ```
//!
//! Layouts do not need real fonts: anything implementing
//! [`typeface::TextMeasure`] can drive the search, and
//! [`typeface::BlockTypeface`] renders deterministic placeholder boxes.

pub mod error;
pub mod export;
pub mod font_storage;
pub mod generator;
pub mod renderer;
pub mod state;
pub mod text;
pub mod typeface;

// common re-exports
pub use error::{Error, Result};
pub use font_storage::FontStorage;
pub use generator::Generator;
pub use renderer::{Frame, TextStyle};
pub use state::{Assets, RenderState};
pub use text::{FitAttempt, SearchOutcome, TextFitter};

// re-export dependencies
pub use fontdb;
pub use fontdue;
pub use image;

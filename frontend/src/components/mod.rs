//! UI Components for the search-check application.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - spreadsheet picker and submit button
//! - [`StatusPanel`] - inline status, loading indicator, submitted rows
//! - [`ResultsSection`] - live results table, loop counter, report button

mod footer;
mod hero;
mod results;
mod status_panel;
mod upload;

pub use footer::*;
pub use hero::*;
pub use results::*;
pub use status_panel::*;
pub use upload::*;

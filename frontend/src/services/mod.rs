//! Backend communication and browser-side services.
//!
//! # Services
//!
//! - [`workbook`] - client-side parsing of the uploaded spreadsheet
//! - [`api`] - submit and progress calls to the processing backend
//! - [`poller`] - the per-run progress polling controller
//! - [`report`] - xlsx export of the rendered results table

pub mod api;
pub mod poller;
pub mod report;
pub mod workbook;

pub use api::*;
pub use poller::*;
pub use report::*;
pub use workbook::*;

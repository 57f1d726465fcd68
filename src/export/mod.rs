//! Export module for saving rendered frames.

mod png;

pub use png::{export_frame_png, PngExportError, PngExportOptions};

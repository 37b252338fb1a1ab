//! wordshot - render styled text to PNG images
//!
//! Text is styled by declarative regex rules, rendered onto a surface and
//! captured as an image. With a word list, a template containing a
//! placeholder is captured once per word and the images are zipped.

pub mod archive;
pub mod config;
pub mod error;
pub mod export;
pub mod placeholder;
pub mod preview;
pub mod raster;
pub mod style;
pub mod words;

pub use error::{CaptureError, Result, WordshotError};

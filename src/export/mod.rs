//! Rendering templates and exporting them as images
//!
//! - [`Renderer`]: text and style rules to renderable content
//! - [`RenderSurface`]: the external surface content is drawn on and captured from
//! - [`Exporter`]: the single-image and batch export state machine

mod cancel;
mod orchestrator;
mod render;
mod surface;

pub use cancel::CancellationToken;
pub use orchestrator::{
    select_mode, BatchReport, ExportMode, ExportRequest, ExportResult, ExportSettings,
    ExportState, Exporter, ItemFailure,
};
pub use render::Renderer;
pub use surface::{CaptureOptions, RenderSurface, RenderedContent, SurfaceGuard};

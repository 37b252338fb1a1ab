//! The visual surface that content is rendered onto and captured from

use std::ops::{Deref, DerefMut};

use crate::error::CaptureError;
use crate::style::{StyleDeclaration, StyledRun};

/// Content ready to be drawn: styled runs over a base style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    pub runs: Vec<StyledRun>,
    /// Style every run starts from before its own declaration is merged in
    pub base: StyleDeclaration,
}

impl RenderedContent {
    /// Content made of a single unstyled run
    pub fn plain(text: &str, base: StyleDeclaration) -> Self {
        Self {
            runs: vec![StyledRun::plain(text, 0..text.len())],
            base,
        }
    }

    /// The text all runs spell out
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Parameters handed to the capture step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    /// Device pixel ratio of the captured image
    pub scale: f32,
    /// Fixed width in CSS pixels, or None to fit the content
    pub width: Option<u32>,
    /// Fixed height in CSS pixels, or None to fit the content
    pub height: Option<u32>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            width: None,
            height: None,
        }
    }
}

/// A mutable visual surface shared by every render/capture cycle
///
/// Only one render may be on the surface at a time, so callers drive it
/// strictly sequentially.
pub trait RenderSurface {
    /// Whatever `prepare_capture` changed, so it can be put back
    type Snapshot;

    /// Neutralize anything that would clip or tint a capture
    fn prepare_capture(&mut self) -> Self::Snapshot;

    /// Undo `prepare_capture`
    fn restore(&mut self, snapshot: Self::Snapshot);

    /// Replace the displayed content
    fn render(&mut self, content: &RenderedContent);

    /// Turn the displayed content into encoded image bytes
    fn capture(&mut self, options: &CaptureOptions) -> Result<Vec<u8>, CaptureError>;
}

/// Holds a surface in capture mode until dropped
///
/// Dropping the guard re-renders the original content (if any) and restores
/// the surface, whichever way the export ends.
pub struct SurfaceGuard<'s, S: RenderSurface> {
    surface: &'s mut S,
    snapshot: Option<S::Snapshot>,
    original: Option<RenderedContent>,
}

impl<'s, S: RenderSurface> SurfaceGuard<'s, S> {
    pub fn new(surface: &'s mut S, original: Option<RenderedContent>) -> Self {
        let snapshot = surface.prepare_capture();
        Self {
            surface,
            snapshot: Some(snapshot),
            original,
        }
    }
}

impl<S: RenderSurface> Deref for SurfaceGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: RenderSurface> DerefMut for SurfaceGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: RenderSurface> Drop for SurfaceGuard<'_, S> {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            self.surface.render(&original);
        }
        if let Some(snapshot) = self.snapshot.take() {
            self.surface.restore(snapshot);
        }
    }
}

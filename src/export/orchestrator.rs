//! Export orchestration
//!
//! An export either captures the template once (single mode) or, when the
//! template carries the placeholder marker and a word list is supplied,
//! captures one image per word and packages them (batch mode).
//!
//! Batch items run strictly one after another on the shared surface. Between
//! rendering an item and capturing it the exporter yields to the scheduler so
//! the render is complete before the capture observes it.

use log::{debug, info, warn};

use super::cancel::CancellationToken;
use super::render::Renderer;
use super::surface::{CaptureOptions, RenderSurface, SurfaceGuard};
use crate::archive::{ArchiveBuilder, ArchiveEntry, DEFAULT_FOLDER};
use crate::config::Config;
use crate::error::{Result, WordshotError};
use crate::placeholder::{expand_all, validate_marker, DEFAULT_MARKER};
use crate::style::StyleDeclaration;

/// Settings fixed for the lifetime of an exporter
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub marker: String,
    pub capture: CaptureOptions,
    /// Folder inside the archive holding the images
    pub archive_folder: String,
    /// File name of a single-mode export
    pub single_name: String,
    /// File name of a batch-mode archive
    pub archive_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            capture: CaptureOptions::default(),
            archive_folder: DEFAULT_FOLDER.to_string(),
            single_name: "content.png".to_string(),
            archive_name: "content_images.zip".to_string(),
        }
    }
}

impl ExportSettings {
    /// Build settings from configuration, rejecting an unusable marker
    pub fn from_config(config: &Config) -> Result<Self> {
        validate_marker(&config.marker)?;
        Ok(Self {
            marker: config.marker.clone(),
            capture: CaptureOptions {
                scale: config.scale,
                width: config.width,
                height: config.height,
            },
            archive_folder: config.archive_folder.clone(),
            single_name: config.single_name.clone(),
            archive_name: config.archive_name.clone(),
        })
    }
}

/// What an export will produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    Single,
    Batch,
}

/// Decide the mode: batch only when the marker is present and terms exist
pub fn select_mode(template: &str, marker: &str, terms: &[String]) -> ExportMode {
    if !marker.is_empty() && template.contains(marker) && !terms.is_empty() {
        ExportMode::Batch
    } else {
        ExportMode::Single
    }
}

/// Where an exporter is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Preparing,
    Single,
    /// Working on item `index` of `total`
    Batch { index: usize, total: usize },
    Done,
    Failed,
}

/// Input of one export
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    /// Text to render, possibly containing the marker
    pub template: &'a str,
    /// Style-rule document, if any
    pub rules: Option<&'a str>,
    /// Normalized word list
    pub terms: &'a [String],
    pub base_style: &'a StyleDeclaration,
}

/// A batch item whose capture failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub key: String,
    pub error: String,
}

/// Outcome of a batch export
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// File name for the archive
    pub name: String,
    /// Successfully captured images, in word-list order
    pub entries: Vec<ArchiveEntry>,
    /// Encoded archive holding `entries`
    pub archive: Vec<u8>,
    pub failures: Vec<ItemFailure>,
    /// Whether the batch stopped early on request
    pub cancelled: bool,
}

/// Result of a finished export
#[derive(Debug, Clone)]
pub enum ExportResult {
    Single { name: String, image: Vec<u8> },
    Archive(BatchReport),
}

impl ExportResult {
    /// File name the result should be saved under
    pub fn file_name(&self) -> &str {
        match self {
            ExportResult::Single { name, .. } => name,
            ExportResult::Archive(report) => &report.name,
        }
    }

    /// Bytes to save
    pub fn bytes(&self) -> &[u8] {
        match self {
            ExportResult::Single { image, .. } => image,
            ExportResult::Archive(report) => &report.archive,
        }
    }
}

/// Drives render, capture and packaging for export requests
pub struct Exporter {
    settings: ExportSettings,
    cancel: CancellationToken,
    state: ExportState,
}

impl Exporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            settings,
            cancel: CancellationToken::new(),
            state: ExportState::Idle,
        }
    }

    /// Token that stops a running batch between items
    ///
    /// A request applies to the export that observes it and is cleared when
    /// that export ends.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    fn transition(&mut self, state: ExportState) {
        debug!("Export state {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// Run one export against a surface
    pub async fn export<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        request: ExportRequest<'_>,
    ) -> Result<ExportResult> {
        self.transition(ExportState::Preparing);

        let result = self.run(surface, request).await;
        self.cancel.reset();
        match &result {
            Ok(_) => self.transition(ExportState::Done),
            Err(e) => {
                warn!("Export failed: {}", e);
                self.transition(ExportState::Failed);
            }
        }
        result
    }

    async fn run<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        request: ExportRequest<'_>,
    ) -> Result<ExportResult> {
        validate_marker(&self.settings.marker)?;

        let renderer = Renderer::from_document(request.base_style.clone(), request.rules);
        match select_mode(request.template, &self.settings.marker, request.terms) {
            ExportMode::Single => self.export_single(surface, &renderer, request.template).await,
            ExportMode::Batch => {
                self.export_batch(surface, &renderer, request.template, request.terms)
                    .await
            }
        }
    }

    async fn export_single<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        renderer: &Renderer,
        template: &str,
    ) -> Result<ExportResult> {
        self.transition(ExportState::Single);

        let mut guard = SurfaceGuard::new(surface, None);
        guard.render(&renderer.render(template));
        tokio::task::yield_now().await;
        let image = guard.capture(&self.settings.capture)?;
        drop(guard);

        info!("Captured {} ({} bytes)", self.settings.single_name, image.len());
        Ok(ExportResult::Single {
            name: self.settings.single_name.clone(),
            image,
        })
    }

    async fn export_batch<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        renderer: &Renderer,
        template: &str,
        terms: &[String],
    ) -> Result<ExportResult> {
        let items = expand_all(template, &self.settings.marker, terms)?;
        let total = items.len();
        info!("Exporting {} images", total);

        let mut entries = Vec::with_capacity(total);
        let mut failures = Vec::new();
        let mut cancelled = false;

        let mut guard = SurfaceGuard::new(surface, Some(renderer.render(template)));
        for (index, item) in items.iter().enumerate() {
            if self.cancel.is_cancelled() {
                info!("Export cancelled after {} of {} items", index, total);
                cancelled = true;
                break;
            }
            self.transition(ExportState::Batch { index, total });

            guard.render(&renderer.render(&item.expanded_text));
            // Let the render settle before the surface is read back
            tokio::task::yield_now().await;

            match guard.capture(&self.settings.capture) {
                Ok(image) => entries.push(ArchiveEntry::new(&item.key, image)),
                Err(e) => {
                    warn!("Skipping {:?}: {}", item.key, e);
                    failures.push(ItemFailure {
                        key: item.key.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
        drop(guard);

        if entries.is_empty() && cancelled {
            return Err(WordshotError::Cancelled);
        }

        let archive = ArchiveBuilder::new(&self.settings.archive_folder)
            .build(&entries)
            .map_err(|e| match e {
                WordshotError::ArchiveEncoding(msg) if entries.is_empty() => {
                    WordshotError::ArchiveEncoding(format!(
                        "{} ({} of {} captures failed)",
                        msg,
                        failures.len(),
                        total
                    ))
                }
                other => other,
            })?;

        info!(
            "Packaged {} of {} images into {}",
            entries.len(),
            total,
            self.settings.archive_name
        );
        Ok(ExportResult::Archive(BatchReport {
            name: self.settings.archive_name.clone(),
            entries,
            archive,
            failures,
            cancelled,
        }))
    }
}

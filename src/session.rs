//! PlotSession: the only holder of mutable session state.
//!
//! A session owns the [`ConfigStore`], the selected [`FunctionKind`], the
//! parameters being edited and the samples generated from them. Every mutation
//! regenerates synchronously, so [`PlotSession::samples`] always reflects the
//! latest change once a method returns.
//!
//! Edits are not written back into the store until [`PlotSession::save`];
//! switching kinds fetches a fresh copy of the stored parameters.
//!
//! A session is meant to be driven from a single thread (the UI thread). It is
//! not safe for concurrent mutation without external synchronization.

use std::path::{Path, PathBuf};

use crate::data::config_store::ConfigStore;
use crate::data::export::{export_to_path, PlotRenderer, PlotView, SvgRenderer};
use crate::data::function::{generate, FunctionKind, Sample, DEFAULT_RESOLUTION};
use crate::data::params::{self, ParameterField, ParameterSet};
use crate::error::{PlotError, Result, ValidationError};
use crate::events::{
    EventController, EventFilter, EventKind, FileMeta, ParameterMeta, SessionEvent,
};

pub struct PlotSession {
    store: ConfigStore,
    config_path: PathBuf,
    selected: FunctionKind,
    parameters: ParameterSet,
    resolution: usize,
    samples: Vec<Sample>,
    events: EventController,
}

impl std::fmt::Debug for PlotSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotSession")
            .field("config_path", &self.config_path)
            .field("selected", &self.selected)
            .field("parameters", &self.parameters)
            .field("samples", &self.samples.len())
            .finish()
    }
}

impl PlotSession {
    /// Load the settings at `config_path` (defaults if absent or unreadable)
    /// and plot the stored selection.
    pub fn open(config_path: impl Into<PathBuf>) -> Result<Self> {
        let config_path = config_path.into();
        let store = ConfigStore::load(&config_path);
        Self::new(store, config_path)
    }

    /// Build a session around an already loaded store.
    pub fn new(store: ConfigStore, config_path: impl Into<PathBuf>) -> Result<Self> {
        let selected = store.selected_kind();
        let parameters = store.parameters_for_selected();
        let mut session = Self {
            store,
            config_path: config_path.into(),
            selected,
            parameters,
            resolution: DEFAULT_RESOLUTION,
            samples: Vec::new(),
            events: EventController::new(),
        };
        session.regenerate()?;
        Ok(session)
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn selected_kind(&self) -> FunctionKind {
        self.selected
    }

    /// Parameters currently being edited.
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn title(&self) -> &'static str {
        self.selected.title()
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Title, samples and axis metadata for a renderer.
    pub fn view(&self) -> PlotView<'_> {
        PlotView::new(
            self.title(),
            &self.samples,
            (self.parameters.x_min, self.parameters.x_max),
        )
    }

    /// Subscribe to session events.
    pub fn subscribe(&self, filter: EventFilter) -> std::sync::mpsc::Receiver<SessionEvent> {
        self.events.subscribe(filter)
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Switch to `kind`, loading a copy of its stored parameters.
    ///
    /// Does nothing if `kind` is already selected.
    pub fn set_selected_kind(&mut self, kind: FunctionKind) -> Result<()> {
        if kind == self.selected {
            return Ok(());
        }
        tracing::debug!("Selecting {} (was {})", kind, self.selected);
        self.selected = kind;
        self.store.set_selected_kind(kind);
        self.parameters = self.store.parameters_for_selected();
        self.regenerate_with(EventKind::KIND_CHANGED)
    }

    /// Change one field of the active parameters.
    ///
    /// Returns `true` if the value changed (and the curve was regenerated).
    pub fn set_parameter(&mut self, field: ParameterField, value: f64) -> Result<bool> {
        let Some(old) = self.parameters.set(field, value) else {
            return Ok(false);
        };
        self.emit_parameter(field, old, value);
        self.regenerate()?;
        Ok(true)
    }

    /// Edit the active parameters in place; regenerates once if anything changed.
    pub fn edit_parameters(&mut self, edit: impl FnOnce(&mut ParameterSet)) -> Result<bool> {
        let mut next = self.parameters.clone();
        edit(&mut next);
        self.set_parameters(next)
    }

    /// Replace the active parameters wholesale.
    pub fn set_parameters(&mut self, next: ParameterSet) -> Result<bool> {
        let changed = self.parameters.diff(&next);
        if changed.is_empty() {
            return Ok(false);
        }
        let prev = std::mem::replace(&mut self.parameters, next);
        for field in changed {
            self.emit_parameter(field, prev.get(field), self.parameters.get(field));
        }
        self.regenerate()?;
        Ok(true)
    }

    /// Change the number of samples per curve (at least 2).
    pub fn set_resolution(&mut self, resolution: usize) -> Result<()> {
        if resolution < 2 {
            return Err(PlotError::InvalidResolution(resolution));
        }
        if resolution != self.resolution {
            self.resolution = resolution;
            self.regenerate()?;
        }
        Ok(())
    }

    /// Recompute the samples for the active kind and parameters.
    pub fn regenerate(&mut self) -> Result<()> {
        self.regenerate_with(EventKind::NONE)
    }

    fn regenerate_with(&mut self, extra: EventKind) -> Result<()> {
        self.samples = generate(self.selected, &self.parameters, self.resolution)?;
        tracing::debug!(
            "Regenerated {} with {} samples over [{}, {}]",
            self.selected,
            self.samples.len(),
            self.parameters.x_min,
            self.parameters.x_max
        );
        let mut evt = SessionEvent::new(EventKind::REGENERATED | extra, self.selected);
        evt.sample_count = Some(self.samples.len());
        self.events.emit(evt);
        Ok(())
    }

    fn emit_parameter(&self, field: ParameterField, old: f64, new: f64) {
        let mut evt = SessionEvent::new(EventKind::PARAMETER_CHANGED, self.selected);
        evt.parameter = Some(ParameterMeta { field, old, new });
        self.events.emit(evt);
    }

    // ── Save / export ────────────────────────────────────────────────────

    /// Validate a parameter set. See [`params::validate`].
    pub fn validate(params: Option<&ParameterSet>) -> std::result::Result<(), ValidationError> {
        params::validate(params)
    }

    /// Validate the active parameters.
    pub fn validate_current(&self) -> std::result::Result<(), ValidationError> {
        params::validate(Some(&self.parameters))
    }

    /// Commit the selected kind and active parameters and persist everything.
    ///
    /// On a validation failure nothing is written and the store is untouched.
    pub fn save(&mut self) -> Result<()> {
        let outcome = self.try_save();
        let (kind, error) = match &outcome {
            Ok(()) => (EventKind::SAVED, None),
            Err(e) => (EventKind::SAVE_FAILED, Some(e.to_string())),
        };
        let mut evt = SessionEvent::new(kind, self.selected);
        evt.file = Some(FileMeta {
            path: self.config_path.clone(),
            error,
        });
        self.events.emit(evt);
        outcome
    }

    fn try_save(&mut self) -> Result<()> {
        if let Err(e) = self.validate_current() {
            tracing::warn!("Not saving settings: {}", e);
            return Err(e.into());
        }
        self.store.set_selected_kind(self.selected);
        self.store.set_parameters_for_selected(self.parameters.clone());
        self.store.save(&self.config_path)
    }

    /// Export the current plot as a 640 × 480 SVG document.
    pub fn export_svg(&self, path: &Path) -> Result<()> {
        self.export_with(&SvgRenderer::default(), path)
    }

    /// Export the current plot with a custom renderer.
    ///
    /// Failures leave the session state untouched.
    pub fn export_with(&self, renderer: &dyn PlotRenderer, path: &Path) -> Result<()> {
        let outcome = export_to_path(renderer, &self.view(), path);
        let (kind, error) = match &outcome {
            Ok(()) => (EventKind::EXPORTED, None),
            Err(e) => {
                tracing::error!("Export to {} failed: {}", path.display(), e);
                (EventKind::EXPORT_FAILED, Some(e.to_string()))
            }
        };
        let mut evt = SessionEvent::new(kind, self.selected);
        evt.file = Some(FileMeta {
            path: path.to_path_buf(),
            error,
        });
        self.events.emit(evt);
        outcome.map_err(PlotError::from)
    }
}

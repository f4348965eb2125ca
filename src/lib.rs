//! funcplot crate root: re-exports and module wiring.
//!
//! funcplot plots sine, cosine and sinc functions with adjustable amplitude,
//! frequency, phase and x-range, remembers the last-used parameters per
//! function and exports the plot as SVG.
//!
//! - `data`: parameter sets, function generators, in-memory configuration
//!   and the SVG renderer
//! - `persistence`: JSON settings file load/save
//! - `session`: [`PlotSession`], which ties selection, parameters and samples together
//! - `events`: subscription to session changes
//! - `app`: the egui/eframe window
//!
//! # Example
//!
//! ```no_run
//! use funcplot::{FunctionKind, ParameterField, PlotSession};
//!
//! let mut session = PlotSession::open("Settings/app.json")?;
//! session.set_selected_kind(FunctionKind::Cosine)?;
//! session.set_parameter(ParameterField::Amplitude, 2.0)?;
//! session.save()?;
//! session.export_svg("cosine.svg".as_ref())?;
//! # Ok::<(), funcplot::PlotError>(())
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod notify;
pub mod persistence;
pub mod session;

// Public re-exports for a compact external API
pub use app::run_app;
pub use config::{default_config_path, AppConfig, SliderRanges};
pub use data::config_store::{ConfigStore, Configuration};
pub use data::export::{PlotRenderer, PlotView, SvgRenderer};
pub use data::function::{generate, FunctionKind, Sample, SampleIter, DEFAULT_RESOLUTION};
pub use data::params::{validate, ParameterField, ParameterSet};
pub use error::{ExportError, PlotError, Result, ValidationError};
pub use events::{EventController, EventFilter, EventKind, SessionEvent};
pub use notify::{Notification, NotificationLevel};
pub use session::PlotSession;

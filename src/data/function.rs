//! Function kinds and the generators that sample them.

use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::params::ParameterSet;
use crate::error::{PlotError, Result};

/// Number of samples drawn for a curve unless told otherwise.
pub const DEFAULT_RESOLUTION: usize = 500;

/// The closed set of plottable functions.
///
/// Adding a variant means adding a match arm in [`FunctionKind::evaluate`];
/// there is no runtime registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FunctionKind {
    #[serde(alias = "Sin")]
    Sine,
    #[serde(alias = "Cos")]
    Cosine,
    Sinc,
}

impl FunctionKind {
    /// Number of variants.
    pub const COUNT: usize = 3;

    /// All kinds in declaration order.
    pub const ALL: [FunctionKind; Self::COUNT] =
        [FunctionKind::Sine, FunctionKind::Cosine, FunctionKind::Sinc];

    /// Position in [`FunctionKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a kind by its position in [`FunctionKind::ALL`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Name used in the settings file.
    pub fn name(self) -> &'static str {
        match self {
            FunctionKind::Sine => "Sine",
            FunctionKind::Cosine => "Cosine",
            FunctionKind::Sinc => "Sinc",
        }
    }

    /// Plot title.
    pub fn title(self) -> &'static str {
        match self {
            FunctionKind::Sine => "Sine Function",
            FunctionKind::Cosine => "Cosine Function",
            FunctionKind::Sinc => "Sinc Function",
        }
    }

    /// Formula as shown next to the selector.
    pub fn formula(self) -> &'static str {
        match self {
            FunctionKind::Sine => "y = a·sin(f·x + p)",
            FunctionKind::Cosine => "y = a·cos(2π·f·x + p)",
            FunctionKind::Sinc => "y = a·sin(2π·f·x + p) / (2π·x)",
        }
    }

    /// Evaluate the function at `x`.
    ///
    /// Sine takes the frequency as an angular factor while cosine and sinc
    /// scale it by 2π. Stored settings depend on this, so the two conventions
    /// are kept apart.
    pub fn evaluate(self, p: &ParameterSet, x: f64) -> f64 {
        match self {
            FunctionKind::Sine => p.amplitude * (p.frequency * x + p.phase).sin(),
            FunctionKind::Cosine => p.amplitude * (2.0 * PI * p.frequency * x + p.phase).cos(),
            FunctionKind::Sinc => {
                if x.abs() < f64::EPSILON {
                    // limit at the origin
                    p.amplitude
                } else {
                    p.amplitude * (2.0 * PI * p.frequency * x + p.phase).sin() / (2.0 * PI * x)
                }
            }
        }
    }
}

impl std::fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FunctionKind {
    type Err = PlotError;

    /// Case-insensitive; also accepts the short names `sin` and `cos`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" | "sin" => Ok(FunctionKind::Sine),
            "cosine" | "cos" => Ok(FunctionKind::Cosine),
            "sinc" => Ok(FunctionKind::Sinc),
            _ => Err(PlotError::UnsupportedFunctionKind(s.to_string())),
        }
    }
}

/// One point of a sampled curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// Lazy, restartable sampler over an evenly spaced x-grid.
///
/// Evaluation is pure, so a clone taken before consuming yields the same
/// samples again.
#[derive(Debug, Clone)]
pub struct SampleIter {
    kind: FunctionKind,
    params: ParameterSet,
    step: f64,
    next: usize,
    len: usize,
}

impl SampleIter {
    /// Prepare `resolution` samples of `kind` over `[x_min, x_max]`.
    ///
    /// `resolution` must be at least 2; fewer points leave the step undefined.
    /// The first and last samples sit exactly on `x_min` and `x_max`.
    pub fn new(kind: FunctionKind, params: &ParameterSet, resolution: usize) -> Result<Self> {
        if resolution < 2 {
            return Err(PlotError::InvalidResolution(resolution));
        }
        // divide before subtracting so ranges near f64::MAX do not overflow
        let intervals = (resolution - 1) as f64;
        let step = params.x_max / intervals - params.x_min / intervals;
        Ok(Self {
            kind,
            params: params.clone(),
            step,
            next: 0,
            len: resolution,
        })
    }

    /// Distance between consecutive x values.
    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Iterator for SampleIter {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.next >= self.len {
            return None;
        }
        let x = if self.next + 1 == self.len {
            self.params.x_max
        } else {
            self.params.x_min + self.next as f64 * self.step
        };
        self.next += 1;
        Some(Sample {
            x,
            y: self.kind.evaluate(&self.params, x),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.len - self.next;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for SampleIter {}

/// Sample `kind` with the given parameters at `resolution` points.
pub fn generate(kind: FunctionKind, params: &ParameterSet, resolution: usize) -> Result<Vec<Sample>> {
    Ok(SampleIter::new(kind, params, resolution)?.collect())
}

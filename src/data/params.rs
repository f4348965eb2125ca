//! ParameterSet: the five numeric knobs that shape one plotted function.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifies one field of a [`ParameterSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterField {
    Amplitude,
    Frequency,
    Phase,
    XMin,
    XMax,
}

impl ParameterField {
    /// All fields in display order.
    pub const ALL: [ParameterField; 5] = [
        ParameterField::Amplitude,
        ParameterField::Frequency,
        ParameterField::Phase,
        ParameterField::XMin,
        ParameterField::XMax,
    ];

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            ParameterField::Amplitude => "Amplitude",
            ParameterField::Frequency => "Frequency",
            ParameterField::Phase => "Phase",
            ParameterField::XMin => "X-Min",
            ParameterField::XMax => "X-Max",
        }
    }

    /// Unit suffix shown next to the value, if any.
    pub fn unit(self) -> Option<&'static str> {
        match self {
            ParameterField::Phase => Some("rad"),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParameterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Amplitude, frequency, phase (radians) and the visible x-range of one function.
///
/// Values are plain data: cloning yields an independent copy. Field changes
/// are observed through [`PlotSession`](crate::PlotSession), which emits a
/// `PARAMETER_CHANGED` event per changed field. Not safe for concurrent
/// mutation without external synchronization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParameterSet {
    #[serde(alias = "Amplitude")]
    pub amplitude: f64,
    #[serde(alias = "Frequency")]
    pub frequency: f64,
    #[serde(alias = "Phase")]
    pub phase: f64,
    #[serde(alias = "XMin")]
    pub x_min: f64,
    #[serde(alias = "XMax")]
    pub x_max: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            phase: 0.0,
            x_min: -2.0,
            x_max: 2.0,
        }
    }
}

impl ParameterSet {
    /// Read a single field.
    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::Amplitude => self.amplitude,
            ParameterField::Frequency => self.frequency,
            ParameterField::Phase => self.phase,
            ParameterField::XMin => self.x_min,
            ParameterField::XMax => self.x_max,
        }
    }

    /// Write a single field. Returns the previous value if it actually changed.
    pub fn set(&mut self, field: ParameterField, value: f64) -> Option<f64> {
        let slot = match field {
            ParameterField::Amplitude => &mut self.amplitude,
            ParameterField::Frequency => &mut self.frequency,
            ParameterField::Phase => &mut self.phase,
            ParameterField::XMin => &mut self.x_min,
            ParameterField::XMax => &mut self.x_max,
        };
        if *slot == value {
            return None;
        }
        let old = std::mem::replace(slot, value);
        Some(old)
    }

    /// Fields whose values differ between `self` and `other`.
    pub fn diff(&self, other: &ParameterSet) -> Vec<ParameterField> {
        ParameterField::ALL
            .into_iter()
            .filter(|f| self.get(*f) != other.get(*f))
            .collect()
    }
}

/// Check a parameter set before it is saved.
///
/// The first failing rule wins: missing set, amplitude, frequency, phase,
/// x-min, x-max and finally the x-range ordering. Each field must be finite
/// (JSON has no NaN or infinity); amplitude, frequency and phase must also be
/// non-negative. Phase is required to be non-negative even though any real
/// offset would plot fine; saved settings have always obeyed that rule.
pub fn validate(params: Option<&ParameterSet>) -> Result<(), ValidationError> {
    let Some(p) = params else {
        return Err(ValidationError::Missing);
    };
    let non_negative = [
        (ParameterField::Amplitude, ValidationError::NegativeAmplitude),
        (ParameterField::Frequency, ValidationError::NegativeFrequency),
        (ParameterField::Phase, ValidationError::NegativePhase),
    ];
    for (field, negative) in non_negative {
        let v = p.get(field);
        if !v.is_finite() {
            return Err(ValidationError::NotFinite(field));
        }
        if v < 0.0 {
            return Err(negative);
        }
    }
    for field in [ParameterField::XMin, ParameterField::XMax] {
        if !p.get(field).is_finite() {
            return Err(ValidationError::NotFinite(field));
        }
    }
    if p.x_min >= p.x_max {
        return Err(ValidationError::EmptyRange);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reports_only_real_changes() {
        let mut p = ParameterSet::default();
        assert_eq!(p.set(ParameterField::Amplitude, 1.0), None);
        assert_eq!(p.set(ParameterField::Amplitude, 2.5), Some(1.0));
        assert_eq!(p.get(ParameterField::Amplitude), 2.5);
    }

    #[test]
    fn clone_is_independent() {
        let a = ParameterSet::default();
        let mut b = a.clone();
        b.set(ParameterField::XMax, 7.0);
        assert_eq!(a.x_max, 2.0);
        assert_eq!(a.diff(&b), vec![ParameterField::XMax]);
    }

    #[test]
    fn deserializes_with_missing_fields_and_legacy_names() {
        let p: ParameterSet = serde_json::from_str(r#"{"Amplitude": 3.0, "xMax": 5.0}"#).unwrap();
        assert_eq!(p.amplitude, 3.0);
        assert_eq!(p.x_max, 5.0);
        assert_eq!(p.x_min, -2.0);
    }

    #[test]
    fn validation_checks_range_last() {
        let p = ParameterSet {
            amplitude: -1.0,
            x_min: 3.0,
            x_max: 1.0,
            ..Default::default()
        };
        assert_eq!(validate(Some(&p)), Err(ValidationError::NegativeAmplitude));
        let p = ParameterSet {
            x_min: 3.0,
            x_max: 1.0,
            ..Default::default()
        };
        assert_eq!(validate(Some(&p)), Err(ValidationError::EmptyRange));
    }

    #[test]
    fn validation_rejects_non_finite_fields() {
        for field in ParameterField::ALL {
            for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
                let mut p = ParameterSet::default();
                p.set(field, bad);
                assert_eq!(validate(Some(&p)), Err(ValidationError::NotFinite(field)));
            }
        }
        assert_eq!(
            ValidationError::NotFinite(ParameterField::XMax).to_string(),
            "X-Max must be a finite number!"
        );
    }
}

//! In-memory configuration: one parameter set per function kind plus the
//! selected kind.

use crate::data::function::FunctionKind;
use crate::data::params::ParameterSet;

/// Full persisted state.
///
/// Every [`FunctionKind`] always has an entry: the sets are stored in an array
/// indexed by [`FunctionKind::index`].
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    parameter_sets: [ParameterSet; FunctionKind::COUNT],
    selected_kind: FunctionKind,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            parameter_sets: std::array::from_fn(|_| ParameterSet::default()),
            selected_kind: FunctionKind::Sine,
        }
    }
}

impl Configuration {
    pub fn selected_kind(&self) -> FunctionKind {
        self.selected_kind
    }

    pub fn set_selected_kind(&mut self, kind: FunctionKind) {
        self.selected_kind = kind;
    }

    pub fn parameters(&self, kind: FunctionKind) -> &ParameterSet {
        &self.parameter_sets[kind.index()]
    }

    pub fn set_parameters(&mut self, kind: FunctionKind, params: ParameterSet) {
        self.parameter_sets[kind.index()] = params;
    }

    /// Iterate `(kind, parameters)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (FunctionKind, &ParameterSet)> + '_ {
        FunctionKind::ALL
            .into_iter()
            .map(move |k| (k, &self.parameter_sets[k.index()]))
    }
}

/// Holds the [`Configuration`] between load and save.
///
/// Reads and writes here touch memory only; persistence happens through
/// [`crate::persistence`]. Not safe for concurrent mutation without external
/// synchronization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    config: Configuration,
}

impl ConfigStore {
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn selected_kind(&self) -> FunctionKind {
        self.config.selected_kind()
    }

    pub fn set_selected_kind(&mut self, kind: FunctionKind) {
        self.config.set_selected_kind(kind);
    }

    /// Copy of the parameters stored for the selected kind.
    pub fn parameters_for_selected(&self) -> ParameterSet {
        self.config.parameters(self.config.selected_kind()).clone()
    }

    /// Replace the stored parameters of the selected kind.
    pub fn set_parameters_for_selected(&mut self, params: ParameterSet) {
        let kind = self.config.selected_kind();
        self.config.set_parameters(kind, params);
    }

    /// Copy of the parameters stored for any kind.
    pub fn parameters_for(&self, kind: FunctionKind) -> ParameterSet {
        self.config.parameters(kind).clone()
    }
}

//=========================================================================
// Input Profiles
//=========================================================================
//
// JSON layer and axis definitions, loaded at startup instead of binding
// layers in code.
//
// Format:
//   {
//     "axes":   { "Horizontal": { "positive": "KeyD", "negative": "KeyA" } },
//     "layers": [
//       { "label": "Gameplay",
//         "bindings": [ { "input": { "Key": "Space" }, "action": "Jump" } ] },
//       { "label": "Pause", "blocking": true, "bindings": [] }
//     ]
//   }
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::action::Action;
use super::action_map::ActionMap;
use super::binding::InputBinding;
use super::layer::InputLayer;
use super::state_tracker::{AxisSettings, StateTracker};

//=== ProfileError ========================================================

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to read input profile: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse input profile: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Layer '{0}' is defined more than once")]
    DuplicateLayer(String),
}

//=== Profile Types =======================================================

/// One binding entry of a layer profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingProfile<A> {
    pub input: InputBinding,
    pub action: A,
}

/// Serialized form of an [`InputLayer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
pub struct LayerProfile<A> {
    pub label: String,
    #[serde(default)]
    pub blocking: bool,
    #[serde(default)]
    pub ignore_blocking: bool,
    #[serde(default)]
    pub bindings: Vec<BindingProfile<A>>,
}

impl<A: Action> LayerProfile<A> {
    /// Builds a fresh, inactive layer from this definition.
    pub fn build(&self) -> InputLayer<A> {
        let mut actions = ActionMap::new();
        for binding in &self.bindings {
            actions.bind(binding.input.clone(), binding.action);
        }

        InputLayer::new(self.label.clone())
            .blocking(self.blocking)
            .ignore_blocking(self.ignore_blocking)
            .with_actions(actions)
    }
}

/// Axis definitions plus named layer definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
pub struct InputProfile<A> {
    #[serde(default)]
    pub axes: BTreeMap<String, AxisSettings>,
    #[serde(default)]
    pub layers: Vec<LayerProfile<A>>,
}

impl<A> InputProfile<A>
where
    A: Action + for<'de> Deserialize<'de>,
{
    /// Parses a profile from JSON text. Layer labels must be unique.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let profile: Self = serde_json::from_str(json)?;

        for (index, layer) in profile.layers.iter().enumerate() {
            if profile.layers[..index].iter().any(|other| other.label == layer.label) {
                return Err(ProfileError::DuplicateLayer(layer.label.clone()));
            }
        }

        debug!(
            target: "input::profile",
            "Parsed input profile: {} axes, {} layers",
            profile.axes.len(),
            profile.layers.len()
        );
        Ok(profile)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let profile = Self::from_json(&text)?;
        info!(target: "input::profile", "Loaded input profile {}", path.display());
        Ok(profile)
    }
}

impl<A: Action> InputProfile<A> {
    /// Defines every profile axis on the tracker.
    pub fn apply_axes(&self, state: &mut StateTracker) {
        for (name, settings) in &self.axes {
            state.define_axis(name.clone(), *settings);
        }
    }

    /// Builds the layer with the given label.
    pub fn layer(&self, label: &str) -> Option<InputLayer<A>> {
        self.layers.iter().find(|layer| layer.label == label).map(LayerProfile::build)
    }

    /// Builds every layer, in definition order.
    pub fn build_layers(&self) -> Vec<InputLayer<A>> {
        self.layers.iter().map(LayerProfile::build).collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//! Controller input map: which buttons exist and what each one does.

use crate::tables::DEFAULT_BUTTONS;
use crate::SimError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What pressing a button does: one fixed action, or one of several
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionBinding {
    Single(String),
    Sequence(Vec<String>),
}

impl ActionBinding {
    /// Pick the action for one press. A single action consumes no randomness.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        match self {
            ActionBinding::Single(action) => Some(action.as_str()),
            ActionBinding::Sequence(actions) => actions.choose(rng).map(String::as_str),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            ActionBinding::Single(_) => false,
            ActionBinding::Sequence(actions) => actions.is_empty(),
        }
    }
}

impl From<&str> for ActionBinding {
    fn from(action: &str) -> Self {
        ActionBinding::Single(action.to_string())
    }
}

impl From<&[&str]> for ActionBinding {
    fn from(actions: &[&str]) -> Self {
        ActionBinding::Sequence(actions.iter().map(|a| a.to_string()).collect())
    }
}

/// Ordered button → action table
///
/// Order matters: the sampler picks by index, so the same seed over the same
/// map always presses the same buttons. Maps read from JSON are ordered by
/// button name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, ActionBinding>",
    into = "BTreeMap<String, ActionBinding>"
)]
pub struct InputMap {
    bindings: Vec<(String, ActionBinding)>,
}

impl InputMap {
    /// An empty map. Bind at least one button before handing it to a session.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind `button`, replacing any existing binding for it in place
    pub fn bind(mut self, button: impl Into<String>, binding: impl Into<ActionBinding>) -> Self {
        let button = button.into();
        let binding = binding.into();
        match self.bindings.iter_mut().find(|(b, _)| *b == button) {
            Some(slot) => slot.1 = binding,
            None => self.bindings.push((button, binding)),
        }
        self
    }

    /// Parse a JSON object of `button: "action"` or `button: ["a", "b"]`
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let map: InputMap = serde_json::from_str(json)
            .map_err(|e| SimError::InvalidInputConfig(e.to_string()))?;
        map.validate()?;
        Ok(map)
    }

    /// Reject maps the sampler could not pick from
    pub fn validate(&self) -> Result<(), SimError> {
        if self.bindings.is_empty() {
            return Err(SimError::InvalidInputConfig(
                "input map has no buttons".to_string(),
            ));
        }
        if let Some((button, _)) = self.bindings.iter().find(|(_, b)| b.is_empty()) {
            return Err(SimError::InvalidInputConfig(format!(
                "button {} has no actions",
                button
            )));
        }
        Ok(())
    }

    pub fn get(&self, button: &str) -> Option<&ActionBinding> {
        self.bindings
            .iter()
            .find(|(b, _)| b == button)
            .map(|(_, binding)| binding)
    }

    pub fn buttons(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|(b, _)| b.as_str())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Pick a button uniformly, then one of its actions
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(&str, &str)> {
        let (button, binding) = self.bindings.choose(rng)?;
        let action = binding.choose(rng)?;
        Some((button.as_str(), action))
    }
}

impl Default for InputMap {
    fn default() -> Self {
        DEFAULT_BUTTONS
            .iter()
            .fold(InputMap::new(), |map, (button, actions)| {
                map.bind(*button, *actions)
            })
    }
}

impl From<BTreeMap<String, ActionBinding>> for InputMap {
    fn from(map: BTreeMap<String, ActionBinding>) -> Self {
        Self {
            bindings: map.into_iter().collect(),
        }
    }
}

impl From<InputMap> for BTreeMap<String, ActionBinding> {
    fn from(map: InputMap) -> Self {
        map.bindings.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_map() {
        let map = InputMap::default();
        let buttons: Vec<&str> = map.buttons().collect();
        assert_eq!(buttons, vec!["A", "B", "C", "START", "Z", "L", "R"]);
        assert_eq!(
            map.get("C"),
            Some(&ActionBinding::Sequence(vec![
                "left".into(),
                "right".into(),
                "up".into(),
                "down".into()
            ]))
        );
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_bind_replaces_in_place() {
        let map = InputMap::default().bind("B", "parry");
        assert_eq!(map.len(), 7);
        assert_eq!(map.buttons().nth(1), Some("B"));
        assert_eq!(map.get("B"), Some(&ActionBinding::Single("parry".into())));
    }

    #[test]
    fn test_from_json_accepts_string_or_list() {
        let map = InputMap::from_json(r#"{"X": "dash", "Y": ["roll", "hop"]}"#).unwrap();
        assert_eq!(map.get("X"), Some(&ActionBinding::Single("dash".into())));
        assert_eq!(
            map.get("Y"),
            Some(&ActionBinding::Sequence(vec!["roll".into(), "hop".into()]))
        );
    }

    #[test]
    fn test_from_json_rejects_bad_maps() {
        assert!(matches!(
            InputMap::from_json("{}"),
            Err(SimError::InvalidInputConfig(_))
        ));
        assert!(matches!(
            InputMap::from_json(r#"{"A": []}"#),
            Err(SimError::InvalidInputConfig(_))
        ));
        assert!(matches!(
            InputMap::from_json(r#"{"A": 3}"#),
            Err(SimError::InvalidInputConfig(_))
        ));
        assert!(InputMap::from_json("not json").is_err());
    }

    #[test]
    fn test_sample_stays_in_map() {
        let map = InputMap::default();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let (button, action) = map.sample(&mut rng).unwrap();
            match map.get(button).unwrap() {
                ActionBinding::Sequence(actions) => assert!(actions.iter().any(|a| a == action)),
                ActionBinding::Single(a) => assert_eq!(a, action),
            }
        }
    }

    #[test]
    fn test_single_binding_always_same_action() {
        let map = InputMap::new().bind("START", "pause");
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..10 {
            assert_eq!(map.sample(&mut rng), Some(("START", "pause")));
        }
    }

    #[test]
    fn test_empty_map_samples_nothing() {
        let map = InputMap::new();
        assert!(map.sample(&mut StdRng::seed_from_u64(0)).is_none());
    }
}

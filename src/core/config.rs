//! Scorecard configuration.
//!
//! Hosts configure the engine at startup by providing a `ScorecardConfig`:
//! - the namespace prefix for persisted keys
//! - the preset player names offered for quick-add
//!
//! The 13-round joker sequence is fixed and not configurable.

use serde::{Deserialize, Serialize};

/// Default prefix for persisted keys.
pub const DEFAULT_NAMESPACE: &str = "dutch_";

/// Default quick-add names.
pub const DEFAULT_PRESETS: [&str; 10] = [
    "Mayur", "Mona", "Sumit", "Vibha", "Amit", "Sabnam", "Sujit", "Sayo", "Sangam", "Riya",
];

/// Complete scorecard configuration.
///
/// ```
/// use dutch_scorecard::core::ScorecardConfig;
///
/// let config = ScorecardConfig::new()
///     .with_namespace("club_")
///     .with_presets(["Ann", "Ben"]);
///
/// assert_eq!(config.namespace, "club_");
/// assert!(config.is_preset("Ann"));
/// assert!(!config.is_preset("Mona"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorecardConfig {
    /// Prefix applied to every persisted key.
    pub namespace: String,

    /// Names offered by the quick-add path, in display order.
    pub presets: Vec<String>,
}

impl Default for ScorecardConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            presets: DEFAULT_PRESETS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScorecardConfig {
    /// Create a configuration with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Replace the preset list.
    #[must_use]
    pub fn with_presets<I, S>(mut self, presets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.presets = presets.into_iter().map(Into::into).collect();
        self
    }

    /// True if `name` is one of the presets (exact match).
    #[must_use]
    pub fn is_preset(&self, name: &str) -> bool {
        self.presets.iter().any(|p| p == name)
    }

    /// Full key for a record name.
    #[must_use]
    pub fn key(&self, record: &str) -> String {
        format!("{}{}", self.namespace, record)
    }
}

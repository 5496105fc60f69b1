//! Controller profile and port name matching
//!
//! The profile is part of the bridge's YAML config:
//!
//! ```yaml
//! controller:
//!   name: "Zoom R24"
//!   port_match: "R24"
//!   learned_port_name: "ZOOM R24 MIDI 1"   # optional
//!   channel_capacity: 256
//! ```

use serde::{Deserialize, Serialize};

/// Which MIDI port to open and how to buffer its input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerProfile {
    /// Display name used in logs
    pub name: String,
    /// Case-insensitive substring of the port name
    pub port_match: String,
    /// Exact (normalized) port name, preferred over `port_match` when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learned_port_name: Option<String>,
    /// Capacity of the callback → session channel
    pub channel_capacity: usize,
}

impl Default for ControllerProfile {
    fn default() -> Self {
        Self {
            name: "Zoom R24".to_string(),
            port_match: "R24".to_string(),
            learned_port_name: None,
            channel_capacity: 256,
        }
    }
}

/// Normalize a MIDI port name by removing hardware-specific identifiers
///
/// ALSA port names include dynamic IDs that change between reconnections:
///
/// 1. Bracketed hardware IDs: `[hw:3,0,0]`
/// 2. ALSA sequencer client:port IDs: trailing `28:0` or `20:0`
///
/// Examples:
/// - "ZOOM R24 MIDI 1 [hw:2,0,0]" -> "ZOOM R24 MIDI 1"
/// - "ZOOM R24:ZOOM R24 MIDI 1 24:0" -> "ZOOM R24:ZOOM R24 MIDI 1"
pub fn normalize_port_name(name: &str) -> String {
    let mut result = name.trim();

    if let Some(bracket_pos) = result.rfind('[') {
        result = result[..bracket_pos].trim();
    }

    if let Some(last_space) = result.rfind(' ') {
        let suffix = &result[last_space + 1..];
        if let Some((client, port)) = suffix.split_once(':') {
            let is_id = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
            if is_id(client) && is_id(port) {
                result = result[..last_space].trim();
            }
        }
    }

    result.to_string()
}

/// Check if a port name matches the profile
///
/// Tries the learned port name first (exact, normalized, case-insensitive),
/// then falls back to a substring match against `port_match`.
pub fn port_matches(actual_port: &str, profile: &ControllerProfile) -> bool {
    let normalized_actual = normalize_port_name(actual_port);

    if let Some(ref learned) = profile.learned_port_name {
        if normalized_actual.eq_ignore_ascii_case(&normalize_port_name(learned)) {
            return true;
        }
    }

    let pattern = normalize_port_name(&profile.port_match).to_lowercase();
    !pattern.is_empty() && normalized_actual.to_lowercase().contains(&pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = ControllerProfile::default();
        assert_eq!(profile.port_match, "R24");
        assert_eq!(profile.learned_port_name, None);
        assert_eq!(profile.channel_capacity, 256);
    }

    #[test]
    fn test_yaml_parsing_with_defaults() {
        let yaml = r#"
port_match: "R16"
learned_port_name: "ZOOM R16 MIDI 1"
"#;
        let profile: ControllerProfile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(profile.port_match, "R16");
        assert_eq!(
            profile.learned_port_name.as_deref(),
            Some("ZOOM R16 MIDI 1")
        );
        assert_eq!(profile.name, "Zoom R24");
        assert_eq!(profile.channel_capacity, 256);
    }

    #[test]
    fn test_normalize_port_name() {
        assert_eq!(
            normalize_port_name("ZOOM R24 MIDI 1 [hw:2,0,0]"),
            "ZOOM R24 MIDI 1"
        );
        assert_eq!(
            normalize_port_name("ZOOM R24:ZOOM R24 MIDI 1 24:0"),
            "ZOOM R24:ZOOM R24 MIDI 1"
        );
        assert_eq!(
            normalize_port_name("Midi Through:Midi Through Port-0 14:0"),
            "Midi Through:Midi Through Port-0"
        );
        assert_eq!(normalize_port_name("ZOOM R24 MIDI 1"), "ZOOM R24 MIDI 1");
        assert_eq!(normalize_port_name("  Padded Name  "), "Padded Name");
        assert_eq!(normalize_port_name("Device a:b"), "Device a:b");
        assert_eq!(normalize_port_name(""), "");
        assert_eq!(normalize_port_name("[only brackets]"), "");
    }

    #[test]
    fn test_port_matches() {
        let profile = ControllerProfile::default();
        assert!(port_matches("ZOOM R24 MIDI 1 [hw:2,0,0]", &profile));
        assert!(port_matches("zoom r24:zoom r24 midi 1 24:0", &profile));
        assert!(!port_matches("Midi Through Port-0", &profile));
    }

    #[test]
    fn test_learned_port_name_takes_precedence() {
        let profile = ControllerProfile {
            port_match: "nothing like it".to_string(),
            learned_port_name: Some("ZOOM R16 MIDI 1 [hw:1,0,0]".to_string()),
            ..ControllerProfile::default()
        };
        assert!(port_matches("ZOOM R16 MIDI 1 [hw:3,0,0]", &profile));
        assert!(!port_matches("ZOOM R16 MIDI 2", &profile));
    }

    #[test]
    fn test_empty_pattern_matches_nothing() {
        let profile = ControllerProfile {
            port_match: String::new(),
            ..ControllerProfile::default()
        };
        assert!(!port_matches("ZOOM R24 MIDI 1", &profile));
    }
}

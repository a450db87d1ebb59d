use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ConfigPatch, MetronomeConfig};
use crate::error::ImportError;

pub const SNAPSHOT_VERSION: u32 = 1;

/// The exportable form of a [`MetronomeConfig`]
///
/// Holds exactly the validated settings plus a format version. Importing goes
/// through [`ConfigSnapshot::parse_patch`], which re-validates every field
/// instead of trusting the stored values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    pub version: u32,
    pub bpm: u16,
    pub time_signature: String,
    pub subdivision: String,
    pub swing: u8,
    pub volume: u8,
    pub poly_enabled: bool,
    pub poly_beats: u8,
    pub poly_subdivision: String,
    pub poly_volume: u8,
    pub visual_pulse: bool,
    pub accent_pattern: Vec<bool>,
    pub training_mode: bool,
    pub training_step: u8,
    pub training_every: u16,
    pub tempo_lock: bool,
}

impl From<&MetronomeConfig> for ConfigSnapshot {
    fn from(config: &MetronomeConfig) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            bpm: config.bpm,
            time_signature: config.meter.to_string(),
            subdivision: config.subdivision.label().to_owned(),
            swing: config.swing,
            volume: config.volume,
            poly_enabled: config.poly.enabled,
            poly_beats: config.poly.beats,
            poly_subdivision: config.poly.subdivision.label().to_owned(),
            poly_volume: config.poly.volume,
            visual_pulse: config.visual_pulse,
            accent_pattern: config.accents.as_slice().to_vec(),
            training_mode: config.training.enabled,
            training_step: config.training.step,
            training_every: config.training.every,
            tempo_lock: config.tempo_lock,
        }
    }
}

impl ConfigSnapshot {
    pub fn to_json(&self) -> String {
        // A struct of plain fields always serializes
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Turn stored JSON into a patch. Fails only when the payload as a whole is
    /// unusable; individual bad fields are dropped.
    pub fn parse_patch(json: &str) -> Result<ConfigPatch, ImportError> {
        let value: Value = serde_json::from_str(json)?;
        let object = value.as_object().ok_or(ImportError::NotAnObject)?;

        if let Some(found) = object.get("version").and_then(Value::as_u64) {
            if found > SNAPSHOT_VERSION as u64 {
                return Err(ImportError::UnsupportedVersion {
                    found,
                    supported: SNAPSHOT_VERSION,
                });
            }
        }

        Ok(ConfigPatch::from_json_object(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencing::TimeSignature;

    fn sample_config() -> MetronomeConfig {
        let mut config = MetronomeConfig::default();
        config.apply(&ConfigPatch {
            bpm: Some(97),
            time_signature: Some("7/8".into()),
            subdivision: Some("1/16T".into()),
            swing: Some(40),
            volume: Some(55),
            poly_enabled: Some(true),
            poly_beats: Some(5),
            poly_subdivision: Some("1/8".into()),
            poly_volume: Some(65),
            visual_pulse: Some(false),
            accent_pattern: Some(vec![true, false, true, false, false, true, false]),
            training_mode: Some(true),
            training_step: Some(3),
            training_every: Some(8),
            tempo_lock: Some(true),
        });
        config
    }

    #[test]
    fn export_then_import_reproduces_config() {
        let original = sample_config();
        let json = ConfigSnapshot::from(&original).to_json();

        let mut restored = MetronomeConfig::default();
        restored.apply(&ConfigSnapshot::parse_patch(&json).unwrap());

        assert_eq!(restored, original);
    }

    #[test]
    fn export_carries_version_and_camel_case_keys() {
        let json = ConfigSnapshot::from(&MetronomeConfig::default()).to_json();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], 1);
        assert_eq!(value["timeSignature"], "4/4");
        assert_eq!(value["subdivision"], "1/8");
        assert_eq!(value["accentPattern"], serde_json::json!([true, false, false, false]));
    }

    #[test]
    fn stored_values_are_revalidated() {
        let json = r#"{"version":1,"bpm":1000,"timeSignature":"9/0","swing":99}"#;
        let mut config = MetronomeConfig::default();
        config.apply(&ConfigSnapshot::parse_patch(json).unwrap());

        assert_eq!(config.bpm(), 300);
        assert_eq!(config.meter(), TimeSignature::FOUR_FOUR);
        assert_eq!(config.swing(), 75);
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        assert!(matches!(
            ConfigSnapshot::parse_patch("{ not json"),
            Err(ImportError::Parse(_))
        ));
        assert!(matches!(
            ConfigSnapshot::parse_patch("[1, 2, 3]"),
            Err(ImportError::NotAnObject)
        ));
        assert!(matches!(
            ConfigSnapshot::parse_patch(r#"{"version": 7}"#),
            Err(ImportError::UnsupportedVersion { found: 7, .. })
        ));
    }

    #[test]
    fn missing_fields_merge_instead_of_replacing() {
        let mut config = sample_config();
        config.apply(&ConfigSnapshot::parse_patch(r#"{"swing": 10}"#).unwrap());

        assert_eq!(config.swing(), 10);
        assert_eq!(config.bpm(), 97);
        assert_eq!(config.meter().to_string(), "7/8");
    }
}

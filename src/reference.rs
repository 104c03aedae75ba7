use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text::normalize;

/// Over-the-counter guidance for one symptom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomRecord {
    pub medication: String,
    pub form: String,
    pub dose: String,
    pub advice: String,
}

/// Fact sheet for one medication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationRecord {
    pub description: String,
    pub presentation: String,
    pub usage: String,
    pub dose: String,
    pub effects: String,
    pub warnings: String,
}

/// Implemented by record types so store construction can reject
/// entries with missing fields.
pub trait ReferenceRecord {
    /// Name of the first empty field, if any.
    fn missing_field(&self) -> Option<&'static str>;
}

impl ReferenceRecord for SymptomRecord {
    fn missing_field(&self) -> Option<&'static str> {
        [
            ("medication", &self.medication),
            ("form", &self.form),
            ("dose", &self.dose),
            ("advice", &self.advice),
        ]
        .iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
    }
}

impl ReferenceRecord for MedicationRecord {
    fn missing_field(&self) -> Option<&'static str> {
        [
            ("description", &self.description),
            ("presentation", &self.presentation),
            ("usage", &self.usage),
            ("dose", &self.dose),
            ("effects", &self.effects),
            ("warnings", &self.warnings),
        ]
        .iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
    }
}

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Reference data load failed ({0}): {1}")]
    Load(String, String),

    #[error("Reference data parse failed ({0}): {1}")]
    Parse(String, String),

    #[error("Entry {0} has an empty key")]
    EmptyKey(usize),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Entry {key}: field {field} is empty")]
    IncompleteRecord { key: String, field: &'static str },
}

/// One entry in an external reference data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceEntry<R> {
    pub name: String,
    #[serde(flatten)]
    pub record: R,
}

/// Ordered, read-only mapping from normalized keys to records.
///
/// Entries keep their definition order; the matcher's first-key-wins
/// rules depend on it. Keys are non-empty, lowercase, trimmed and
/// unique. Built once at startup, never mutated.
#[derive(Debug)]
pub struct ReferenceStore<R> {
    entries: Vec<(String, R)>,
}

impl<R> ReferenceStore<R> {
    /// Record for an exact key, if present. Callers invoke this after a
    /// matcher hit; a miss at that point means the key set diverged.
    pub fn get(&self, key: &str) -> Option<&R> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, r)| r)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Keys in definition order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn first_key(&self) -> Option<&str> {
        self.entries.first().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<R: ReferenceRecord> ReferenceStore<R> {
    /// Build a store from (name, record) entries. Names are normalized
    /// into keys; empty keys, duplicates and incomplete records are
    /// rejected.
    pub fn from_entries(raw: Vec<(String, R)>) -> Result<Self, ReferenceError> {
        let mut entries: Vec<(String, R)> = Vec::with_capacity(raw.len());
        for (position, (name, record)) in raw.into_iter().enumerate() {
            let key = normalize(&name);
            if key.is_empty() {
                return Err(ReferenceError::EmptyKey(position));
            }
            if entries.iter().any(|(k, _)| *k == key) {
                return Err(ReferenceError::DuplicateKey(key));
            }
            if let Some(field) = record.missing_field() {
                return Err(ReferenceError::IncompleteRecord { key, field });
            }
            entries.push((key, record));
        }
        Ok(Self { entries })
    }

    /// Load a store from a JSON array of entries.
    pub fn from_json_file(path: &Path) -> Result<Self, ReferenceError>
    where
        R: serde::de::DeserializeOwned,
    {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ReferenceError::Load(path.display().to_string(), e.to_string()))?;
        let raw: Vec<ReferenceEntry<R>> = serde_json::from_str(&json)
            .map_err(|e| ReferenceError::Parse(path.display().to_string(), e.to_string()))?;
        Self::from_entries(raw.into_iter().map(|entry| (entry.name, entry.record)).collect())
    }
}

/// The two lookup domains the actions consult.
pub struct ReferenceData {
    pub symptoms: ReferenceStore<SymptomRecord>,
    pub medications: ReferenceStore<MedicationRecord>,
}

impl ReferenceData {
    /// Built-in tables, used unless file overrides are configured.
    pub fn builtin() -> Self {
        Self {
            symptoms: builtin_symptoms(),
            medications: builtin_medications(),
        }
    }

    /// Load stores from optional file overrides, falling back to the
    /// built-in tables.
    pub fn load(
        symptoms_file: Option<&Path>,
        medications_file: Option<&Path>,
    ) -> Result<Self, ReferenceError> {
        let symptoms = match symptoms_file {
            Some(path) => ReferenceStore::from_json_file(path)?,
            None => builtin_symptoms(),
        };
        let medications = match medications_file {
            Some(path) => ReferenceStore::from_json_file(path)?,
            None => builtin_medications(),
        };
        Ok(Self {
            symptoms,
            medications,
        })
    }
}

/// Built-in symptom guidance. Definition order is load-bearing: the
/// matcher's containment fallback takes the first key in this order.
pub fn builtin_symptoms() -> ReferenceStore<SymptomRecord> {
    ReferenceStore {
        entries: vec![
            (
                "dolor de cabeza".into(),
                SymptomRecord {
                    medication: "paracetamol".into(),
                    form: "tabletas 500 mg".into(),
                    dose: "500–1000 mg cada 6–8 h (máx. 3–4 g/día)".into(),
                    advice: "hidratarse, descanso".into(),
                },
            ),
            (
                "fiebre".into(),
                SymptomRecord {
                    medication: "paracetamol".into(),
                    form: "tabletas 500 mg".into(),
                    dose: "500–1000 mg cada 6–8 h (máx. 3–4 g/día)".into(),
                    advice: "bebidas frías, vigilar temperatura".into(),
                },
            ),
            (
                "diarrea".into(),
                SymptomRecord {
                    medication: "loperamida".into(),
                    form: "tabletas 2 mg".into(),
                    dose: "2 mg tras cada deposición (máx. 8 mg/día)".into(),
                    advice: "soluciones de rehidratación oral".into(),
                },
            ),
            (
                "tos".into(),
                SymptomRecord {
                    medication: "dextrometorfano".into(),
                    form: "jarabe".into(),
                    dose: "según etiqueta (adultos: 10–20 mg c/4–6 h)".into(),
                    advice: "miel/limón, evitar irritantes".into(),
                },
            ),
            (
                "acidez estomacal".into(),
                SymptomRecord {
                    medication: "omeprazol".into(),
                    form: "cápsulas 20 mg".into(),
                    dose: "20 mg una vez al día (antes del desayuno)".into(),
                    advice: "evitar comidas copiosas/grasas".into(),
                },
            ),
        ],
    }
}

/// Built-in medication fact sheets, same ordering contract as
/// `builtin_symptoms`.
pub fn builtin_medications() -> ReferenceStore<MedicationRecord> {
    ReferenceStore {
        entries: vec![
            (
                "paracetamol".into(),
                MedicationRecord {
                    description: "Analgésico y antipirético.".into(),
                    presentation: "Tabletas 500–1000 mg; suspensión.".into(),
                    usage: "Dolor leve-moderado, fiebre.".into(),
                    dose: "Adultos: 500–1000 mg c/6–8 h (máx. 3–4 g/día).".into(),
                    effects: "Náuseas (raro: hepatotoxicidad por sobredosis).".into(),
                    warnings: "No exceder dosis máxima; precaución hepática.".into(),
                },
            ),
            (
                "ibuprofeno".into(),
                MedicationRecord {
                    description: "AINE analgésico/antiinflamatorio.".into(),
                    presentation: "Tabletas/cápsulas 200–400 mg.".into(),
                    usage: "Dolor musculoesquelético, cefalea, dismenorrea, fiebre.".into(),
                    dose: "200–400 mg c/6–8 h (máx. 1200 mg/día OTC).".into(),
                    effects: "Molestias gástricas, mareo.".into(),
                    warnings: "Evitar en úlcera o insuficiencia renal.".into(),
                },
            ),
            (
                "loperamida".into(),
                MedicationRecord {
                    description: "Antidiarreico que reduce motilidad intestinal.".into(),
                    presentation: "Tabletas 2 mg.".into(),
                    usage: "Diarrea aguda no complicada.".into(),
                    dose: "2 mg tras cada deposición (máx. 8 mg/día).".into(),
                    effects: "Estreñimiento, cólicos.".into(),
                    warnings: "Hidratación adecuada; no usar en diarrea con sangre/fiebre alta."
                        .into(),
                },
            ),
            (
                "dextrometorfano".into(),
                MedicationRecord {
                    description: "Antitusivo para tos seca irritativa.".into(),
                    presentation: "Jarabe/cápsulas.".into(),
                    usage: "Tos seca.".into(),
                    dose: "Adultos: 10–20 mg c/4–6 h (según etiqueta).".into(),
                    effects: "Somnolencia leve, mareo.".into(),
                    warnings: "Evitar combinar con alcohol; consultar si tos > 1 semana.".into(),
                },
            ),
            (
                "omeprazol".into(),
                MedicationRecord {
                    description: "IBP que reduce el ácido gástrico.".into(),
                    presentation: "Cápsulas 20 mg.".into(),
                    usage: "Acidez/ERGE.".into(),
                    dose: "20 mg antes del desayuno.".into(),
                    effects: "Dolor de cabeza, molestias GI.".into(),
                    warnings: "Uso prolongado bajo control médico.".into(),
                },
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seed: &str) -> SymptomRecord {
        SymptomRecord {
            medication: format!("{seed}-med"),
            form: format!("{seed}-form"),
            dose: format!("{seed}-dose"),
            advice: format!("{seed}-advice"),
        }
    }

    #[test]
    fn builtin_symptoms_keys_in_definition_order() {
        let store = builtin_symptoms();
        let keys: Vec<&str> = store.keys().collect();
        assert_eq!(
            keys,
            vec!["dolor de cabeza", "fiebre", "diarrea", "tos", "acidez estomacal"],
        );
    }

    #[test]
    fn builtin_medications_keys_in_definition_order() {
        let store = builtin_medications();
        let keys: Vec<&str> = store.keys().collect();
        assert_eq!(
            keys,
            vec!["paracetamol", "ibuprofeno", "loperamida", "dextrometorfano", "omeprazol"],
        );
    }

    #[test]
    fn builtin_tables_pass_store_validation() {
        ReferenceStore::from_entries(builtin_symptoms().entries).unwrap();
        ReferenceStore::from_entries(builtin_medications().entries).unwrap();
    }

    #[test]
    fn store_debug_renders_keys() {
        // Validation tests unwrap Result<ReferenceStore, _> in both
        // directions, which needs the store to be Debug.
        let rendered = format!("{:?}", builtin_symptoms());
        assert!(rendered.contains("dolor de cabeza"));
        assert!(rendered.contains("paracetamol"));
    }

    #[test]
    fn get_known_key() {
        let store = builtin_symptoms();
        let fever = store.get("fiebre").unwrap();
        assert_eq!(fever.medication, "paracetamol");
        assert_eq!(fever.advice, "bebidas frías, vigilar temperatura");
    }

    #[test]
    fn get_unknown_key_is_none() {
        let store = builtin_medications();
        assert!(store.get("aspirina").is_none());
        assert!(!store.contains("aspirina"));
    }

    #[test]
    fn first_key_follows_definition_order() {
        assert_eq!(builtin_symptoms().first_key(), Some("dolor de cabeza"));
        assert_eq!(builtin_medications().first_key(), Some("paracetamol"));
    }

    #[test]
    fn from_entries_normalizes_names_into_keys() {
        let store =
            ReferenceStore::from_entries(vec![("  Dolor Lumbar  ".into(), record("a"))]).unwrap();
        assert!(store.contains("dolor lumbar"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn from_entries_rejects_empty_key() {
        let err = ReferenceStore::from_entries(vec![("   ".into(), record("a"))]).unwrap_err();
        assert!(matches!(err, ReferenceError::EmptyKey(0)));
    }

    #[test]
    fn from_entries_rejects_duplicate_after_normalization() {
        let err = ReferenceStore::from_entries(vec![
            ("tos".into(), record("a")),
            (" TOS ".into(), record("b")),
        ])
        .unwrap_err();
        assert!(matches!(err, ReferenceError::DuplicateKey(key) if key == "tos"));
    }

    #[test]
    fn from_entries_rejects_incomplete_record() {
        let mut incomplete = record("a");
        incomplete.advice = "  ".into();
        let err =
            ReferenceStore::from_entries(vec![("gripe".into(), incomplete)]).unwrap_err();
        assert!(
            matches!(err, ReferenceError::IncompleteRecord { ref key, field } if key == "gripe" && field == "advice"),
        );
    }

    #[test]
    fn from_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("symptoms.json");
        let json = r#"[
            {"name": "Resfriado", "medication": "paracetamol", "form": "tabletas",
             "dose": "500 mg c/8 h", "advice": "reposo"}
        ]"#;
        std::fs::write(&path, json).unwrap();

        let store: ReferenceStore<SymptomRecord> =
            ReferenceStore::from_json_file(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("resfriado").unwrap().advice, "reposo");
    }

    #[test]
    fn from_json_file_missing_file_is_load_error() {
        let err = ReferenceStore::<SymptomRecord>::from_json_file(Path::new(
            "/nonexistent/symptoms.json",
        ))
        .unwrap_err();
        assert!(matches!(err, ReferenceError::Load(_, _)));
    }

    #[test]
    fn from_json_file_bad_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = ReferenceStore::<SymptomRecord>::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ReferenceError::Parse(_, _)));
    }

    #[test]
    fn load_without_overrides_uses_builtins() {
        let data = ReferenceData::load(None, None).unwrap();
        assert_eq!(data.symptoms.len(), 5);
        assert_eq!(data.medications.len(), 5);
    }
}

use crate::reference::{MedicationRecord, ReferenceStore, SymptomRecord};
use crate::text::title_case;

/// Builder for every user-facing text the actions emit. All copy is
/// Spanish; callers pass normalized store keys and their records.
pub struct MessageTemplates;

impl MessageTemplates {
    /// Symptom guidance card: 4 labeled fields, fixed order.
    pub fn symptom_record(key: &str, record: &SymptomRecord) -> String {
        format!(
            "🩺 *Recomendación para {}*\n\
             • Medicamento: {}\n\
             • Forma: {}\n\
             • Dosis: {}\n\
             • Consejos: {}",
            title_case(key),
            record.medication,
            record.form,
            record.dose,
            record.advice,
        )
    }

    /// Medication fact sheet: 6 labeled fields, fixed order.
    pub fn medication_record(key: &str, record: &MedicationRecord) -> String {
        format!(
            "💊 *{}*\n\
             • Descripción: {}\n\
             • Presentación: {}\n\
             • Uso recomendado: {}\n\
             • Dosis (orientativa): {}\n\
             • Efectos secundarios: {}\n\
             • Advertencias: {}",
            title_case(key),
            record.description,
            record.presentation,
            record.usage,
            record.dose,
            record.effects,
            record.warnings,
        )
    }

    /// "Did you mean" prompt for symptoms.
    pub fn symptom_suggestions(candidates: &[&str]) -> String {
        format!(
            "No identifiqué el síntoma con certeza. ¿Quisiste decir: {}?\n\
             También puedes pedir *lista de síntomas*.",
            candidates.join(", "),
        )
    }

    /// "Did you mean" prompt for medications. Echoes the raw query as
    /// the user typed it, before normalization.
    pub fn medication_suggestions(raw_query: &str, candidates: &[&str]) -> String {
        format!(
            "No encontré “{}”. ¿Te refieres a: {}?\n\
             También puedes pedir *lista de medicamentos*.",
            raw_query,
            candidates.join(", "),
        )
    }

    pub fn symptom_not_recognized() -> String {
        "No reconozco ese síntoma. Puedes pedir *lista de síntomas*.".to_string()
    }

    pub fn medication_not_recognized() -> String {
        "No reconozco ese medicamento. Puedes pedir *lista de medicamentos*.".to_string()
    }

    /// Bulleted symptom key list with header and closing instruction.
    pub fn symptom_list(store: &ReferenceStore<SymptomRecord>) -> String {
        Self::key_list("📋 *Síntomas disponibles*", store.keys())
    }

    /// Bulleted medication key list with header and closing instruction.
    pub fn medication_list(store: &ReferenceStore<MedicationRecord>) -> String {
        Self::key_list("📋 *Medicamentos disponibles*", store.keys())
    }

    fn key_list<'a>(header: &str, keys: impl Iterator<Item = &'a str>) -> String {
        let lines = keys
            .map(|key| format!("• {}", title_case(key)))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{header}\n{lines}\n\nEscribe uno para consultar.")
    }
}

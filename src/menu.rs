use crate::text::normalize;

/// Options on the bot's top-level menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    BySymptom,
    ByMedication,
    ShowMenu,
}

/// Inputs routed to the symptom flow (normalized forms, with and
/// without accents).
const SYMPTOM_CHOICES: [&str; 7] = [
    "1",
    "consultar síntoma",
    "consultar sintoma",
    "consultar por síntoma",
    "consultar por sintoma",
    "síntomas",
    "sintomas",
];

/// Inputs routed to the medication flow.
const MEDICATION_CHOICES: [&str; 4] = [
    "2",
    "consultar medicamento",
    "consultar por nombre",
    "medicamentos",
];

/// Classify raw menu text. Anything outside the two synonym sets shows
/// the menu again; there is no failure branch.
pub fn route(raw_text: &str) -> MenuChoice {
    let text = normalize(raw_text);
    if SYMPTOM_CHOICES.contains(&text.as_str()) {
        MenuChoice::BySymptom
    } else if MEDICATION_CHOICES.contains(&text.as_str()) {
        MenuChoice::ByMedication
    } else {
        MenuChoice::ShowMenu
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_shortcuts() {
        assert_eq!(route("1"), MenuChoice::BySymptom);
        assert_eq!(route("2"), MenuChoice::ByMedication);
    }

    #[test]
    fn symptom_synonyms_with_and_without_accents() {
        assert_eq!(route("consultar síntoma"), MenuChoice::BySymptom);
        assert_eq!(route("consultar sintoma"), MenuChoice::BySymptom);
        assert_eq!(route("consultar por síntoma"), MenuChoice::BySymptom);
        assert_eq!(route("sintomas"), MenuChoice::BySymptom);
    }

    #[test]
    fn medication_synonyms() {
        assert_eq!(route("consultar medicamento"), MenuChoice::ByMedication);
        assert_eq!(route("consultar por nombre"), MenuChoice::ByMedication);
        assert_eq!(route("medicamentos"), MenuChoice::ByMedication);
    }

    #[test]
    fn input_is_normalized_before_lookup() {
        assert_eq!(route("  SÍNTOMAS  "), MenuChoice::BySymptom);
        assert_eq!(route(" Medicamentos"), MenuChoice::ByMedication);
    }

    #[test]
    fn anything_else_shows_the_menu() {
        assert_eq!(route("hola"), MenuChoice::ShowMenu);
        assert_eq!(route("3"), MenuChoice::ShowMenu);
        assert_eq!(route(""), MenuChoice::ShowMenu);
    }
}

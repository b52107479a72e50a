//! Static medicine metadata keyed by classifier label.

use serde::Serialize;

/// Medicine metadata returned alongside each predicted label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineInfo {
    pub name: String,
    pub generic_name: String,
    pub category: String,
    pub dosage: String,
    pub side_effects: String,
    pub precautions: String,
}

struct Entry {
    label: &'static str,
    name: &'static str,
    generic_name: &'static str,
    category: &'static str,
    dosage: &'static str,
    side_effects: &'static str,
    precautions: &'static str,
}

const MEDICINES: &[Entry] = &[
    Entry {
        label: "paracetamol",
        name: "Paracetamol",
        generic_name: "Acetaminophen",
        category: "Antipyretic/Analgesic",
        dosage: "500-1000mg every 4-6 hours",
        side_effects: "Nausea, stomach upset, liver risk (high dose)",
        precautions: "Max 4g/day; avoid alcohol",
    },
    Entry {
        label: "ibuprofen",
        name: "Ibuprofen",
        generic_name: "Ibuprofen",
        category: "NSAID",
        dosage: "200-400mg every 4-6 hours with food",
        side_effects: "Stomach irritation, bleeding risk",
        precautions: "Avoid with ulcers; take with food",
    },
    Entry {
        label: "antacid",
        name: "Antacid",
        generic_name: "Al/Mg hydroxide",
        category: "Antacid",
        dosage: "1-2 tablets as needed",
        side_effects: "Diarrhea/constipation",
        precautions: "Separate from other meds by 1-2h",
    },
    Entry {
        label: "omeprazole",
        name: "Omeprazole",
        generic_name: "Omeprazole",
        category: "PPI",
        dosage: "20mg once daily before food",
        side_effects: "Headache, GI upset",
        precautions: "Short-term use; consult for long-term",
    },
    Entry {
        label: "cetirizine",
        name: "Cetirizine",
        generic_name: "Cetirizine",
        category: "Antihistamine",
        dosage: "10mg once daily",
        side_effects: "Drowsiness, dry mouth",
        precautions: "Caution with driving/alcohol",
    },
    Entry {
        label: "loratadine",
        name: "Loratadine",
        generic_name: "Loratadine",
        category: "Antihistamine (non-drowsy)",
        dosage: "10mg once daily",
        side_effects: "Headache, fatigue",
        precautions: "Generally well tolerated",
    },
    Entry {
        label: "dextromethorphan",
        name: "Dextromethorphan",
        generic_name: "Dextromethorphan",
        category: "Antitussive",
        dosage: "15-30mg every 4-6 hours",
        side_effects: "Drowsiness, nausea",
        precautions: "Avoid alcohol; do not drive",
    },
    Entry {
        label: "guaifenesin",
        name: "Guaifenesin",
        generic_name: "Guaifenesin",
        category: "Expectorant",
        dosage: "200-400mg every 4 hours",
        side_effects: "Nausea, headache",
        precautions: "Hydration recommended",
    },
];

/// Labels with a curated entry, in table order.
pub fn known_labels() -> impl Iterator<Item = &'static str> {
    MEDICINES.iter().map(|entry| entry.label)
}

/// Exact-match lookup in the curated table.
pub fn lookup(label: &str) -> Option<MedicineInfo> {
    MEDICINES
        .iter()
        .find(|entry| entry.label == label)
        .map(|entry| MedicineInfo {
            name: entry.name.to_string(),
            generic_name: entry.generic_name.to_string(),
            category: entry.category.to_string(),
            dosage: entry.dosage.to_string(),
            side_effects: entry.side_effects.to_string(),
            precautions: entry.precautions.to_string(),
        })
}

/// Curated record for `label`, or a generic one named after the label.
pub fn medicine_for(label: &str) -> MedicineInfo {
    lookup(label).unwrap_or_else(|| {
        let name = title_case(label);
        MedicineInfo {
            generic_name: name.clone(),
            name,
            category: "General".to_string(),
            dosage: "See package insert".to_string(),
            side_effects: "Varies".to_string(),
            precautions: "Consult professional".to_string(),
        }
    })
}

/// Upper-case the first letter of every alphabetic run and lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_label_uses_curated_record() {
        let info = medicine_for("paracetamol");
        assert_eq!(info.name, "Paracetamol");
        assert_eq!(info.generic_name, "Acetaminophen");
        assert_eq!(info.category, "Antipyretic/Analgesic");
    }

    #[test]
    fn unknown_label_is_synthesised() {
        let info = medicine_for("vitaminc");
        assert_eq!(info.name, "Vitaminc");
        assert_eq!(info.generic_name, "Vitaminc");
        assert_eq!(info.category, "General");
        assert_eq!(info.dosage, "See package insert");
        assert_eq!(info.side_effects, "Varies");
        assert_eq!(info.precautions, "Consult professional");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(lookup("Paracetamol").is_none());
        assert_eq!(medicine_for("Paracetamol").category, "General");
    }

    #[test]
    fn title_case_restarts_after_non_letters() {
        assert_eq!(title_case("vitamin_c"), "Vitamin_C");
        assert_eq!(title_case("ZINC oxide"), "Zinc Oxide");
        assert_eq!(title_case("b12 complex"), "B12 Complex");
    }

    #[test]
    fn table_has_eight_entries() {
        assert_eq!(known_labels().count(), 8);
    }

    #[test]
    fn serialises_with_camel_case_keys() {
        let value = serde_json::to_value(medicine_for("ibuprofen")).unwrap();
        assert_eq!(value["genericName"], "Ibuprofen");
        assert_eq!(value["sideEffects"], "Stomach irritation, bleeding risk");
    }
}

//! Turn a symptom description into ranked, enriched medicine recommendations.

use serde::Serialize;

use crate::{
    catalog::{self, MedicineInfo},
    model::{ScoredLabel, Scorer},
};

/// Maximum number of recommendations returned per query.
pub const TOP_K: usize = 3;

/// Confidence reported when the model cannot score its prediction.
pub const UNSCORED_CONFIDENCE: u8 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub medicine: MedicineInfo,
    /// Model probability as a whole percentage.
    pub confidence: u8,
}

/// Trim and lower-case user input the same way training text was prepared.
pub fn normalise_symptoms(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Percent confidence for a score, rounding halves to even.
pub fn confidence(score: Option<f64>) -> u8 {
    match score {
        Some(p) => (p * 100.0).round_ties_even().clamp(0.0, 100.0) as u8,
        None => UNSCORED_CONFIDENCE,
    }
}

/// Score already-normalised text and enrich the best [`TOP_K`] labels.
pub fn recommend(scorer: &dyn Scorer, text: &str) -> Vec<Recommendation> {
    scorer
        .score(text)
        .into_iter()
        .take(TOP_K)
        .map(|ScoredLabel { label, score }| Recommendation {
            medicine: catalog::medicine_for(&label),
            confidence: confidence(score),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<ScoredLabel>);

    impl Scorer for Fixed {
        fn score(&self, _text: &str) -> Vec<ScoredLabel> {
            self.0.clone()
        }
    }

    fn scored(label: &str, score: Option<f64>) -> ScoredLabel {
        ScoredLabel {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn keeps_top_three_in_order() {
        let scorer = Fixed(vec![
            scored("paracetamol", Some(0.5)),
            scored("ibuprofen", Some(0.3)),
            scored("vitaminc", Some(0.15)),
            scored("antacid", Some(0.05)),
        ]);
        let recs = recommend(&scorer, "fever");
        let names: Vec<&str> = recs.iter().map(|r| r.medicine.name.as_str()).collect();
        assert_eq!(names, vec!["Paracetamol", "Ibuprofen", "Vitaminc"]);
        assert_eq!(recs[2].medicine.category, "General");
        let confidences: Vec<u8> = recs.iter().map(|r| r.confidence).collect();
        assert_eq!(confidences, vec![50, 30, 15]);
    }

    #[test]
    fn fewer_classes_than_top_k() {
        let scorer = Fixed(vec![scored("antacid", Some(0.7)), scored("omeprazole", Some(0.3))]);
        assert_eq!(recommend(&scorer, "heartburn").len(), 2);
    }

    #[test]
    fn unscored_label_gets_placeholder_confidence() {
        let scorer = Fixed(vec![scored("guaifenesin", None)]);
        let recs = recommend(&scorer, "chesty cough");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].confidence, UNSCORED_CONFIDENCE);
    }

    #[test]
    fn confidence_rounds_half_to_even() {
        assert_eq!(confidence(Some(0.125)), 12);
        assert_eq!(confidence(Some(0.135)), 14);
        assert_eq!(confidence(Some(0.994)), 99);
        assert_eq!(confidence(Some(1.0)), 100);
        assert_eq!(confidence(Some(0.0)), 0);
    }

    #[test]
    fn normalisation_trims_and_lowercases() {
        assert_eq!(normalise_symptoms("  Severe HEADACHE \n"), "severe headache");
    }

    #[test]
    fn serialises_flat_record() {
        let rec = Recommendation {
            medicine: catalog::medicine_for("loratadine"),
            confidence: 42,
        };
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["name"], "Loratadine");
        assert_eq!(value["genericName"], "Loratadine");
        assert_eq!(value["confidence"], 42);
        assert!(value.get("medicine").is_none());
    }
}

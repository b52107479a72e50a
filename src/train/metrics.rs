//! Held-out evaluation: per-class precision, recall and F1.
//!
//! Counts come straight from the (truth, predicted) pairs so a row whose true
//! label was never predicted still counts against accuracy.

use std::{collections::BTreeSet, fmt};

/// Scores for one label on the held-out rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics plus accuracy and the macro/weighted averages.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: (f64, f64, f64),
    pub weighted_avg: (f64, f64, f64),
    pub support: usize,
}

/// Zero when the denominator is zero.
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl ClassificationReport {
    /// Compare predictions against ground truth, row by row.
    pub fn new(truth: &[String], predicted: &[String]) -> Self {
        let labels: BTreeSet<&str> = truth
            .iter()
            .chain(predicted)
            .map(String::as_str)
            .collect();

        let pairs = || truth.iter().zip(predicted);
        let classes: Vec<ClassMetrics> = labels
            .into_iter()
            .map(|label| {
                let tp = pairs().filter(|(t, p)| *t == label && *p == label).count();
                let predicted_pos = pairs().filter(|(_, p)| *p == label).count();
                let support = pairs().filter(|(t, _)| *t == label).count();
                let precision = ratio(tp, predicted_pos);
                let recall = ratio(tp, support);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                ClassMetrics {
                    label: label.to_string(),
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        let support = truth.len();
        let correct = pairs().filter(|(t, p)| t == p).count();
        let n_classes = classes.len().max(1) as f64;
        let macro_avg = classes.iter().fold((0.0, 0.0, 0.0), |acc, c| {
            (
                acc.0 + c.precision / n_classes,
                acc.1 + c.recall / n_classes,
                acc.2 + c.f1 / n_classes,
            )
        });
        let weighted_avg = classes.iter().fold((0.0, 0.0, 0.0), |acc, c| {
            let w = ratio(c.support, support);
            (
                acc.0 + c.precision * w,
                acc.1 + c.recall * w,
                acc.2 + c.f1 * w,
            )
        });

        Self {
            classes,
            accuracy: ratio(correct, support),
            macro_avg,
            weighted_avg,
            support,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.len())
            .chain(["weighted avg".len()])
            .max()
            .unwrap_or(0);
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.support
        )?;
        for (name, (p, r, f1)) in [
            ("macro avg", self.macro_avg),
            ("weighted avg", self.weighted_avg),
        ] {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, p, r, f1, self.support
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn perfect_predictions_score_one() {
        let y = strings(&["a", "b", "a"]);
        let report = ClassificationReport::new(&y, &y);
        assert_eq!(report.accuracy, 1.0);
        assert!(report.classes.iter().all(|c| c.f1 == 1.0));
        assert_eq!(report.macro_avg, (1.0, 1.0, 1.0));
    }

    #[test]
    fn per_class_counts() {
        let truth = strings(&["a", "a", "b", "b"]);
        let pred = strings(&["a", "b", "b", "b"]);
        let report = ClassificationReport::new(&truth, &pred);
        let a = &report.classes[0];
        let b = &report.classes[1];
        assert_eq!((a.precision, a.recall, a.support), (1.0, 0.5, 2));
        assert!((b.precision - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(b.recall, 1.0);
        assert_eq!(report.accuracy, 0.75);
    }

    #[test]
    fn miss_on_never_predicted_label_lowers_accuracy() {
        let truth = strings(&["a", "b", "b"]);
        let pred = strings(&["a", "a", "a"]);
        let report = ClassificationReport::new(&truth, &pred);
        assert!((report.accuracy - 1.0 / 3.0).abs() < 1e-12);
        let b = report.classes.iter().find(|c| c.label == "b").unwrap();
        assert_eq!((b.recall, b.support), (0.0, 2));
    }

    #[test]
    fn label_only_predicted_has_zero_support() {
        let truth = strings(&["a", "a"]);
        let pred = strings(&["a", "z"]);
        let report = ClassificationReport::new(&truth, &pred);
        let z = report.classes.iter().find(|c| c.label == "z").unwrap();
        assert_eq!((z.precision, z.recall, z.f1, z.support), (0.0, 0.0, 0.0, 0));
    }

    #[test]
    fn display_lists_every_class() {
        let y = strings(&["antacid", "cetirizine"]);
        let text = ClassificationReport::new(&y, &y).to_string();
        assert!(text.contains("antacid"));
        assert!(text.contains("cetirizine"));
        assert!(text.contains("weighted avg"));
    }
}

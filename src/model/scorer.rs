//! Scoring strategies chosen once when a pipeline is loaded.

use std::{cmp::Ordering, sync::Arc};

use super::Pipeline;

/// A class label with its probability, if the model can produce one.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLabel {
    pub label: String,
    pub score: Option<f64>,
}

/// Ranks candidate labels for a normalised symptom text, best first.
pub trait Scorer: Send + Sync {
    fn score(&self, text: &str) -> Vec<ScoredLabel>;
}

/// Every class with its probability, sorted descending.
pub struct ProbabilisticScorer {
    pipeline: Pipeline,
}

impl ProbabilisticScorer {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }
}

impl Scorer for ProbabilisticScorer {
    fn score(&self, text: &str) -> Vec<ScoredLabel> {
        let probs = self.pipeline.predict_proba_one(text);
        let mut scored: Vec<ScoredLabel> = self
            .pipeline
            .classes()
            .iter()
            .zip(probs)
            .map(|(label, p)| ScoredLabel {
                label: label.clone(),
                score: Some(p),
            })
            .collect();
        // Stable: equal probabilities keep class order.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored
    }
}

/// A single hard prediction without a score.
pub struct HardLabelScorer {
    pipeline: Pipeline,
}

impl HardLabelScorer {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }
}

impl Scorer for HardLabelScorer {
    fn score(&self, text: &str) -> Vec<ScoredLabel> {
        vec![ScoredLabel {
            label: self.pipeline.predict_one(text),
            score: None,
        }]
    }
}

/// Pick the scorer matching what the pipeline's classifier supports.
pub fn scorer_for(pipeline: Pipeline) -> Arc<dyn Scorer> {
    if pipeline.classifier.supports_probabilities() {
        Arc::new(ProbabilisticScorer::new(pipeline))
    } else {
        Arc::new(HardLabelScorer::new(pipeline))
    }
}

//! One-vs-rest linear classifier fitted with `linfa-logistic`.

use linfa::{dataset::DatasetBase, prelude::Fit};
use linfa_logistic::LogisticRegression;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ModelError;

/// How decision values are turned into scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Link {
    /// Sigmoid per class, normalised across classes. Supports probabilities.
    Logistic,
    /// Raw margins only; the model can produce hard labels but no probabilities.
    Margin,
}

/// Training knobs for the per-class binary fits.
#[derive(Debug, Clone)]
pub struct ClassifierParams {
    pub max_iterations: u64,
    /// L2 penalty strength handed to the logistic solver.
    pub alpha: f64,
    pub link: Link,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            alpha: 1.0,
            link: Link::Logistic,
        }
    }
}

/// One binary logistic model per class, stored as a weight matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneVsRestClassifier {
    /// Known labels in sorted order. Row `i` of `coef` scores `classes[i]`.
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    pub link: Link,
}

impl OneVsRestClassifier {
    /// Fit one "class vs rest" logistic regression for every distinct label.
    pub fn fit(
        features: &Array2<f64>,
        labels: &[String],
        params: &ClassifierParams,
    ) -> Result<Self, ModelError> {
        if features.nrows() != labels.len() {
            return Err(ModelError::DimensionMismatch {
                expected: features.nrows(),
                found: labels.len(),
            });
        }
        let mut classes: Vec<String> = labels.to_vec();
        classes.sort();
        classes.dedup();
        if classes.len() < 2 {
            return Err(ModelError::TooFewClasses(classes.len()));
        }

        let mut coef = Vec::with_capacity(classes.len());
        let mut intercept = Vec::with_capacity(classes.len());
        for class in &classes {
            let targets: Array1<bool> = labels.iter().map(|label| label == class).collect();
            let dataset = DatasetBase::new(features.clone(), targets);
            let (weights, bias) = fit_binary(&dataset, class, params, params.max_iterations)?;

            // A run that stopped on its own lands on the same point given one
            // more iteration; a run cut off by the cap moves.
            let (next_weights, next_bias) =
                fit_binary(&dataset, class, params, params.max_iterations + 1)?;
            let drift = weights
                .iter()
                .zip(&next_weights)
                .map(|(a, b)| (a - b).abs())
                .fold((bias - next_bias).abs(), f64::max);
            if drift > CONVERGENCE_TOLERANCE {
                return Err(ModelError::NotConverged {
                    class: class.clone(),
                    max_iterations: params.max_iterations,
                });
            }

            coef.push(weights);
            intercept.push(bias);
            debug!(%class, "fitted binary model");
        }

        Ok(Self {
            classes,
            coef,
            intercept,
            link: params.link,
        })
    }

    pub fn n_features(&self) -> usize {
        self.coef.first().map(Vec::len).unwrap_or(0)
    }

    pub fn supports_probabilities(&self) -> bool {
        self.link == Link::Logistic
    }

    /// Per-class margins `w·x + b` for one feature row.
    pub fn decision_function(&self, row: ArrayView1<'_, f64>) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(weights, bias)| {
                weights
                    .iter()
                    .zip(row.iter())
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
                    + bias
            })
            .collect()
    }

    /// Normalised one-vs-rest probabilities, aligned with `classes`.
    pub fn predict_proba(&self, row: ArrayView1<'_, f64>) -> Vec<f64> {
        let raw: Vec<f64> = self
            .decision_function(row)
            .into_iter()
            .map(sigmoid)
            .collect();
        let total: f64 = raw.iter().sum();
        if total > 0.0 {
            raw.into_iter().map(|p| p / total).collect()
        } else {
            vec![1.0 / self.classes.len() as f64; self.classes.len()]
        }
    }

    /// Arg-max label for one feature row. Ties resolve to the earlier class.
    pub fn predict_one(&self, row: ArrayView1<'_, f64>) -> &str {
        let margins = self.decision_function(row);
        let mut best = 0;
        for (idx, margin) in margins.iter().enumerate().skip(1) {
            if *margin > margins[best] {
                best = idx;
            }
        }
        &self.classes[best]
    }

    /// Hard labels for every row of `features`.
    pub fn predict(&self, features: ArrayView2<'_, f64>) -> Vec<String> {
        features
            .rows()
            .into_iter()
            .map(|row| self.predict_one(row).to_string())
            .collect()
    }
}

/// Largest parameter change tolerated between the capped fit and one more iteration.
const CONVERGENCE_TOLERANCE: f64 = 1e-6;

/// Fit "class vs rest" and return weights oriented so a positive margin means `class`.
fn fit_binary(
    dataset: &DatasetBase<Array2<f64>, Array1<bool>>,
    class: &str,
    params: &ClassifierParams,
    max_iterations: u64,
) -> Result<(Vec<f64>, f64), ModelError> {
    let fitted = LogisticRegression::default()
        .alpha(params.alpha)
        .max_iterations(max_iterations)
        .fit(dataset)
        .map_err(|err| ModelError::Fit {
            class: class.to_string(),
            reason: err.to_string(),
        })?;

    // The solver picks its own positive class.
    let sign = if fitted.labels().pos.class { 1.0 } else { -1.0 };
    let weights = fitted.params().iter().map(|w| sign * w).collect();
    Ok((weights, sign * fitted.intercept()))
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

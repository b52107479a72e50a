//! Stratified train/test partitioning with a fixed seed.

use std::collections::BTreeMap;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SplitError {
    #[error("dataset is empty")]
    Empty,
    #[error("test size must be in (0, 1), got {0}")]
    InvalidTestSize(f64),
    #[error("class {label:?} has {count} example(s); stratification needs at least 2")]
    TooFewMembers { label: String, count: usize },
    #[error("need at least two classes, found {0}")]
    TooFewClasses(usize),
}

/// Row indices for each side of the split.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Partition row indices so each label keeps roughly its share in both halves.
///
/// The test side holds `ceil(n * test_size)` rows, apportioned across labels by
/// largest remainder; every label keeps at least one training row. Rows are
/// shuffled per label with a seeded RNG, so the result is reproducible.
pub fn stratified_split(
    labels: &[String],
    test_size: f64,
    seed: u64,
) -> Result<Split, SplitError> {
    if labels.is_empty() {
        return Err(SplitError::Empty);
    }
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(SplitError::InvalidTestSize(test_size));
    }

    let mut by_label: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.iter().enumerate() {
        by_label.entry(label.as_str()).or_default().push(idx);
    }
    if let Some((label, rows)) = by_label.iter().find(|(_, rows)| rows.len() < 2) {
        return Err(SplitError::TooFewMembers {
            label: (*label).to_string(),
            count: rows.len(),
        });
    }
    if by_label.len() < 2 {
        return Err(SplitError::TooFewClasses(by_label.len()));
    }

    let n = labels.len();
    let n_test = ((n as f64) * test_size).ceil() as usize;
    let quotas = allocate(&by_label, n, n_test);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut split = Split {
        train: Vec::with_capacity(n - n_test),
        test: Vec::with_capacity(n_test),
    };
    for (mut rows, quota) in by_label.into_values().zip(quotas) {
        rows.shuffle(&mut rng);
        let (test, train) = rows.split_at(quota);
        split.test.extend_from_slice(test);
        split.train.extend_from_slice(train);
    }
    split.train.sort_unstable();
    split.test.sort_unstable();
    Ok(split)
}

/// Largest-remainder apportionment of `n_test` rows across classes.
fn allocate(by_label: &BTreeMap<&str, Vec<usize>>, n: usize, n_test: usize) -> Vec<usize> {
    let mut quotas = Vec::with_capacity(by_label.len());
    let mut remainders = Vec::with_capacity(by_label.len());
    for (idx, rows) in by_label.values().enumerate() {
        let exact = rows.len() as f64 * n_test as f64 / n as f64;
        quotas.push(exact.floor() as usize);
        remainders.push((idx, exact - exact.floor()));
    }

    let mut left = n_test.saturating_sub(quotas.iter().sum());
    remainders.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    for (idx, _) in remainders.iter().cycle().take(remainders.len() * 2) {
        if left == 0 {
            break;
        }
        let capacity = by_label
            .values()
            .nth(*idx)
            .map(|rows| rows.len() - 1)
            .unwrap_or(0);
        if quotas[*idx] < capacity {
            quotas[*idx] += 1;
            left -= 1;
        }
    }

    // Every class keeps at least one training row.
    for (quota, rows) in quotas.iter_mut().zip(by_label.values()) {
        *quota = (*quota).min(rows.len() - 1);
    }
    quotas
}

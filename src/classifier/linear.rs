//! Multinomial logistic regression.
//!
//! Softmax over a linear decision function, fitted with full-batch gradient
//! descent on the L2-regularized cross-entropy. Weights start at zero, so
//! fitting the same data twice produces the same model.

use crate::config::ClassifierConfig;
use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Gradient descent hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingOptions {
    pub learning_rate: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
    pub l2_penalty: f64,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        TrainingOptions::from(&ClassifierConfig::default())
    }
}

impl From<&ClassifierConfig> for TrainingOptions {
    fn from(config: &ClassifierConfig) -> Self {
        TrainingOptions {
            learning_rate: config.learning_rate,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
            l2_penalty: config.l2_penalty,
        }
    }
}

/// Summary of a finished fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    pub iterations: usize,
    pub loss: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// `n_features x n_classes`
    weights: Array2<f64>,
    bias: Array1<f64>,
}

impl LogisticRegression {
    /// Fit on `features` (one row per sample) and class indices `targets`.
    pub fn fit(
        features: &Array2<f64>,
        targets: &[usize],
        n_classes: usize,
        options: &TrainingOptions,
    ) -> Result<(Self, FitReport)> {
        let (n_samples, n_features) = features.dim();
        if n_samples == 0 {
            return Err(Error::Training("no training samples".to_string()));
        }
        if targets.len() != n_samples {
            return Err(Error::DimensionMismatch {
                expected: n_samples,
                actual: targets.len(),
            });
        }
        if n_classes < 2 {
            return Err(Error::Training(format!(
                "need at least two classes, got {}",
                n_classes
            )));
        }

        let mut one_hot = Array2::<f64>::zeros((n_samples, n_classes));
        for (row, &target) in targets.iter().enumerate() {
            if target >= n_classes {
                return Err(Error::Training(format!(
                    "target {} out of range for {} classes",
                    target, n_classes
                )));
            }
            one_hot[[row, target]] = 1.0;
        }

        let mut model = LogisticRegression {
            weights: Array2::zeros((n_features, n_classes)),
            bias: Array1::zeros(n_classes),
        };
        let scale = 1.0 / n_samples as f64;
        let mut previous_loss = f64::INFINITY;
        let mut report = FitReport {
            iterations: 0,
            loss: f64::INFINITY,
        };

        for iteration in 0..options.max_iterations {
            let mut probs = features.dot(&model.weights) + &model.bias;
            softmax_rows(&mut probs);

            let loss = cross_entropy(&probs, targets)
                + 0.5 * options.l2_penalty * model.weights.mapv(|w| w * w).sum();
            if !loss.is_finite() {
                return Err(Error::Training(format!(
                    "loss diverged at iteration {}, try a smaller learning rate",
                    iteration
                )));
            }
            report.loss = loss;
            if previous_loss - loss < options.tolerance {
                debug!(iteration, loss, "converged");
                break;
            }
            previous_loss = loss;

            let error = probs - &one_hot;
            let grad_weights =
                features.t().dot(&error) * scale + &model.weights * options.l2_penalty;
            let grad_bias = error.sum_axis(Axis(0)) * scale;
            model.weights.scaled_add(-options.learning_rate, &grad_weights);
            model.bias.scaled_add(-options.learning_rate, &grad_bias);

            report.iterations = iteration + 1;
            if report.iterations % 50 == 0 {
                trace!(iteration = report.iterations, loss, "training");
            }
        }

        Ok((model, report))
    }

    pub fn n_features(&self) -> usize {
        self.weights.nrows()
    }

    pub fn n_classes(&self) -> usize {
        self.weights.ncols()
    }

    /// Check that the bias has one entry per class.
    pub fn validate(&self) -> Result<()> {
        if self.bias.len() != self.n_classes() {
            return Err(Error::DimensionMismatch {
                expected: self.n_classes(),
                actual: self.bias.len(),
            });
        }
        Ok(())
    }

    /// Raw class scores for one sample.
    pub fn decision_function(&self, features: &[f64]) -> Result<Array1<f64>> {
        if features.len() != self.n_features() {
            return Err(Error::DimensionMismatch {
                expected: self.n_features(),
                actual: features.len(),
            });
        }
        Ok(ArrayView1::from(features).dot(&self.weights) + &self.bias)
    }

    pub fn predict_proba(&self, features: &[f64]) -> Result<Array1<f64>> {
        let scores = self.decision_function(features)?;
        let max = scores.fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let exp = scores.mapv(|v| (v - max).exp());
        let sum = exp.sum();
        Ok(exp / sum)
    }

    /// Index of the highest-scoring class; the lowest index wins ties.
    pub fn predict(&self, features: &[f64]) -> Result<usize> {
        let scores = self.decision_function(features)?;
        let mut best = 0;
        for (idx, &score) in scores.iter().enumerate() {
            if score > scores[best] {
                best = idx;
            }
        }
        Ok(best)
    }
}

fn softmax_rows(logits: &mut Array2<f64>) {
    for mut row in logits.rows_mut() {
        let max = row.fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row /= sum;
    }
}

fn cross_entropy(probs: &Array2<f64>, targets: &[usize]) -> f64 {
    let total: f64 = targets
        .iter()
        .enumerate()
        .map(|(row, &target)| -probs[[row, target]].max(1e-15).ln())
        .sum();
    total / targets.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn blobs() -> (Array2<f64>, Vec<usize>) {
        let features = array![
            [1.0, 0.0, 0.0],
            [0.9, 0.1, 0.0],
            [0.0, 1.0, 0.0],
            [0.1, 0.9, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.1, 0.9],
        ];
        (features, vec![0, 0, 1, 1, 2, 2])
    }

    #[test]
    fn test_separable_blobs_are_learned() {
        let (features, targets) = blobs();
        let (model, report) =
            LogisticRegression::fit(&features, &targets, 3, &TrainingOptions::default()).unwrap();
        assert!(report.iterations > 0);
        for (row, &target) in features.rows().into_iter().zip(targets.iter()) {
            let sample = row.to_vec();
            assert_eq!(model.predict(&sample).unwrap(), target);
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (features, targets) = blobs();
        let options = TrainingOptions::default();
        let (a, _) = LogisticRegression::fit(&features, &targets, 3, &options).unwrap();
        let (b, _) = LogisticRegression::fit(&features, &targets, 3, &options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_loss_decreases() {
        let (features, targets) = blobs();
        let short = TrainingOptions {
            max_iterations: 1,
            ..TrainingOptions::default()
        };
        let long = TrainingOptions {
            max_iterations: 100,
            ..TrainingOptions::default()
        };
        let (_, first) = LogisticRegression::fit(&features, &targets, 3, &short).unwrap();
        let (_, last) = LogisticRegression::fit(&features, &targets, 3, &long).unwrap();
        assert!((first.loss - (3.0f64).ln()).abs() < 1e-9);
        assert!(last.loss < first.loss);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (features, targets) = blobs();
        let (model, _) =
            LogisticRegression::fit(&features, &targets, 3, &TrainingOptions::default()).unwrap();
        let probs = model.predict_proba(&[0.3, 0.3, 0.4]).unwrap();
        assert!((probs.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_untrained_ties_pick_lowest_class() {
        let (features, targets) = blobs();
        let options = TrainingOptions {
            max_iterations: 0,
            ..TrainingOptions::default()
        };
        let (model, report) = LogisticRegression::fit(&features, &targets, 3, &options).unwrap();
        assert_eq!(report.iterations, 0);
        assert_eq!(model.predict(&[0.0, 1.0, 0.0]).unwrap(), 0);
    }

    #[test]
    fn test_dimension_mismatch_is_reported() {
        let (features, targets) = blobs();
        let (model, _) =
            LogisticRegression::fit(&features, &targets, 3, &TrainingOptions::default()).unwrap();
        assert!(matches!(
            model.predict(&[1.0, 0.0]),
            Err(Error::DimensionMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_rejects_single_class_and_empty_input() {
        let (features, _) = blobs();
        let options = TrainingOptions::default();
        assert!(LogisticRegression::fit(&features, &[0; 6], 1, &options).is_err());
        let empty = Array2::<f64>::zeros((0, 3));
        assert!(LogisticRegression::fit(&empty, &[], 3, &options).is_err());
    }
}

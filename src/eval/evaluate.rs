use log::info;
use serde::{Serialize, Deserialize};

use crate::dataset::converted::ConvertedSet;
use crate::dataset::raw::Label;
use crate::encoding::encoder::LABEL_VECTOR_LEN;
use crate::eval::predictor::Predictor;

/// Outcome of scoring a model over a converted set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Examples whose argmax prediction equals the stored label.
    pub correct: usize,
    pub total: usize,
    /// `confusion[true_label][predicted]`, `LABEL_VECTOR_LEN` square.
    /// Pairs with either index outside the table are left out.
    pub confusion: Vec<Vec<usize>>,
}

impl Evaluation {
    /// Fraction correct in [0, 1]; 0 for an empty set.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

/// Number of examples in `set` that `model` classifies correctly.
pub fn evaluate<P: Predictor + ?Sized>(model: &mut P, set: &ConvertedSet) -> usize {
    evaluate_report(model, set).correct
}

/// Scores `model` on every example of `set` and tallies a confusion matrix.
///
/// A prediction counts as correct when the argmax of the model's output equals
/// the example's raw label. Labels the model cannot produce (negative, or past
/// the end of its output) simply never match.
pub fn evaluate_report<P: Predictor + ?Sized>(model: &mut P, set: &ConvertedSet) -> Evaluation {
    let mut correct = 0usize;
    let mut confusion = vec![vec![0usize; LABEL_VECTOR_LEN]; LABEL_VECTOR_LEN];

    for (input, &label) in set.inputs().iter().zip(set.labels()) {
        let output = model.feed_forward(input);
        let predicted = argmax(&output);

        if matches_label(predicted, label) {
            correct += 1;
        }

        if let Ok(truth) = usize::try_from(label) {
            if truth < LABEL_VECTOR_LEN && predicted < LABEL_VECTOR_LEN {
                confusion[truth][predicted] += 1;
            }
        }
    }

    let report = Evaluation { correct, total: set.count(), confusion };
    info!(
        "evaluated {} examples: {} correct ({:.2}%)",
        report.total,
        report.correct,
        report.accuracy() * 100.0
    );
    report
}

fn matches_label(predicted: usize, label: Label) -> bool {
    usize::try_from(label).map_or(false, |truth| truth == predicted)
}

/// Index of the largest score.
///
/// Ties go to the lowest index and an empty slice yields 0. A later value
/// only wins when it is strictly greater than the current best.
pub fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = i;
        }
    }
    best
}

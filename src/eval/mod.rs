pub mod predictor;
pub mod evaluate;

pub use predictor::Predictor;
pub use evaluate::{argmax, evaluate, evaluate_report, Evaluation};

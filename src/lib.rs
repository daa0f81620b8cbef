pub mod error;
pub mod encoding;
pub mod dataset;
pub mod eval;
pub mod image_input;

// Convenience re-exports
pub use error::{Error, Result};
pub use encoding::{convert_image, convert_label, Bounds, Encoder, TargetVector, LABEL_VECTOR_LEN};
pub use dataset::{convert_set, convert_set_with, ConvertedSet, Label, MnistSet, RawDataset, RawImage};
pub use eval::{argmax, evaluate, evaluate_report, Evaluation, Predictor};

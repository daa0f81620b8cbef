use thiserror::Error;

/// Everything that can go wrong while converting or scoring a dataset.
///
/// Out-of-range labels are not errors: they encode to the fallback vector.
#[derive(Debug, Error)]
pub enum Error {
    /// The raw dataset (or a set being rebuilt from parts) does not have one
    /// label per image.
    #[error("dataset is inconsistent: {images} images but {labels} labels")]
    DatasetInconsistent { images: usize, labels: usize },

    /// A converted set whose target sequence is a different length than its
    /// input sequence.
    #[error("dataset is inconsistent: {inputs} input vectors but {targets} target vectors")]
    TargetsMisaligned { inputs: usize, targets: usize },

    /// A target vector that is not `LABEL_VECTOR_LEN` values long.
    #[error("target vector {index} has {len} values, expected {expected}")]
    TargetLength { index: usize, len: usize, expected: usize },

    /// An example index past the end of a converted set.
    #[error("index {index} is out of range for a set of {count} examples")]
    IndexOutOfRange { index: usize, count: usize },

    /// A validation split percentage above 100.
    #[error("validation split must be within 0..=100 percent, got {0}")]
    InvalidSplit(u8),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image decoding failed: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;

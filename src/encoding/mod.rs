pub mod bounds;
pub mod encoder;

pub use bounds::Bounds;
pub use encoder::{
    convert_image, convert_label, Encoder, TargetVector, DEFAULT_ENCODER, FALLBACK_INDEX,
    LABEL_VECTOR_LEN,
};

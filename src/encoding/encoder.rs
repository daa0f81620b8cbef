use crate::dataset::raw::Label;
use crate::encoding::bounds::Bounds;

/// Length of every target vector: ten digit classes plus the fallback slot.
pub const LABEL_VECTOR_LEN: usize = 11;

/// Table row used for labels outside `0..=9`.
pub const FALLBACK_INDEX: usize = 10;

pub type TargetVector = [f64; LABEL_VECTOR_LEN];
pub type LabelTable = [TargetVector; LABEL_VECTOR_LEN];

/// Encoder for the default bounds (A = 1.0, D = 0.0).
///
/// Its label table is built at compile time and lives in read-only memory;
/// `convert_label` hands out `&'static` views into it.
pub static DEFAULT_ENCODER: Encoder = Encoder::new(Bounds::DEFAULT);

/// Rows 0..=9 are one-hot at their own index, row 10 is all `deactivated`.
const fn build_table(bounds: Bounds) -> LabelTable {
    let mut table = [[bounds.deactivated; LABEL_VECTOR_LEN]; LABEL_VECTOR_LEN];
    let mut class = 0;
    while class < FALLBACK_INDEX {
        table[class][class] = bounds.activated;
        class += 1;
    }
    table
}

/// Pixel and label encoder for one pair of activation bounds.
///
/// The label table is owned and never exposed mutably, so every reference
/// returned by [`Encoder::label`] stays valid and unchanged for the encoder's
/// lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoder {
    bounds: Bounds,
    table: LabelTable,
}

impl Encoder {
    pub const fn new(bounds: Bounds) -> Encoder {
        Encoder { bounds, table: build_table(bounds) }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Scales every pixel into the bounds' interval. Length is preserved.
    pub fn image(&self, image: &[u8]) -> Vec<f64> {
        image.iter().map(|&v| self.bounds.scale(v)).collect()
    }

    /// One-hot target for digits 0..=9, the all-`deactivated` fallback
    /// row otherwise.
    pub fn label(&self, label: Label) -> &TargetVector {
        match usize::try_from(label) {
            Ok(class) if class < FALLBACK_INDEX => &self.table[class],
            _ => &self.table[FALLBACK_INDEX],
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        DEFAULT_ENCODER.clone()
    }
}

/// Converts a raw image with the default bounds.
pub fn convert_image(image: &[u8]) -> Vec<f64> {
    DEFAULT_ENCODER.image(image)
}

/// Looks up the default-bounds target vector for `label`.
pub fn convert_label(label: Label) -> &'static TargetVector {
    DEFAULT_ENCODER.label(label)
}

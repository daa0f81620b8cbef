/// Integer class label as handed over by a dataset loader. Digits are 0..=9;
/// any other value is accepted and encodes to the fallback target.
pub type Label = i32;

/// Row-major 8-bit grayscale pixels (784 for a 28×28 MNIST digit).
pub type RawImage = Vec<u8>;

/// The view of a loaded dataset that conversion needs.
///
/// Loaders report image and label counts separately so that a truncated or
/// mismatched pair of files is caught by `convert_set` instead of read past.
pub trait RawDataset {
    fn image_count(&self) -> usize;
    fn label_count(&self) -> usize;

    /// Pixels of example `index`; `index < image_count()`.
    fn image(&self, index: usize) -> &[u8];

    /// Label of example `index`; `index < label_count()`.
    fn label(&self, index: usize) -> Label;
}

/// In-memory raw dataset: images and labels in two parallel vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MnistSet {
    pub images: Vec<RawImage>,
    pub labels: Vec<Label>,
}

impl MnistSet {
    pub fn new(images: Vec<RawImage>, labels: Vec<Label>) -> MnistSet {
        MnistSet { images, labels }
    }
}

impl RawDataset for MnistSet {
    fn image_count(&self) -> usize {
        self.images.len()
    }

    fn label_count(&self) -> usize {
        self.labels.len()
    }

    fn image(&self, index: usize) -> &[u8] {
        &self.images[index]
    }

    fn label(&self, index: usize) -> Label {
        self.labels[index]
    }
}

pub mod raw;
pub mod converted;

pub use raw::{Label, MnistSet, RawDataset, RawImage};
pub use converted::{convert_set, convert_set_with, ConvertedSet};

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::dataset::raw::{Label, RawDataset};
use crate::encoding::encoder::{Encoder, DEFAULT_ENCODER, LABEL_VECTOR_LEN};
use crate::error::{Error, Result};

/// A dataset in the shape a ferrite-nn trainer consumes.
///
/// Three parallel sequences of equal length: scaled input vectors, target
/// vectors, and the untouched source labels. Index `i` refers to the same
/// source example in all three. Every constructor, deserialization included,
/// checks the lengths and the target width, so a `ConvertedSet` that exists is
/// always aligned.
///
/// Target vectors are stored as owned copies of the encoder's table rows so
/// the set can be serialized and moved independently of the encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SetParts")]
pub struct ConvertedSet {
    inputs: Vec<Vec<f64>>,
    outputs: Vec<Vec<f64>>,
    labels: Vec<Label>,
}

/// Unchecked wire form of a `ConvertedSet`.
#[derive(Deserialize)]
struct SetParts {
    inputs: Vec<Vec<f64>>,
    outputs: Vec<Vec<f64>>,
    labels: Vec<Label>,
}

impl TryFrom<SetParts> for ConvertedSet {
    type Error = Error;

    fn try_from(parts: SetParts) -> Result<ConvertedSet> {
        ConvertedSet::from_parts(parts.inputs, parts.outputs, parts.labels)
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Converts `raw` with the default bounds (A = 1.0, D = 0.0).
pub fn convert_set<D: RawDataset + ?Sized>(raw: &D) -> Result<ConvertedSet> {
    convert_set_with(&DEFAULT_ENCODER, raw)
}

/// Converts every example of `raw` with `encoder`.
///
/// # Errors
/// `Error::DatasetInconsistent` when the loader reports a different number of
/// images and labels. Nothing is converted in that case.
pub fn convert_set_with<D: RawDataset + ?Sized>(
    encoder: &Encoder,
    raw: &D,
) -> Result<ConvertedSet> {
    let images = raw.image_count();
    let labels = raw.label_count();
    if images != labels {
        warn!("refusing to convert dataset: {} images vs {} labels", images, labels);
        return Err(Error::DatasetInconsistent { images, labels });
    }

    let mut set = ConvertedSet {
        inputs: Vec::with_capacity(images),
        outputs: Vec::with_capacity(images),
        labels: Vec::with_capacity(images),
    };

    for i in 0..images {
        let label = raw.label(i);
        set.inputs.push(encoder.image(raw.image(i)));
        set.outputs.push(encoder.label(label).to_vec());
        set.labels.push(label);
    }

    debug!(
        "converted {} examples (activated = {}, deactivated = {})",
        set.count(),
        encoder.bounds().activated,
        encoder.bounds().deactivated
    );
    Ok(set)
}

// ---------------------------------------------------------------------------
// ConvertedSet
// ---------------------------------------------------------------------------

impl ConvertedSet {
    /// Assembles a set from already-encoded parts.
    ///
    /// # Errors
    /// `DatasetInconsistent` or `TargetsMisaligned` when the three sequences
    /// differ in length, `TargetLength` when a target vector is not
    /// `LABEL_VECTOR_LEN` values long.
    pub fn from_parts(
        inputs: Vec<Vec<f64>>,
        outputs: Vec<Vec<f64>>,
        labels: Vec<Label>,
    ) -> Result<ConvertedSet> {
        let set = ConvertedSet { inputs, outputs, labels };
        set.check_aligned()?;
        Ok(set)
    }

    fn check_aligned(&self) -> Result<()> {
        let images = self.inputs.len();
        if self.labels.len() != images {
            return Err(Error::DatasetInconsistent { images, labels: self.labels.len() });
        }
        if self.outputs.len() != images {
            return Err(Error::TargetsMisaligned { inputs: images, targets: self.outputs.len() });
        }
        if let Some((index, target)) = self.outputs.iter()
            .enumerate()
            .find(|(_, target)| target.len() != LABEL_VECTOR_LEN)
        {
            return Err(Error::TargetLength {
                index,
                len: target.len(),
                expected: LABEL_VECTOR_LEN,
            });
        }
        Ok(())
    }

    /// Number of examples.
    pub fn count(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Input and target vectors of example `index`.
    pub fn get_vects(&self, index: usize) -> Result<(&[f64], &[f64])> {
        match (self.inputs.get(index), self.outputs.get(index)) {
            (Some(input), Some(output)) => Ok((input.as_slice(), output.as_slice())),
            _ => Err(Error::IndexOutOfRange { index, count: self.count() }),
        }
    }

    pub fn inputs(&self) -> &[Vec<f64>] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Vec<f64>] {
        &self.outputs
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// `(input, target)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], &[f64])> + '_ {
        self.inputs.iter()
            .zip(self.outputs.iter())
            .map(|(input, output)| (input.as_slice(), output.as_slice()))
    }

    /// Applies one random permutation to all three sequences.
    pub fn shuffled<R: Rng + ?Sized>(self, rng: &mut R) -> ConvertedSet {
        let mut order: Vec<usize> = (0..self.count()).collect();
        order.shuffle(rng);

        let ConvertedSet { mut inputs, mut outputs, labels } = self;
        ConvertedSet {
            inputs: order.iter().map(|&i| std::mem::take(&mut inputs[i])).collect(),
            outputs: order.iter().map(|&i| std::mem::take(&mut outputs[i])).collect(),
            labels: order.iter().map(|&i| labels[i]).collect(),
        }
    }

    /// Splits off the last `val_pct` percent (rounded down) as a validation set.
    ///
    /// Returns `(train, validation)`; both keep their original order.
    pub fn split(self, val_pct: u8) -> Result<(ConvertedSet, ConvertedSet)> {
        if val_pct > 100 {
            return Err(Error::InvalidSplit(val_pct));
        }
        let total = self.count();
        let val_n = (total * val_pct as usize) / 100;
        let train_n = total - val_n;

        let ConvertedSet { mut inputs, mut outputs, mut labels } = self;
        let val = ConvertedSet {
            inputs: inputs.split_off(train_n),
            outputs: outputs.split_off(train_n),
            labels: labels.split_off(train_n),
        };
        let train = ConvertedSet { inputs, outputs, labels };
        debug!("split {} examples into {} train / {} validation", total, train_n, val_n);
        Ok((train, val))
    }

    /// Serializes the set to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a set written by `save_json`, rejecting misaligned files.
    pub fn load_json(path: &str) -> Result<ConvertedSet> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let parts: SetParts = serde_json::from_reader(reader)?;
        ConvertedSet::try_from(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::raw::MnistSet;
    use crate::encoding::{convert_label, Bounds};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample(n: usize) -> MnistSet {
        let images = (0..n).map(|i| vec![(i * 10) as u8; 4]).collect();
        let labels = (0..n).map(|i| i as Label).collect();
        MnistSet::new(images, labels)
    }

    #[test]
    fn mismatched_counts_are_rejected() {
        let raw = MnistSet::new(vec![vec![0; 4]; 3], vec![1, 2]);
        match convert_set(&raw) {
            Err(Error::DatasetInconsistent { images, labels }) => {
                assert_eq!((images, labels), (3, 2));
            }
            other => panic!("expected DatasetInconsistent, got {:?}", other),
        }
    }

    #[test]
    fn empty_dataset_converts_to_empty_set() {
        let set = convert_set(&MnistSet::default()).unwrap();
        assert_eq!(set.count(), 0);
        assert!(set.is_empty());
        assert!(matches!(
            set.get_vects(0),
            Err(Error::IndexOutOfRange { index: 0, count: 0 })
        ));
    }

    #[test]
    fn get_vects_past_end_fails() {
        let set = convert_set(&sample(3)).unwrap();
        assert!(set.get_vects(2).is_ok());
        assert!(matches!(
            set.get_vects(3),
            Err(Error::IndexOutOfRange { index: 3, count: 3 })
        ));
    }

    #[test]
    fn custom_encoder_is_used_for_both_vectors() {
        let enc = Encoder::new(Bounds::new(0.9, 0.1));
        let raw = MnistSet::new(vec![vec![0, 255]], vec![2]);
        let set = convert_set_with(&enc, &raw).unwrap();
        let (input, output) = set.get_vects(0).unwrap();
        assert!((input[0] - 0.1).abs() < 1e-12);
        assert!((input[1] - 0.9).abs() < 1e-12);
        assert_eq!(output, enc.label(2).as_slice());
    }

    #[test]
    fn shuffle_keeps_examples_aligned() {
        let set = convert_set(&sample(20)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let shuffled = set.clone().shuffled(&mut rng);

        assert_eq!(shuffled.count(), 20);
        let mut seen: Vec<Label> = shuffled.labels().to_vec();
        seen.sort();
        assert_eq!(seen, set.labels());

        for (i, &label) in shuffled.labels().iter().enumerate() {
            let (input, output) = shuffled.get_vects(i).unwrap();
            assert_eq!(output, convert_label(label).as_slice());
            assert_eq!(input, set.get_vects(label as usize).unwrap().0);
        }
    }

    #[test]
    fn split_takes_validation_from_the_tail() {
        let set = convert_set(&sample(10)).unwrap();
        let (train, val) = set.split(25).unwrap();
        assert_eq!(train.count(), 8);
        assert_eq!(val.count(), 2);
        assert_eq!(val.labels(), &[8, 9]);

        let (train, val) = convert_set(&sample(3)).unwrap().split(0).unwrap();
        assert_eq!((train.count(), val.count()), (3, 0));

        assert!(matches!(
            convert_set(&sample(3)).unwrap().split(101),
            Err(Error::InvalidSplit(101))
        ));
    }

    fn temp_path(name: &str) -> String {
        let file = format!("ferrite_mnist_{}_{}.json", name, std::process::id());
        std::env::temp_dir().join(file).to_string_lossy().into_owned()
    }

    #[test]
    fn from_parts_checks_lengths() {
        let target = convert_label(0).to_vec();
        assert!(ConvertedSet::from_parts(vec![vec![0.0]], vec![target.clone()], vec![0]).is_ok());
        assert!(matches!(
            ConvertedSet::from_parts(vec![vec![0.0]], vec![target], vec![]),
            Err(Error::DatasetInconsistent { images: 1, labels: 0 })
        ));
        assert!(matches!(
            ConvertedSet::from_parts(vec![vec![0.0]], vec![], vec![0]),
            Err(Error::TargetsMisaligned { inputs: 1, targets: 0 })
        ));
    }

    #[test]
    fn from_parts_rejects_short_targets() {
        assert!(matches!(
            ConvertedSet::from_parts(vec![vec![0.0]], vec![vec![1.0]], vec![0]),
            Err(Error::TargetLength { index: 0, len: 1, expected: LABEL_VECTOR_LEN })
        ));
    }

    #[test]
    fn misaligned_outputs_name_the_targets() {
        let err = ConvertedSet::from_parts(vec![vec![0.0]; 2], vec![], vec![0, 1]).unwrap_err();
        assert_eq!(err.to_string(), "dataset is inconsistent: 2 input vectors but 0 target vectors");
    }

    #[test]
    fn deserializing_misaligned_json_fails() {
        let json = r#"{"inputs":[[0.0],[0.0],[0.0]],"outputs":[],"labels":[0]}"#;
        assert!(serde_json::from_str::<ConvertedSet>(json).is_err());

        let json = r#"{"inputs":[[0.0]],"outputs":[[1.0]],"labels":[0]}"#;
        assert!(serde_json::from_str::<ConvertedSet>(json).is_err());
    }

    #[test]
    fn deserializing_aligned_json_succeeds() {
        let set = convert_set(&sample(2)).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(serde_json::from_str::<ConvertedSet>(&json).unwrap(), set);
    }

    #[test]
    fn json_round_trip_and_validation() {
        let path = temp_path("set_round_trip");

        // 30/255 only survives the trip with exact float parsing.
        let set = convert_set(&sample(4)).unwrap();
        assert_eq!(set.get_vects(3).unwrap().0[0], 30.0 / 255.0);
        set.save_json(&path).unwrap();
        assert_eq!(ConvertedSet::load_json(&path).unwrap(), set);

        std::fs::write(&path, r#"{"inputs":[[0.0]],"outputs":[],"labels":[3]}"#).unwrap();
        assert!(matches!(
            ConvertedSet::load_json(&path),
            Err(Error::TargetsMisaligned { inputs: 1, targets: 0 })
        ));
        std::fs::remove_file(&path).ok();
    }
}

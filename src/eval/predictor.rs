/// Anything that can score an input vector: a trained ferrite-nn `Network`,
/// a wrapper around another framework, or a plain closure in tests.
///
/// `feed_forward` takes `&mut self` because real networks cache their layer
/// activations during the forward pass.
pub trait Predictor {
    /// Returns one score per class, indexed like the target vectors.
    fn feed_forward(&mut self, input: &[f64]) -> Vec<f64>;
}

impl<F> Predictor for F
where
    F: FnMut(&[f64]) -> Vec<f64>,
{
    fn feed_forward(&mut self, input: &[f64]) -> Vec<f64> {
        self(input)
    }
}

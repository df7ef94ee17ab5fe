//! Feature extractor port - turns state text into a numeric vector

/// Maps state text to a fixed-length feature vector.
///
/// Implementations own their vocabulary. The same text must always produce
/// the same vector, and every vector has exactly `dimension()` entries.
pub trait FeatureExtractor {
    /// Length of every produced vector (`D`)
    fn dimension(&self) -> usize;

    /// Vectorize `text`
    fn vectorize(&self, text: &str) -> Vec<f64>;
}

impl<F: FeatureExtractor + ?Sized> FeatureExtractor for &F {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn vectorize(&self, text: &str) -> Vec<f64> {
        (**self).vectorize(text)
    }
}

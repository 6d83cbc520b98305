//! Measurement samples and the per-session sample store.
//!
//! [`SampleStore`] owns the measurement data of one calibration session.
//! It is append-only during capture and cleared explicitly with
//! [`SampleStore::reset`] once the session's outputs are persisted or
//! discarded.

use serde::{Deserialize, Serialize};

/// An 8-bit RGB triple.
///
/// Used both for commanded patch colors ("target") and averaged camera
/// responses ("captured"). Channel values are always in [0, 255]; results
/// of color correction are clamped back into this range on construction
/// via [`Rgb::from_f64`].
///
/// # Example
///
/// ```rust
/// use mcal_core::Rgb;
///
/// let white = Rgb::new(255, 255, 255);
/// assert!(white.is_gray());
/// assert!((white.luminance() - 255.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Black (0, 0, 0).
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White (255, 255, 255).
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a new RGB triple.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a triple from f64 channels, clamping each to [0, 255].
    ///
    /// Corrected colors with no physical display counterpart must never
    /// leave the representable range, so clamping is unconditional.
    #[inline]
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: r.clamp(0.0, 255.0).round() as u8,
            g: g.clamp(0.0, 255.0).round() as u8,
            b: b.clamp(0.0, 255.0).round() as u8,
        }
    }

    /// Channels as an f64 array.
    #[inline]
    pub fn to_f64(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Rec. 709 luma in [0, 255].
    #[inline]
    pub fn luminance(self) -> f64 {
        0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64
    }

    /// True if all three channels are equal (a grayscale patch).
    #[inline]
    pub fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

/// One measurement: a commanded patch color and the captured response.
///
/// Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Commanded patch color.
    pub target: Rgb,
    /// Averaged captured response.
    pub captured: Rgb,
}

/// Ordered collection of measurement pairs for one calibration session.
///
/// Created empty, mutated only by [`record`](SampleStore::record), cleared
/// only by an explicit [`reset`](SampleStore::reset). Insertion order is
/// preserved; the solver is order-independent, but the grayscale ramp
/// extraction sorts its own view by target luminance.
///
/// Not thread-safe by contract - the capture loop is the only writer and
/// analysis runs after capture completes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleStore {
    samples: Vec<Sample>,
}

impl SampleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a measurement pair. Always succeeds.
    pub fn record(&mut self, target: Rgb, captured: Rgb) {
        self.samples.push(Sample { target, captured });
    }

    /// Empties the store.
    ///
    /// Any correction matrix computed from the previous contents is no
    /// longer meaningful after this call.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if no samples have been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterates over samples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// All samples as a slice, in insertion order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Grayscale samples (equal target channels) sorted by ascending
    /// target luminance.
    ///
    /// This is the input view for gamma estimation; the store's own
    /// ordering is unaffected.
    pub fn gray_ramp(&self) -> Vec<Sample> {
        let mut ramp: Vec<Sample> = self
            .samples
            .iter()
            .copied()
            .filter(|s| s.target.is_gray())
            .collect();
        ramp.sort_by(|a, b| {
            a.target
                .luminance()
                .partial_cmp(&b.target.luminance())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ramp
    }

    /// First sample whose target matches `target` exactly.
    ///
    /// Used to look up the white/red/green/blue reference patches when
    /// deriving profile primaries.
    pub fn find_target(&self, target: Rgb) -> Option<&Sample> {
        self.samples.iter().find(|s| s.target == target)
    }
}

impl<'a> IntoIterator for &'a SampleStore {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

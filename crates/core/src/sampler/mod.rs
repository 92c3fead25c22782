use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// One waveform snapshot as delivered by the capture driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCapture {
    pub samples: Vec<i8>,
    pub sampling_rate: u32,
    /// Capture size declared to the platform. Grouping is computed from this
    /// value, the actual buffer may be shorter.
    pub capture_size: usize,
}

impl RawCapture {
    /// Creates a capture whose declared size matches the buffer length.
    pub fn new(samples: Vec<i8>, sampling_rate: u32) -> Self {
        let capture_size = samples.len();
        Self {
            samples,
            sampling_rate,
            capture_size,
        }
    }

    /// Reinterprets a platform byte buffer as signed 8-bit samples.
    pub fn from_bytes(bytes: &[u8], sampling_rate: u32, capture_size: usize) -> Self {
        Self {
            samples: bytes.iter().map(|&byte| byte as i8).collect(),
            sampling_rate,
            capture_size,
        }
    }

    pub fn with_capture_size(mut self, capture_size: usize) -> Self {
        self.capture_size = capture_size;
        self
    }

    /// Shorthand for [`sample`] on this capture.
    pub fn resample(&self, resolution: usize) -> AmplitudeVector {
        sample(self, resolution)
    }

    /// Shorthand for [`peak_amplitude`] on this capture.
    pub fn peak(&self) -> u8 {
        peak_amplitude(self)
    }
}

/// Averaged absolute sample magnitudes, one value per bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmplitudeVector(Vec<u8>);

impl AmplitudeVector {
    pub fn new(values: Vec<u8>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    /// Re-buckets the vector into `count` values.
    ///
    /// Shrinking uses the same truncated group mean as [`sample`]; growing
    /// repeats the nearest source bucket. Returns a clone when the length
    /// already matches.
    pub fn resample(&self, count: usize) -> AmplitudeVector {
        let len = self.0.len();
        if count == len {
            return self.clone();
        }
        if count == 0 || len == 0 {
            return AmplitudeVector::default();
        }
        if count > len {
            let values = (0..count).map(|i| self.0[i * len / count]).collect();
            return AmplitudeVector(values);
        }

        let group_size = len / count;
        let values = (0..count)
            .map(|i| {
                let start = (i * group_size).min(len);
                let end = (start + group_size).min(len);
                mean_truncated(self.0[start..end].iter().map(|&v| v as u32))
            })
            .collect();
        AmplitudeVector(values)
    }
}

impl Deref for AmplitudeVector {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<u8>> for AmplitudeVector {
    fn from(values: Vec<u8>) -> Self {
        Self(values)
    }
}

/// Reduces a raw capture to `resolution` averaged absolute amplitudes.
///
/// Groups hold `capture_size / resolution` samples; every slice is bounded by
/// the real buffer length, so a short buffer yields zero-valued tail groups
/// rather than a panic. A zero capture size or resolution yields an empty
/// vector.
pub fn sample(raw: &RawCapture, resolution: usize) -> AmplitudeVector {
    if raw.capture_size == 0 || resolution == 0 {
        return AmplitudeVector::default();
    }

    let len = raw.samples.len();
    let group_size = raw.capture_size / resolution;
    let values = (0..resolution)
        .map(|i| {
            let start = (i * group_size).min(len);
            let end = (start + group_size).min(len);
            mean_truncated(
                raw.samples[start..end]
                    .iter()
                    .map(|sample| sample.unsigned_abs() as u32),
            )
        })
        .collect();

    AmplitudeVector(values)
}

/// Largest absolute sample value in the capture, for diagnostic display.
pub fn peak_amplitude(raw: &RawCapture) -> u8 {
    raw.samples
        .iter()
        .map(|sample| sample.unsigned_abs())
        .max()
        .unwrap_or(0)
}

fn mean_truncated(values: impl Iterator<Item = u32>) -> u8 {
    let (sum, count) = values.fold((0u64, 0u64), |(sum, count), v| {
        (sum + u64::from(v), count + 1)
    });
    if count == 0 {
        0
    } else {
        (sum / count).min(u64::from(u8::MAX)) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(samples: &[i8]) -> RawCapture {
        RawCapture::new(samples.to_vec(), 44_100)
    }

    #[test]
    fn averages_absolute_values_per_group() {
        let raw = capture(&[10, -20, 30, -40, 50, -60, 70, -80]);
        assert_eq!(sample(&raw, 4).values(), &[15, 35, 55, 75]);
    }

    #[test]
    fn truncates_group_means() {
        let raw = capture(&[1, 2, -3, 3]);
        assert_eq!(sample(&raw, 2).values(), &[1, 3]);
    }

    #[test]
    fn zero_capture_size_is_empty() {
        let raw = capture(&[5, 6, 7]).with_capture_size(0);
        assert!(sample(&raw, 8).is_empty());
        assert!(sample(&capture(&[]), 8).is_empty());
    }

    #[test]
    fn length_matches_resolution_for_short_buffers() {
        let raw = capture(&[100, -100, 50]).with_capture_size(16);
        let amplitudes = sample(&raw, 4);

        assert_eq!(amplitudes.len(), 4);
        assert_eq!(amplitudes.values(), &[83, 0, 0, 0]);
    }

    #[test]
    fn uneven_division_drops_trailing_samples() {
        let raw = capture(&[4, 4, 4, 4, 4, 4, 4, 100]);
        let amplitudes = sample(&raw, 3);

        assert_eq!(amplitudes.values(), &[4, 4, 4]);
    }

    #[test]
    fn handles_most_negative_sample() {
        let raw = capture(&[i8::MIN, i8::MIN]);
        assert_eq!(sample(&raw, 1).values(), &[128]);
        assert_eq!(peak_amplitude(&raw), 128);
    }

    #[test]
    fn sampling_is_deterministic_and_bounded() {
        let samples: Vec<i8> = (0..1024).map(|i| ((i * 37) % 256) as u8 as i8).collect();
        let raw = RawCapture::new(samples, 8_000);

        for resolution in [1, 7, 32, 48, 64, 128] {
            let first = sample(&raw, resolution);
            assert_eq!(first.len(), resolution);
            assert_eq!(first, sample(&raw, resolution));
        }
    }

    #[test]
    fn peak_tracks_the_loudest_sample() {
        assert_eq!(peak_amplitude(&capture(&[3, -90, 12])), 90);
        assert_eq!(peak_amplitude(&capture(&[])), 0);
    }

    #[test]
    fn large_groups_do_not_overflow() {
        let raw = RawCapture::new(vec![i8::MIN; (1 << 25) + 8], 44_100);
        assert_eq!(sample(&raw, 1).values(), &[128]);

        let loud = AmplitudeVector::new(vec![255; 20_000_000]);
        assert_eq!(loud.resample(1).values(), &[255]);
    }

    #[test]
    fn from_bytes_reinterprets_as_signed() {
        let raw = RawCapture::from_bytes(&[0xff, 0x80, 0x10], 8_000, 3);
        assert_eq!(raw.samples, vec![-1, -128, 16]);
    }

    #[test]
    fn resample_shrinks_and_grows() {
        let amplitudes = AmplitudeVector::new(vec![10, 20, 30, 40]);

        assert_eq!(amplitudes.resample(4), amplitudes);
        assert_eq!(amplitudes.resample(2).values(), &[15, 35]);
        assert_eq!(amplitudes.resample(8).values(), &[10, 10, 20, 20, 30, 30, 40, 40]);
        assert!(amplitudes.resample(0).is_empty());
        assert!(AmplitudeVector::default().resample(3).is_empty());
    }
}

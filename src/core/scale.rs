use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const TICK_E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const TICK_E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const TICK_E2: f64 = std::f64::consts::SQRT_2;

/// Linear mapping from a data domain onto a pixel range.
///
/// The range may be inverted (`range_start > range_end`), which is how the
/// vertical axis maps larger values to smaller pixel offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    /// Builds a scale over the extent of `values`.
    ///
    /// A single distinct value is widened by half a unit on each side so the
    /// scale never collapses to zero width.
    pub fn from_extent(
        values: impl IntoIterator<Item = f64>,
        range: (f64, f64),
    ) -> ChartResult<Self> {
        let mut extent: Option<(f64, f64)> = None;
        for value in values.into_iter().filter(|value| value.is_finite()) {
            extent = Some(match extent {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }

        let Some((min, max)) = extent else {
            return Err(ChartError::InvalidData(
                "scale extent requires at least one finite value".to_owned(),
            ));
        };
        if min == max {
            return Self::new((min - 0.5, max + 0.5), range);
        }
        Self::new((min, max), range)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Maps a finite domain value to its pixel coordinate.
    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return Err(ChartError::InvalidData(
                "cannot invert a zero-width range".to_owned(),
            ));
        }
        let normalized = (pixel - self.range_start) / range_span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Human-friendly tick values covering the domain, roughly `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain_start, self.domain_end, count)
    }
}

/// Returns round tick values (multiples of 1, 2 or 5 times a power of ten)
/// inside `[start, stop]`, in ascending order.
#[must_use]
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    let (low, high) = if start <= stop {
        (start, stop)
    } else {
        (stop, start)
    };
    if low == high {
        return vec![low];
    }

    let Some((first, last, increment)) = tick_spec(low, high, count as f64) else {
        return Vec::new();
    };
    if last < first {
        return Vec::new();
    }

    (first..=last)
        .map(|index| {
            let index = index as f64;
            if increment < 0.0 {
                index / -increment
            } else {
                index * increment
            }
        })
        .collect()
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= TICK_E10 {
        10.0
    } else if error >= TICK_E5 {
        5.0
    } else if error >= TICK_E2 {
        2.0
    } else {
        1.0
    };

    let (mut first, mut last, increment);
    if power < 0.0 {
        let inverse = 10f64.powf(-power) / factor;
        first = (start * inverse).round() as i64;
        last = (stop * inverse).round() as i64;
        if (first as f64) / inverse < start {
            first += 1;
        }
        if (last as f64) / inverse > stop {
            last -= 1;
        }
        increment = -inverse;
    } else {
        let step = 10f64.powf(power) * factor;
        first = (start / step).round() as i64;
        last = (stop / step).round() as i64;
        if (first as f64) * step < start {
            first += 1;
        }
        if (last as f64) * step > stop {
            last -= 1;
        }
        increment = step;
    }

    if last < first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((first, last, increment))
}

#[cfg(test)]
mod tests {
    use super::{LinearScale, nice_ticks};

    #[test]
    fn inverted_range_maps_larger_values_upwards() {
        let scale = LinearScale::new((0.0, 100.0), (400.0, 0.0)).expect("scale");
        assert_eq!(scale.domain_to_pixel(0.0).expect("px"), 400.0);
        assert_eq!(scale.domain_to_pixel(100.0).expect("px"), 0.0);
        assert_eq!(scale.domain_to_pixel(25.0).expect("px"), 300.0);
    }

    #[test]
    fn ticks_use_round_steps() {
        assert_eq!(
            nice_ticks(0.0, 10.0, 5),
            vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]
        );
        assert_eq!(nice_ticks(2015.0, 2026.0, 10).len(), 12);
        assert_eq!(nice_ticks(0.0, 1.0, 4), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }
}

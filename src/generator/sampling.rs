use fastrand::Rng;
use std::ops::RangeInclusive;

/// Discrete distribution sampled with a cumulative-weight table and a single
/// uniform draw.
#[derive(Debug, Clone)]
pub struct WeightedChoice<T> {
    items: Vec<T>,
    cumulative: Vec<f64>,
}

impl<T: Copy> WeightedChoice<T> {
    /// Non-positive weights are dropped. Returns `None` if nothing is left.
    pub fn new<I: IntoIterator<Item = (T, f64)>>(weighted: I) -> Option<Self> {
        let mut items = Vec::new();
        let mut cumulative = Vec::new();
        let mut total = 0.0;

        for (item, weight) in weighted {
            if weight <= 0.0 || !weight.is_finite() {
                continue;
            }
            total += weight;
            items.push(item);
            cumulative.push(total);
        }

        if items.is_empty() {
            None
        } else {
            Some(Self { items, cumulative })
        }
    }

    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn sample(&self, rng: &mut Rng) -> T {
        self.pick(rng.f64() * self.total())
    }

    /// Maps a point in `[0, total)` onto its bucket.
    pub fn pick(&self, point: f64) -> T {
        let idx = self.cumulative.partition_point(|&edge| edge <= point);
        self.items[idx.min(self.items.len() - 1)]
    }
}

/// Heights in `domain` that satisfy every active adjacency predicate
/// relative to `previous`.
pub fn candidate_heights(
    domain: &RangeInclusive<u8>,
    previous: Option<u8>,
    min_delta: Option<u8>,
    max_delta: Option<u8>,
) -> Vec<u8> {
    domain
        .clone()
        .filter(|&h| match previous {
            None => true,
            Some(prev) => {
                let delta = h.abs_diff(prev);
                min_delta.is_none_or(|min| delta >= min) && max_delta.is_none_or(|max| delta <= max)
            }
        })
        .collect()
}

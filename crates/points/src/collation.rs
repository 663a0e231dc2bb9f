use crate::{Point, PointsError, Result};
use icu_collator::{AlternateHandling, CollatorOptions, Strength};
use icu_locid::locale;
use std::cmp::Ordering;

/// Locale-aware ordering of point keys.
///
/// Matches `en_US.UTF-8` `strcoll` conventions: letters compare
/// case-insensitively first with lowercase ahead on ties, and punctuation
/// (`_`, `:`) is ignorable at the primary level. Keys that collate equal are
/// broken by byte order so the result is a total order.
pub struct Collator {
    inner: icu_collator::Collator,
}

impl Collator {
    pub fn en_us() -> Result<Self> {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Quaternary);
        options.alternate_handling = Some(AlternateHandling::Shifted);

        let inner = icu_collator::Collator::try_new(&locale!("en-US").into(), options)
            .map_err(|err| PointsError::CollatorError(err.to_string()))?;
        Ok(Self { inner })
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.inner.compare(a, b).then_with(|| a.cmp(b))
    }

    /// Order points by their `prefix:local_name` key
    pub fn sort(&self, mut points: Vec<Point>) -> Vec<Point> {
        points.sort_by(|a, b| self.compare(a.key(), b.key()));
        points
    }

    pub fn sort_keys(&self, keys: &mut [String]) {
        keys.sort_by(|a, b| self.compare(a, b));
    }
}

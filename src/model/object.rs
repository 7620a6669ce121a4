use std::ops::Deref;

use rosu_map::{section::hit_objects::HitObject, Beatmap};

use crate::error::{InvalidInput, RatingError};

/// A single object of the stream alongside its timing.
///
/// The payload `base` is opaque to the calculation; only the
/// [`Evaluator`](crate::Evaluator) inspects it.
#[derive(Clone, Debug, PartialEq)]
pub struct TimedObject<T> {
    pub idx: usize,
    pub base: T,
    /// Start time in milliseconds, already adjusted by the clock rate.
    pub start_time: f64,
    /// Time since the previous object, `0.0` for the first object.
    pub delta_time: f64,
}

impl<T> TimedObject<T> {
    /// The object `backwards_idx + 1` positions before this one.
    ///
    /// `previous(0, objects)` is the immediately preceding object. Returns
    /// `None` if the lookback reaches past the start of the stream.
    pub fn previous<'a>(
        &self,
        backwards_idx: usize,
        objects: &'a [TimedObject<T>],
    ) -> Option<&'a TimedObject<T>> {
        backwards_idx
            .checked_add(1)
            .and_then(|offset| self.idx.checked_sub(offset))
            .and_then(|idx| objects.get(idx))
    }

    /// The object `forwards_idx + 1` positions after this one.
    pub fn next<'a>(
        &self,
        forwards_idx: usize,
        objects: &'a [TimedObject<T>],
    ) -> Option<&'a TimedObject<T>> {
        forwards_idx
            .checked_add(1)
            .and_then(|offset| self.idx.checked_add(offset))
            .and_then(|idx| objects.get(idx))
    }
}

/// Owned, validated and chronologically ordered sequence of [`TimedObject`]s.
#[derive(Clone, Debug, PartialEq)]
pub struct TimedObjects<T> {
    inner: Vec<TimedObject<T>>,
}

impl<T> TimedObjects<T> {
    /// Creates the stream from start times (in milliseconds) and payloads.
    ///
    /// Delta times are derived from consecutive start times.
    pub fn new(items: impl IntoIterator<Item = (f64, T)>) -> Result<Self, RatingError> {
        Self::with_clock_rate(items, 1.0)
    }

    /// Same as [`TimedObjects::new`] but start and delta times are divided by
    /// the given clock rate.
    pub fn with_clock_rate(
        items: impl IntoIterator<Item = (f64, T)>,
        clock_rate: f64,
    ) -> Result<Self, RatingError> {
        if !(clock_rate.is_finite() && clock_rate > 0.0) {
            return Err(InvalidInput::InvalidClockRate(clock_rate).into());
        }

        let items = items.into_iter();
        let mut inner: Vec<TimedObject<T>> = Vec::with_capacity(items.size_hint().0);

        for (idx, (start_time, base)) in items.enumerate() {
            if !start_time.is_finite() {
                return Err(InvalidInput::NonFiniteStartTime { idx }.into());
            }

            let start_time = start_time / clock_rate;

            let delta_time = match inner.last() {
                Some(prev) if start_time < prev.start_time => {
                    return Err(InvalidInput::NonMonotonicStartTime {
                        idx,
                        start_time,
                        prev_start_time: prev.start_time,
                    }
                    .into());
                }
                Some(prev) => start_time - prev.start_time,
                None => 0.0,
            };

            inner.push(TimedObject {
                idx,
                base,
                start_time,
                delta_time,
            });
        }

        Ok(Self { inner })
    }

    /// Creates the stream from start times, delta times, and payloads.
    ///
    /// Useful when the delta time is not simply the gap between consecutive
    /// start times, e.g. when it's measured from the end of the previous
    /// object. Times are taken as-is, i.e. no clock rate is applied.
    pub fn from_parts(items: impl IntoIterator<Item = (f64, f64, T)>) -> Result<Self, RatingError> {
        let items = items.into_iter();
        let mut inner: Vec<TimedObject<T>> = Vec::with_capacity(items.size_hint().0);

        for (idx, (start_time, delta_time, base)) in items.enumerate() {
            if !start_time.is_finite() {
                return Err(InvalidInput::NonFiniteStartTime { idx }.into());
            }

            if !(delta_time.is_finite() && delta_time >= 0.0) {
                return Err(InvalidInput::NegativeDeltaTime { idx, delta_time }.into());
            }

            if let Some(prev) = inner.last().filter(|prev| start_time < prev.start_time) {
                return Err(InvalidInput::NonMonotonicStartTime {
                    idx,
                    start_time,
                    prev_start_time: prev.start_time,
                }
                .into());
            }

            inner.push(TimedObject {
                idx,
                base,
                start_time,
                delta_time,
            });
        }

        Ok(Self { inner })
    }

    /// Keeps only the first `len` objects.
    pub fn truncate(&mut self, len: usize) {
        self.inner.truncate(len);
    }

    pub fn as_slice(&self) -> &[TimedObject<T>] {
        &self.inner
    }

    pub fn into_inner(self) -> Vec<TimedObject<T>> {
        self.inner
    }

    /// Duration between the first and the last object.
    pub fn duration(&self) -> f64 {
        match (self.inner.first(), self.inner.last()) {
            (Some(first), Some(last)) => last.start_time - first.start_time,
            _ => 0.0,
        }
    }
}

impl<'a> TimedObjects<&'a HitObject> {
    /// Creates the stream from the hit objects of a parsed beatmap.
    pub fn from_map(map: &'a Beatmap, clock_rate: f64) -> Result<Self, RatingError> {
        let items = map.hit_objects.iter().map(|h| (h.start_time, h));

        Self::with_clock_rate(items, clock_rate)
    }
}

impl<T> Default for TimedObjects<T> {
    fn default() -> Self {
        Self { inner: Vec::new() }
    }
}

impl<T> Deref for TimedObjects<T> {
    type Target = [TimedObject<T>];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<'a, T> IntoIterator for &'a TimedObjects<T> {
    type Item = &'a TimedObject<T>;
    type IntoIter = std::slice::Iter<'a, TimedObject<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

use std::{ops::Deref, slice};

use crate::error::RatingError;

use super::strain::StrainAccumulator;

/// Peak strain of each section in chronological order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionPeaks(Vec<f64>);

impl SectionPeaks {
    pub fn push(&mut self, peak: f64) {
        self.0.push(peak);
    }

    /// Copy of the peaks sorted in descending order.
    pub fn sorted_desc(&self) -> Vec<f64> {
        let mut peaks = self.0.clone();
        peaks.sort_by(|a, b| b.total_cmp(a));

        peaks
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for SectionPeaks {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<f64>> for SectionPeaks {
    fn from(peaks: Vec<f64>) -> Self {
        Self(peaks)
    }
}

impl<'a> IntoIterator for &'a SectionPeaks {
    type Item = &'a f64;
    type IntoIter = slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Splits time into sections of fixed length and keeps track of the highest
/// strain within each of them.
///
/// Section boundaries are multiples of the section length and are
/// independent of object boundaries. When a section starts, its peak is
/// initialised to the carry-over strain at that instant so that sections
/// without objects still record the decayed strain.
///
/// The first section ends on the first boundary strictly after the first
/// object. This differs from rounding up with `ceil` only when the first
/// object sits exactly on a boundary: that object then opens a full section
/// instead of closing an empty one.
#[derive(Clone, Debug)]
pub(crate) struct SectionTracker {
    section_len: f64,
    skip_initial_sections: usize,
    curr_section_peak: f64,
    curr_section_end: Option<f64>,
    section_idx: usize,
    peaks: SectionPeaks,
}

impl SectionTracker {
    pub(crate) const fn new(section_len: f64, skip_initial_sections: usize) -> Self {
        Self {
            section_len,
            skip_initial_sections,
            curr_section_peak: 0.0,
            curr_section_end: None,
            section_idx: 0,
            peaks: SectionPeaks(Vec::new()),
        }
    }

    /// Closes all sections that end before `start_time`.
    ///
    /// Must be called before the object at `start_time` is added to the
    /// strain.
    pub(crate) fn advance_to(
        &mut self,
        start_time: f64,
        strain: &StrainAccumulator,
    ) -> Result<(), RatingError> {
        let Some(mut section_end) = self.curr_section_end else {
            // The first section ends on the first boundary after the first
            // object.
            let section_end = ((start_time / self.section_len).floor() + 1.0) * self.section_len;
            self.curr_section_end = Some(section_end);

            return Ok(());
        };

        while start_time > section_end {
            self.save_curr_peak();
            self.curr_section_peak = strain.initial_strain_at(section_end)?;
            section_end += self.section_len;
        }

        self.curr_section_end = Some(section_end);

        Ok(())
    }

    pub(crate) fn record(&mut self, strain: f64) {
        self.curr_section_peak = strain.max(self.curr_section_peak);
    }

    fn save_curr_peak(&mut self) {
        log_event!(trace: section = self.section_idx, peak = self.curr_section_peak, "closing section");

        if self.section_idx >= self.skip_initial_sections {
            self.peaks.push(self.curr_section_peak);
        }

        self.section_idx += 1;
    }

    /// Chronological peaks including the section in progress.
    pub(crate) fn into_peaks(mut self) -> SectionPeaks {
        if self.curr_section_end.is_some() {
            self.save_curr_peak();
        }

        self.peaks
    }
}

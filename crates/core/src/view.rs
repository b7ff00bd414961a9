use chrono::NaiveDate;

use crate::types::{DateSort, FilterCriteria, JobRecord, JobStatus};

/// Recomputes the displayed subset from the authoritative list and the
/// active criteria.
///
/// Pure: the input list is never mutated. The sort is stable, so records
/// sharing an applied date keep their arrival order.
pub fn derive_view(records: &[JobRecord], criteria: &FilterCriteria) -> Vec<JobRecord> {
    let mut result: Vec<JobRecord> = records
        .iter()
        .filter(|record| {
            criteria
                .status
                .map_or(true, |status| record.status == status)
        })
        .cloned()
        .collect();

    match criteria.date_sort {
        DateSort::Newest => result.sort_by(|a, b| b.applied_date.cmp(&a.applied_date)),
        DateSort::Oldest => result.sort_by(|a, b| a.applied_date.cmp(&b.applied_date)),
    }

    result
}

/// Per-status tallies over the unfiltered authoritative list.
///
/// Counters always reflect the whole dataset, independent of the active
/// filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub applied: usize,
    pub interview: usize,
    pub offer: usize,
    pub rejected: usize,
}

impl StatusCounts {
    /// Counts each status across the provided records.
    pub fn tally(records: &[JobRecord]) -> Self {
        let mut counts = Self::default();
        for record in records {
            match record.status {
                JobStatus::Applied => counts.applied += 1,
                JobStatus::Interview => counts.interview += 1,
                JobStatus::Offer => counts.offer += 1,
                JobStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }

    /// Returns the count for a single status.
    pub fn get(self, status: JobStatus) -> usize {
        match status {
            JobStatus::Applied => self.applied,
            JobStatus::Interview => self.interview,
            JobStatus::Offer => self.offer,
            JobStatus::Rejected => self.rejected,
        }
    }

    /// Sum of all four counters.
    pub fn total(self) -> usize {
        self.applied + self.interview + self.offer + self.rejected
    }
}

/// Human-readable distance between an applied date and today.
pub fn relative_day(date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - date).num_days();
    match days {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        -1 => "tomorrow".to_string(),
        d if d > 1 => format!("{d} days ago"),
        d => format!("in {} days", -d),
    }
}

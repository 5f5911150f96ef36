//! Folds resolved profiles into age and sex histograms.

use chrono::NaiveDate;

use crate::age::estimate_age;
use crate::types::{AgeBand, DemographicStats, ProfileRecord, SexBucket};

/// Builds the demographic histograms for `post_id` from resolved profiles.
///
/// Each record lands in exactly one age band and exactly one sex bucket.
/// Missing or malformed attributes are counted as unknown; nothing here can
/// fail, so one bad record never affects the rest.
#[must_use]
pub fn aggregate(post_id: u64, records: &[ProfileRecord], today: NaiveDate) -> DemographicStats {
    let mut stats = DemographicStats::empty(post_id);
    let mut malformed_bdates = 0usize;

    for record in records {
        let age = estimate_age(record.bdate.as_deref(), today);
        if age.is_none() && record.bdate.as_deref().is_some_and(has_year) {
            malformed_bdates += 1;
            tracing::debug!(
                actor_id = ?record.id,
                bdate = record.bdate.as_deref(),
                "unparseable birth date counted as unknown age"
            );
        }
        stats.record(AgeBand::from_age(age), SexBucket::from_code(record.sex));
    }

    if malformed_bdates > 0 {
        tracing::warn!(
            post_id,
            malformed_bdates,
            "some birth dates could not be parsed and were counted as unknown"
        );
    }

    stats
}

/// A `D.M` birth date is an expected hidden-year form, not a parse failure.
fn has_year(bdate: &str) -> bool {
    bdate.split('.').count() >= 3
}

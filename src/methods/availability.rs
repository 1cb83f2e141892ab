use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tokio::task::spawn_blocking;

use crate::POOL;
use crate::model::BookingStatus;

// General half-open interval test. Two windows [s1,e1) and [s2,e2) overlap
// iff s1 < e2 && s2 < e1; exactly-adjacent windows do not conflict.
pub fn overlaps(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    s1 < e2 && s2 < e1
}

// True when the vehicle already has an active reservation (pending,
// confirmed or in progress) overlapping the requested window. Cancelled and
// completed bookings never block a new one.
pub async fn has_conflict(
    _vehicle_id: i32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> QueryResult<bool> {
    let mut pool = POOL.get().unwrap();
    spawn_blocking(move || {
        use crate::schema::bookings::dsl::*;
        diesel::select(diesel::dsl::exists(
            bookings
                .filter(vehicle_id.eq(_vehicle_id))
                .filter(status.eq_any([
                    BookingStatus::Pending,
                    BookingStatus::Confirmed,
                    BookingStatus::InProgress,
                ]))
                .filter(start_at.lt(end))
                .filter(end_at.gt(start)),
        ))
        .get_result::<bool>(&mut pool)
    })
    .await
    .unwrap()
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn partial_overlap_conflicts() {
        // existing [10:00,12:00) vs new [11:00,13:00)
        assert!(overlaps(at(11), at(13), at(10), at(12)));
    }

    #[test]
    fn adjacent_windows_do_not_conflict() {
        // existing [10:00,12:00) vs new [12:00,14:00)
        assert!(!overlaps(at(12), at(14), at(10), at(12)));
        assert!(!overlaps(at(8), at(10), at(10), at(12)));
    }

    #[test]
    fn containment_conflicts_both_ways() {
        // the original two-clause check missed a new window that fully
        // contains an existing one; the general test must not
        assert!(overlaps(at(9), at(15), at(10), at(12)));
        assert!(overlaps(at(10), at(11), at(9), at(15)));
    }

    #[test]
    fn identical_windows_conflict() {
        assert!(overlaps(at(10), at(12), at(10), at(12)));
    }
}

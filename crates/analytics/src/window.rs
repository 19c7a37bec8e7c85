//! Order age and the eligibility window.
//!
//! Confirmation pages get reloaded and revisited long after checkout. Only
//! orders created or paid within the window are reported, so a revisit does
//! not push the same profit again.

use chrono::{DateTime, Duration, FixedOffset, Utc};

/// How long ago an order was created and, if it was, paid.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OrderAge {
    pub created_seconds: i64,
    /// `None` when no payment has been recorded. This is not the same as `Some(0)`.
    pub paid_seconds: Option<i64>,
}

impl OrderAge {
    /// Measure both ages against `now`.
    ///
    /// `now` is first re-expressed in the creation timestamp's offset and both
    /// ages are taken from that single reference instant.
    pub fn measure(
        now: DateTime<Utc>,
        created_at: DateTime<FixedOffset>,
        paid_at: Option<DateTime<FixedOffset>>,
    ) -> Self {
        let reference = now.with_timezone(created_at.offset());
        Self {
            created_seconds: (reference - created_at).num_seconds(),
            paid_seconds: paid_at.map(|paid| (reference - paid).num_seconds()),
        }
    }

    /// Created within `window`, or paid within `window`.
    ///
    /// Timestamps in the future give negative ages and count as within.
    pub fn within(&self, window: Duration) -> bool {
        let limit = window.num_seconds();
        self.created_seconds <= limit || self.paid_seconds.is_some_and(|paid| paid <= limit)
    }
}

//! Day bucketing: folds sparse event counts into one bucket per visible day

use chrono::{Datelike, Duration};

use crate::types::{Bucket, EventCounts, Window, DAYS_PER_WEEK, DAY_MS};

/// Aggregates raw event counts into the window's day buckets
pub struct GridBucketizer;

impl GridBucketizer {
    /// Build exactly `window.bucket_count` buckets, oldest first.
    /// Events outside `[first_day_start, end_exclusive)` are dropped.
    pub fn bucketize(events: &EventCounts, window: &Window) -> Vec<Bucket> {
        let counts = Self::day_totals(events, window);
        let first_date = window.first_date();

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| {
                let date = first_date + Duration::days(i as i64);
                Bucket {
                    year: date.year(),
                    month: date.month(),
                    day_of_month: date.day(),
                    weekday: date.weekday().num_days_from_sunday(),
                    week: i / DAYS_PER_WEEK,
                    count,
                }
            })
            .collect()
    }

    /// Per-day totals, indexed by day offset from the first shown day
    pub fn day_totals(events: &EventCounts, window: &Window) -> Vec<u64> {
        let first_day_start = window.first_day_start();
        let mut totals = vec![0u64; window.bucket_count];

        for (&timestamp, &count) in events {
            if let Some(index) = Self::day_index(timestamp, first_day_start, window.bucket_count) {
                totals[index] = totals[index].saturating_add(count);
            }
        }

        totals
    }

    /// Day offset of `timestamp`, or `None` when it falls outside the window
    pub fn day_index(timestamp: i64, first_day_start: i64, bucket_count: usize) -> Option<usize> {
        let index = timestamp.checked_sub(first_day_start)?.div_euclid(DAY_MS);
        if (0..bucket_count as i64).contains(&index) {
            Some(index as usize)
        } else {
            None
        }
    }
}

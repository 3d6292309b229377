//! Booking conflict detection and availability slot generation.
//!
//! Every interval here is half-open: `[start, end)`. A booking that ends at
//! 11:00 and one that starts at 11:00 do not conflict.

use chrono::{Duration, NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::models::{Booking, TimeSlot};

/// Whether `[existing_start, existing_end)` and `[query_start, query_end)` overlap.
pub fn overlaps<T: Ord>(existing_start: T, existing_end: T, query_start: T, query_end: T) -> bool {
    existing_start < query_end && query_start < existing_end
}

/// A proposed `[start, end)` interval on a classroom's day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }
}

/// First booking that would collide with `range` in `classroom_id` on `date`.
///
/// Cancelled bookings and the booking identified by `exclude` are ignored, the
/// latter so that a booking being edited never conflicts with itself.
pub fn find_conflict<'a, I>(
    bookings: I,
    classroom_id: Uuid,
    date: NaiveDate,
    range: TimeRange,
    exclude: Option<Uuid>,
) -> Option<&'a Booking>
where
    I: IntoIterator<Item = &'a Booking>,
{
    bookings.into_iter().find(|b| {
        b.classroom_id == classroom_id
            && b.date == date
            && Some(b.id) != exclude
            && b.status.occupies_slot()
            && overlaps(b.start_time, b.end_time, range.start, range.end)
    })
}

pub fn is_available<'a, I>(
    bookings: I,
    classroom_id: Uuid,
    date: NaiveDate,
    range: TimeRange,
    exclude: Option<Uuid>,
) -> bool
where
    I: IntoIterator<Item = &'a Booking>,
{
    find_conflict(bookings, classroom_id, date, range, exclude).is_none()
}

/// Shape of the bookable day used to render availability grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrid {
    pub day_start: NaiveTime,
    pub day_end: NaiveTime,
    pub step_minutes: u32,
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            day_end: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN),
            step_minutes: 30,
        }
    }
}

impl SlotGrid {
    /// Consecutive `[start, end)` ranges covering the day; the last one is clipped to `day_end`.
    pub fn ranges(&self) -> Vec<TimeRange> {
        let mut ranges = Vec::new();
        if self.step_minutes == 0 || self.day_start >= self.day_end {
            return ranges;
        }
        let step = Duration::minutes(i64::from(self.step_minutes));

        let mut start = self.day_start;
        while start < self.day_end {
            // overflowing_add_signed wraps at midnight; treat a wrap as the end of the day
            let (next, wrapped) = start.overflowing_add_signed(step);
            let end = if wrapped != 0 || next > self.day_end {
                self.day_end
            } else {
                next
            };
            ranges.push(TimeRange::new(start, end));
            start = end;
        }
        ranges
    }
}

/// Label every slot of `grid` as free or taken for `classroom_id` on `date`.
///
/// A taken slot carries the first conflicting booking in store order.
pub fn generate_slots(
    bookings: &[Booking],
    classroom_id: Uuid,
    date: NaiveDate,
    grid: &SlotGrid,
) -> Vec<TimeSlot> {
    let day: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.classroom_id == classroom_id && b.date == date)
        .collect();

    grid.ranges()
        .into_iter()
        .map(|range| {
            let booking =
                find_conflict(day.iter().copied(), classroom_id, date, range, None).cloned();
            TimeSlot {
                start: range.start,
                end: range.end,
                is_available: booking.is_none(),
                booking,
            }
        })
        .collect()
}

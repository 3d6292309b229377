use chrono::NaiveTime;

use crate::error::ApiError;
use crate::schedule::SlotGrid;

pub const MAX_SLOT_MINUTES: u32 = 240;

pub fn validate_name(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::BadRequest(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

pub fn validate_slot_grid(
    day_start: NaiveTime,
    day_end: NaiveTime,
    step_minutes: u32,
) -> Result<SlotGrid, ApiError> {
    if day_start >= day_end {
        return Err(ApiError::BadRequest("day start must be before day end".into()));
    }
    if !(1..=MAX_SLOT_MINUTES).contains(&step_minutes) {
        return Err(ApiError::BadRequest(format!(
            "slot length must be between 1 and {MAX_SLOT_MINUTES} minutes"
        )));
    }
    Ok(SlotGrid {
        day_start,
        day_end,
        step_minutes,
    })
}

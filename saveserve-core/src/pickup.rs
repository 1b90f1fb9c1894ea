//! Scheduled pickup slots on the NGO dashboard.
//!
//! A slot has a default time and can be postponed or brought forward with a
//! slider (-30 to +60 minutes in 15 minute steps). Edits are staged until
//! "Update Slot"; "Cancel" puts the slot back on its original time.

use serde::Serialize;

use crate::error::{CoreError, Result};

pub const MINUTES_PER_DAY: i32 = 24 * 60;
pub const ADJUST_MIN: i32 = -30;
pub const ADJUST_MAX: i32 = 60;
pub const ADJUST_STEP: i32 = 15;

/// Parse `hh:mm AM|PM` into minutes after midnight.
pub fn parse_clock(value: &str) -> Result<i32> {
    let (time, modifier) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| CoreError::invalid_clock(value, "missing AM/PM"))?;
    let (hours, minutes) = time
        .split_once(':')
        .ok_or_else(|| CoreError::invalid_clock(value, "missing ':'"))?;

    let mut hours: i32 = hours
        .parse()
        .map_err(|_| CoreError::invalid_clock(value, "hours are not a number"))?;
    let minutes: i32 = minutes
        .parse()
        .map_err(|_| CoreError::invalid_clock(value, "minutes are not a number"))?;
    if !(1..=12).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(CoreError::invalid_clock(value, "out of range"));
    }

    match modifier.trim().to_ascii_uppercase().as_str() {
        "AM" if hours == 12 => hours = 0,
        "AM" => {}
        "PM" if hours != 12 => hours += 12,
        "PM" => {}
        _ => return Err(CoreError::invalid_clock(value, "expected AM or PM")),
    }
    Ok(hours * 60 + minutes)
}

/// Render minutes after midnight as `h:mm AM|PM`, wrapping across midnight.
pub fn format_clock(total_minutes: i32) -> String {
    let total = total_minutes.rem_euclid(MINUTES_PER_DAY);
    let (h, m) = (total / 60, total % 60);
    let suffix = if h >= 12 { "PM" } else { "AM" };
    let h = match h % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", h, m, suffix)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PickupKind {
    Recurring,
    Adhoc,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickupSlot {
    pub title: String,
    pub location: String,
    pub kind: PickupKind,
    default_minutes: i32,
    adjustment: i32,
    editing: bool,
}

impl PickupSlot {
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        default_time: &str,
        kind: PickupKind,
    ) -> Result<Self> {
        Ok(Self {
            title: title.into(),
            location: location.into(),
            kind,
            default_minutes: parse_clock(default_time)?,
            adjustment: 0,
            editing: false,
        })
    }

    pub fn adjustment(&self) -> i32 {
        self.adjustment
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// "Reschedule" pressed.
    pub fn edit(&mut self) {
        self.editing = true;
    }

    /// Slider moved.
    pub fn set_adjustment(&mut self, minutes: i32) -> Result<()> {
        if !(ADJUST_MIN..=ADJUST_MAX).contains(&minutes) || minutes % ADJUST_STEP != 0 {
            return Err(CoreError::InvalidAdjustment { minutes });
        }
        self.adjustment = minutes;
        Ok(())
    }

    /// "Update Slot": keep the adjustment and close the editor.
    pub fn commit(&mut self) {
        self.editing = false;
    }

    /// "Cancel": back to the original time.
    pub fn cancel(&mut self) {
        self.adjustment = 0;
        self.editing = false;
    }

    pub fn current_time(&self) -> String {
        format_clock(self.default_minutes + self.adjustment)
    }

    /// Slider caption.
    pub fn label(&self) -> String {
        match self.adjustment {
            0 => "Original Time".to_string(),
            m if m > 0 => format!("Postpone {}m", m),
            m => format!("Prepone {}m", m.abs()),
        }
    }

    /// Badge next to the time, absent when unadjusted.
    pub fn badge(&self) -> Option<String> {
        match self.adjustment {
            0 => None,
            m if m > 0 => Some(format!("+{} min", m)),
            m => Some(format!("{} min", m)),
        }
    }
}

//! Derivation of break windows from the first break and spacing.
//!
//! Output is a fixed array of four optional slots. Slot `i` is computed from
//! slot 0 alone as `first + spacing * i` and is kept only if it fits inside
//! the shift. A slot that does not fit leaves a gap but does not move or
//! drop any later slot; later slots never depend on which earlier slots
//! were placed.

use rust_decimal::Decimal;

use crate::models::{BreakWindow, ShiftWindow};

use super::distribution::FirstBreak;
use super::time_math::offset_by_minutes;

/// Number of break slots a placement can fill.
pub const SLOT_COUNT: usize = 4;

/// Break slots indexed 0..4; `None` means no break in that slot.
pub type BreakSlots = [Option<BreakWindow>; SLOT_COUNT];

/// Computes the candidate window for `slot_index` and returns it if it lies
/// inside the shift.
///
/// Returns `None` when the window falls outside the shift or its instants
/// cannot be represented.
pub fn slot_window(shift: &ShiftWindow, first: &FirstBreak, slot_index: usize) -> Option<BreakWindow> {
    let shift_by = first.spacing * Decimal::from(slot_index);
    let start = offset_by_minutes(shift.start, first.first_start + shift_by)?;
    let end = offset_by_minutes(shift.start, first.first_end + shift_by)?;

    shift.contains(start, end).then_some(BreakWindow {
        start,
        end,
        slot_index,
    })
}

/// Derives the first `break_count` slots.
///
/// Slot 0 is expected to have passed the first-break bounds check already.
/// Slots past `break_count` stay empty.
///
/// # Example
///
/// ```
/// use break_engine::calculation::{derive_all, FirstBreak};
/// use break_engine::models::{DistributionType, ShiftWindow};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let shift = ShiftWindow::new(
///     "shift_001",
///     NaiveDateTime::parse_from_str("2025-03-14 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     NaiveDateTime::parse_from_str("2025-03-14 16:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// ).unwrap();
/// let first = FirstBreak {
///     distribution: DistributionType::AfterHours,
///     first_start: Decimal::from(120),
///     first_end: Decimal::from(135),
///     spacing: Decimal::from(135),
/// };
///
/// let slots = derive_all(&shift, &first, 4);
/// assert!(slots[0].is_some() && slots[1].is_some() && slots[2].is_some());
/// // 120 + 3 * 135 = 525 minutes, past the end of the shift
/// assert!(slots[3].is_none());
/// ```
pub fn derive_all(shift: &ShiftWindow, first: &FirstBreak, break_count: usize) -> BreakSlots {
    let mut slots: BreakSlots = Default::default();
    for (slot_index, slot) in slots.iter_mut().enumerate().take(break_count) {
        *slot = slot_window(shift, first, slot_index);
    }
    slots
}

/// Drops empty slots, keeping each window's `slot_index`.
pub fn compact(slots: BreakSlots) -> Vec<BreakWindow> {
    slots.into_iter().flatten().collect()
}

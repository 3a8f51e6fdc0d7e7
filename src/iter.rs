use std::iter::FusedIterator;

use crate::calendar::{Calendar, RataDie};
use crate::Date;

/// Lazy traversal over the days of a [`DateRange`](crate::DateRange), in
/// the direction implied by the range's endpoints.
///
/// The iterator is the traversal continuation: it captures the cursor,
/// the remaining length, the step direction, and a borrow of the
/// calendar when created, and nothing else. The consumer drives it
/// cooperatively —
///
/// - keep calling [`next`](Iterator::next) to continue;
/// - stop calling it to suspend, then resume later from the exact same
///   cursor (or [`Clone`] it to fork an independent resumption point);
/// - drop it to halt, leaving the range untouched and restartable.
///
/// Each yielded element costs exactly one `date_from_rata_die`
/// conversion; the sequence is never materialized.
#[derive(Debug, Clone)]
pub struct Iter<'a, C: Calendar> {
    calendar: &'a C,
    cursor: i64,
    step: i64,
    remaining: u64,
}

impl<'a, C: Calendar> Iter<'a, C> {
    /// Captures traversal state from a pair of endpoint day counts.
    /// Equal endpoints produce a single-element, ascending traversal.
    pub(crate) fn new(calendar: &'a C, first: RataDie, last: RataDie) -> Self {
        Self {
            calendar,
            cursor: first.get(),
            step: if first <= last { 1 } else { -1 },
            // Counting down to zero instead of comparing the cursor to a
            // bound keeps the cursor from ever stepping past the span.
            remaining: first.distance(last) + 1,
        }
    }

    /// Days not yet yielded
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl<C: Calendar> Iterator for Iter<'_, C> {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        if self.remaining == 0 {
            return None;
        }
        let date = Date::from_rata_die(self.calendar, RataDie::new(self.cursor));
        self.remaining -= 1;
        if self.remaining > 0 {
            self.cursor += self.step;
        }
        Some(date)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl<C: Calendar> FusedIterator for Iter<'_, C> {}

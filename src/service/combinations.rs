use crate::models::{BillCounts, Combo, DENOMINATIONS};
use std::sync::atomic::{AtomicU64, Ordering};

/// Every way to build `amount` without exceeding `cap` for any denomination.
///
/// Enumerates counts largest denomination first, each from its maximum down
/// to zero, then orders the result by fewest $1, then $5, then $10, then $20.
/// Empty when the amount cannot be built at all; `amount == 0` yields the
/// single all-zero combo.
pub fn generate(amount: u32, cap: &BillCounts) -> Vec<Combo> {
    let mut sink = Sink::unbounded();
    enumerate(0, amount, cap, BillCounts::default(), &mut sink);
    sink.finish()
}

/// Same as [`generate`], but charges every combo to `produced`, a counter that
/// may be shared by several callers. Returns `None` as soon as the shared
/// count goes past `max`, without finishing the enumeration.
pub fn generate_within(
    amount: u32,
    cap: &BillCounts,
    produced: &AtomicU64,
    max: u64,
) -> Option<Vec<Combo>> {
    let mut sink = Sink {
        combos: Vec::new(),
        limit: Some((produced, max)),
    };
    if enumerate(0, amount, cap, BillCounts::default(), &mut sink) {
        Some(sink.finish())
    } else {
        None
    }
}

struct Sink<'a> {
    combos: Vec<Combo>,
    limit: Option<(&'a AtomicU64, u64)>,
}

impl<'a> Sink<'a> {
    fn unbounded() -> Self {
        Self {
            combos: Vec::new(),
            limit: None,
        }
    }

    /// False once the shared limit is spent.
    fn push(&mut self, combo: Combo) -> bool {
        if let Some((produced, max)) = self.limit {
            if produced.fetch_add(1, Ordering::Relaxed) >= max {
                return false;
            }
        }
        self.combos.push(combo);
        true
    }

    fn finish(mut self) -> Vec<Combo> {
        self.combos.sort_by_key(BillCounts::preference_key);
        self.combos
    }
}

/// Returns false when the sink refused a combo and enumeration must stop.
fn enumerate(level: usize, remaining: u32, cap: &BillCounts, partial: Combo, sink: &mut Sink<'_>) -> bool {
    let d = DENOMINATIONS[level];
    let value = d.value();

    // Smallest denomination: whatever is left must be taken exactly.
    if level + 1 == DENOMINATIONS.len() {
        if remaining % value == 0 && remaining / value <= cap.get(d) {
            return sink.push(partial.with(d, remaining / value));
        }
        return true;
    }

    let max = (remaining / value).min(cap.get(d));
    for count in (0..=max).rev() {
        if !enumerate(
            level + 1,
            remaining - count * value,
            cap,
            partial.with(d, count),
            sink,
        ) {
            return false;
        }
    }
    true
}

use crate::models::CourseLedger;

/// Derived figures for one course. Never stored; recomputed from the records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerTotals {
    pub purchased_hours: f64,
    pub purchased_amount: f64,
    pub consumed_hours: f64,
    pub settled_amount: f64,
    pub profit: f64,
}

/// Contracted hours and price plus every top-up: `(hours, amount)`.
pub fn total_purchased(ledger: &CourseLedger) -> (f64, f64) {
    ledger.purchases.iter().fold(
        (ledger.hours, ledger.current_price),
        |(hours, amount), p| (hours + p.hours, amount + p.current_price),
    )
}

/// Hours delivered and amount paid out across all settlements: `(hours, amount)`.
pub fn total_settled(ledger: &CourseLedger) -> (f64, f64) {
    ledger
        .settlements
        .iter()
        .fold((0.0, 0.0), |(hours, amount), s| (hours + s.hours, amount + s.amount))
}

/// Per-hour rate of the initial contract. Zero when no hours were contracted.
pub fn initial_rate(ledger: &CourseLedger) -> f64 {
    if ledger.hours > 0.0 {
        ledger.current_price / ledger.hours
    } else {
        0.0
    }
}

/// Revenue for the consumed hours at the initial rate, minus what was settled
/// to the teacher. Top-up rates do not enter the calculation.
pub fn profit(ledger: &CourseLedger) -> f64 {
    let (consumed_hours, settled_amount) = total_settled(ledger);
    initial_rate(ledger) * consumed_hours - settled_amount
}

pub fn totals(ledger: &CourseLedger) -> LedgerTotals {
    let (purchased_hours, purchased_amount) = total_purchased(ledger);
    let (consumed_hours, settled_amount) = total_settled(ledger);
    LedgerTotals {
        purchased_hours,
        purchased_amount,
        consumed_hours,
        settled_amount,
        profit: initial_rate(ledger) * consumed_hours - settled_amount,
    }
}

use crate::models::{Allocation, BillCounts};
use serde::Serialize;
use std::io;

/// One line of the payout sheet.
#[derive(Debug, Serialize)]
struct PayoutRow<'a> {
    recipient: &'a str,
    amount: u64,
    #[serde(rename = "20")]
    twenties: u32,
    #[serde(rename = "10")]
    tens: u32,
    #[serde(rename = "5")]
    fives: u32,
    #[serde(rename = "1")]
    ones: u32,
}

impl<'a> PayoutRow<'a> {
    fn new(recipient: &'a str, amount: u64, counts: &BillCounts) -> Self {
        Self {
            recipient,
            amount,
            twenties: counts.twenties,
            tens: counts.tens,
            fives: counts.fives,
            ones: counts.ones,
        }
    }
}

/// Writes the allocation as CSV: one row per recipient, then a `remaining` row.
pub fn write_payout_sheet<W: io::Write>(allocation: &Allocation, writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);

    for breakdown in &allocation.breakdowns {
        let counts = breakdown
            .bills
            .iter()
            .fold(BillCounts::default(), |acc, bill| {
                acc.with(bill.denomination, acc.get(bill.denomination) + bill.quantity)
            });
        out.serialize(PayoutRow::new(&breakdown.id, u64::from(breakdown.amount), &counts))?;
    }

    let remaining = &allocation.remaining;
    out.serialize(PayoutRow::new("remaining", remaining.total_value(), remaining))?;
    out.flush()?;
    Ok(())
}

pub fn payout_sheet(allocation: &Allocation) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    write_payout_sheet(allocation, &mut buf)?;
    String::from_utf8(buf).map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillCount, Denomination, RecipientBreakdown};

    #[test]
    fn renders_rows_in_recipient_order_with_remaining_footer() {
        let allocation = Allocation {
            breakdowns: vec![
                RecipientBreakdown {
                    id: "sam".to_string(),
                    amount: 20,
                    bills: vec![BillCount {
                        denomination: Denomination::Twenty,
                        quantity: 1,
                    }],
                },
                RecipientBreakdown {
                    id: "kim".to_string(),
                    amount: 3,
                    bills: vec![BillCount {
                        denomination: Denomination::One,
                        quantity: 3,
                    }],
                },
            ],
            remaining: BillCounts::new(0, 1, 0, 2),
            steps: 2,
        };

        let sheet = payout_sheet(&allocation).unwrap();
        let lines: Vec<&str> = sheet.lines().collect();
        assert_eq!(
            lines,
            vec![
                "recipient,amount,20,10,5,1",
                "sam,20,1,0,0,0",
                "kim,3,0,0,0,3",
                "remaining,12,0,1,0,2",
            ]
        );
    }
}

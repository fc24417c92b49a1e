//! Continuation-line merging.
//!
//! PDF statements wrap long descriptions onto extra rows that carry no date.
//! Those rows are folded into the description of the dated row above them.

use ledgerlift_core::is_valid_date;

use crate::types::StatementLine;

/// Collapse continuation rows into the preceding dated row.
///
/// One output row per dated input row, in input order. Amounts on the dated
/// row are kept as they are; amounts on continuation rows are ignored.
/// Continuation rows with no dated row above them are dropped.
pub fn merge_descriptions(rows: Vec<StatementLine>) -> Vec<StatementLine> {
    let mut merged = Vec::new();
    let mut current: Option<StatementLine> = None;

    for row in rows {
        if is_valid_date(&row.date) {
            if let Some(done) = current.replace(row) {
                merged.push(done);
            }
            continue;
        }

        match current.as_mut() {
            Some(acc) => {
                acc.description = format!("{} {}", acc.description, row.description)
                    .trim()
                    .to_string();
            }
            None => {
                tracing::debug!(description = %row.description, "dropping leading continuation row");
            }
        }
    }

    merged.extend(current);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerlift_core::Cell;

    fn line(date: &str, description: &str) -> StatementLine {
        StatementLine {
            date: date.to_string(),
            description: description.to_string(),
            money_out: Cell::Empty,
            money_in: Cell::Empty,
            balance: Cell::Empty,
        }
    }

    fn descriptions(rows: &[StatementLine]) -> Vec<&str> {
        rows.iter().map(|r| r.description.as_str()).collect()
    }

    #[test]
    fn test_continuation_joins_description() {
        let merged = merge_descriptions(vec![line("01 Jan 2024", "Coffee"), line("", "Shop")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].description, "Coffee Shop");
        assert_eq!(merged[0].date, "01 Jan 2024");
    }

    #[test]
    fn test_multiple_continuations_and_rows() {
        let merged = merge_descriptions(vec![
            line("01 Jan 2024", "CARD PAYMENT TO"),
            line("", "TESCO STORES 3297"),
            line("", "ON 31 DEC"),
            line("02 Jan 2024", "SALARY"),
            line("03 Jan 2024", "RENT"),
            line("", "JANUARY"),
        ]);
        assert_eq!(
            descriptions(&merged),
            vec!["CARD PAYMENT TO TESCO STORES 3297 ON 31 DEC", "SALARY", "RENT JANUARY"]
        );
    }

    #[test]
    fn test_leading_continuations_dropped() {
        let merged = merge_descriptions(vec![
            line("", "Balance brought forward"),
            line("Date", "Description"),
            line("05 Apr 2023", "Coffee"),
        ]);
        assert_eq!(descriptions(&merged), vec!["Coffee"]);
    }

    #[test]
    fn test_blank_continuation_description_is_trimmed_away() {
        let merged = merge_descriptions(vec![line("05 Apr 2023", "Coffee"), line("", "")]);
        assert_eq!(merged[0].description, "Coffee");
    }

    #[test]
    fn test_amounts_of_dated_row_carried_forward() {
        let mut dated = line("05 Apr 2023", "Coffee");
        dated.money_out = Cell::from("3.50");
        dated.balance = Cell::from("96.50");
        let mut continuation = line("", "Shop");
        continuation.money_in = Cell::from("999.00");

        let merged = merge_descriptions(vec![dated, continuation]);
        assert_eq!(merged[0].money_out, Cell::from("3.50"));
        assert_eq!(merged[0].money_in, Cell::Empty);
        assert_eq!(merged[0].balance, Cell::from("96.50"));
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_descriptions(Vec::new()).is_empty());
    }
}

//! Plain-text rendering of a row table for terminals.

use shared::RowTableResponse;

const INDEX_HEADER: &str = "#";
const ADDRESS_HEADER: &str = "Address";
const AMOUNT_HEADER: &str = "Amount";

/// Render rows as aligned columns followed by the totals footer
///
/// Amounts are right-aligned. Rows that failed the advisory address check are
/// marked with `!`.
pub fn render_table(table: &RowTableResponse) -> String {
    let index_width = table
        .rows
        .iter()
        .map(|row| row.index.to_string().len())
        .chain(std::iter::once(INDEX_HEADER.len()))
        .max()
        .unwrap_or(1);
    let address_width = table
        .rows
        .iter()
        .map(|row| row.address.chars().count())
        .chain(std::iter::once(ADDRESS_HEADER.len()))
        .max()
        .unwrap_or(0);
    let amount_width = table
        .rows
        .iter()
        .map(|row| row.amount.len())
        .chain(std::iter::once(AMOUNT_HEADER.len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "{:>iw$}  {:<aw$}  {:>mw$}\n",
        INDEX_HEADER,
        ADDRESS_HEADER,
        AMOUNT_HEADER,
        iw = index_width,
        aw = address_width,
        mw = amount_width
    ));
    for row in &table.rows {
        let line = format!(
            "{:>iw$}  {:<aw$}  {:>mw$}",
            row.index,
            row.address,
            row.amount,
            iw = index_width,
            aw = address_width,
            mw = amount_width
        );
        out.push_str(line.trim_end());
        if row.address_valid == Some(false) {
            out.push_str("  !");
        }
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&render_footer(table));
    out
}

/// The two summary lines shown under the table
pub fn render_footer(table: &RowTableResponse) -> String {
    format!(
        "Total Addresses: {}\nTotal Amount: {}\n",
        table.total_addresses, table.total_amount
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::DisplayRow;

    fn table(rows: Vec<DisplayRow>, total: &str) -> RowTableResponse {
        RowTableResponse {
            total_addresses: rows.len(),
            rows,
            total_amount: total.to_string(),
            total_real_amount: String::new(),
            scale: 2,
        }
    }

    fn row(index: usize, address: &str, amount: &str, address_valid: Option<bool>) -> DisplayRow {
        DisplayRow {
            index,
            address: address.to_string(),
            amount: amount.to_string(),
            real_amount: String::new(),
            address_valid,
        }
    }

    #[test]
    fn test_footer() {
        let table = table(vec![row(0, "0xa", "1", None)], "1");
        assert_eq!(render_footer(&table), "Total Addresses: 1\nTotal Amount: 1\n");
    }

    #[test]
    fn test_render_aligns_columns() {
        let table = table(
            vec![row(0, "0xaaaa", "1,234.56", None), row(1, "0xb", "7", None)],
            "1,241.56",
        );

        let rendered = render_table(&table);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "#  Address    Amount");
        assert_eq!(lines[1], "0  0xaaaa   1,234.56");
        assert_eq!(lines[2], "1  0xb             7");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Total Addresses: 2");
        assert_eq!(lines[5], "Total Amount: 1,241.56");
    }

    #[test]
    fn test_render_marks_flagged_addresses() {
        let table = table(
            vec![row(0, "0xgood", "1", Some(true)), row(1, "bad", "2", Some(false))],
            "3",
        );

        let rendered = render_table(&table);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(!lines[1].ends_with('!'));
        assert!(lines[2].ends_with("  !"));
    }

    #[test]
    fn test_render_empty_table() {
        let rendered = render_table(&table(vec![], "0"));
        assert_eq!(rendered, "#  Address  Amount\n\nTotal Addresses: 0\nTotal Amount: 0\n");
    }
}

//! Table export: CSV and legacy Excel-HTML.
//!
//! Both exporters take an explicit snapshot of the rendered table (header and
//! data rows as display strings) instead of scraping the DOM, so export is a
//! pure function of the row model. An empty snapshot exports to an empty or
//! header-only file, never an error.

use base64::{engine::general_purpose, Engine as _};

/// Serializes rows to CSV text. Embedded newlines inside a cell are replaced
/// by a single space first; a cell that contained a comma, quote, or newline
/// is quoted with internal quotes doubled.
pub fn to_csv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| csv_field(cell))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn csv_field(cell: &str) -> String {
    let needs_quoting = cell.contains(',') || cell.contains('"') || cell.contains('\n');
    let flat = cell.replace(['\n', '\r'], " ");
    if needs_quoting {
        format!("\"{}\"", flat.replace('"', "\"\""))
    } else {
        flat
    }
}

const XLS_TEMPLATE_HEAD: &str = concat!(
    "<html xmlns:o=\"urn:schemas-microsoft-com:office:office\" ",
    "xmlns:x=\"urn:schemas-microsoft-com:office:excel\" ",
    "xmlns=\"http://www.w3.org/TR/REC-html40\"><head><!--[if gte mso 9]><xml>",
    "<x:ExcelWorkbook><x:ExcelWorksheets><x:ExcelWorksheet><x:Name>Export</x:Name>",
    "<x:WorksheetOptions><x:DisplayGridlines/></x:WorksheetOptions>",
    "</x:ExcelWorksheet></x:ExcelWorksheets></x:ExcelWorkbook></xml><![endif]-->",
    "</head><body><table>"
);

const XLS_TEMPLATE_TAIL: &str = "</table></body></html>";

/// Serializes rows to a legacy Excel `data:` URI: an HTML table wrapped in the
/// Office worksheet template, base64-encoded. The first row becomes the header.
pub fn to_xls_data_uri(rows: &[Vec<String>]) -> String {
    let mut table = String::from(XLS_TEMPLATE_HEAD);
    for (index, row) in rows.iter().enumerate() {
        let tag = if index == 0 { "th" } else { "td" };
        table.push_str("<tr>");
        for cell in row {
            let flat = cell.replace(['\n', '\r'], " ");
            table.push_str(&format!("<{tag}>{}</{tag}>", escape_html(&flat)));
        }
        table.push_str("</tr>");
    }
    table.push_str(XLS_TEMPLATE_TAIL);

    format!(
        "data:application/vnd.ms-excel;base64,{}",
        general_purpose::STANDARD.encode(table)
    )
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn plain_cells_pass_through() {
        let csv = to_csv(&rows(&[&["User", "Action"], &["eric", "login"]]));
        assert_eq!(csv, "User,Action\neric,login");
    }

    #[test]
    fn cell_with_comma_and_newline_is_quoted_and_flattened() {
        let csv = to_csv(&rows(&[&["a,b\nc"]]));
        assert_eq!(csv, "\"a,b c\"");
    }

    #[test]
    fn quotes_are_doubled() {
        let csv = to_csv(&rows(&[&["say \"hi\""]]));
        assert_eq!(csv, "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn newline_only_cell_is_still_quoted() {
        // The newline decided the quoting even though it is replaced by a space.
        let csv = to_csv(&rows(&[&["x\ny"]]));
        assert_eq!(csv, "\"x y\"");
    }

    #[test]
    fn empty_snapshot_exports_empty_output() {
        assert_eq!(to_csv(&[]), "");
        let uri = to_xls_data_uri(&[]);
        assert!(uri.starts_with("data:application/vnd.ms-excel;base64,"));
    }

    #[test]
    fn xls_escapes_markup_and_flattens_newlines() {
        let uri = to_xls_data_uri(&rows(&[&["Header"], &["<b>\nx</b>"]]));
        let payload = uri.split(',').nth(1).unwrap();
        let html = String::from_utf8(
            base64::engine::general_purpose::STANDARD.decode(payload).unwrap(),
        )
        .unwrap();
        assert!(html.contains("<th>Header</th>"));
        assert!(html.contains("<td>&lt;b&gt; x&lt;/b&gt;</td>"));
    }
}

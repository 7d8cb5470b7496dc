//! Minimal HTML extraction for the exchange's result pages.
//!
//! Only two shapes are needed: one `<table>` located by id, and the
//! `<option>` values of one `<select>` located by id. Both are found with
//! regular expressions; nested tables are not supported.

use bourse_core::error::DataError;
use regex::Regex;

/// Header cells and body rows of a table, with text content trimmed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl HtmlTable {
    /// Position of a header, compared case-insensitively.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    }
}

/// Precompiled patterns shared by every extraction.
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    row: Regex,
    cell: Regex,
    option: Regex,
    tag: Regex,
}

impl HtmlExtractor {
    pub fn new() -> Result<Self, DataError> {
        Ok(Self {
            row: compile(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>")?,
            cell: compile(r"(?is)<t([hd])\b[^>]*>(.*?)</t[hd]\s*>")?,
            option: compile(r#"(?is)<option\b[^>]*?\bvalue\s*=\s*["']([^"']*)["'][^>]*>"#)?,
            tag: compile(r"(?s)<[^>]*>")?,
        })
    }

    /// Extract the table with the given id.
    ///
    /// `<th>` cells become headers; rows without `<td>` cells are skipped.
    pub fn table(&self, html: &str, id: &str) -> Result<HtmlTable, DataError> {
        let body = element_body(html, "table", id)?
            .ok_or_else(|| DataError::MissingTable(id.to_string()))?;

        let mut table = HtmlTable::default();
        for row in self.row.captures_iter(body) {
            let inner = row.get(1).map_or("", |m| m.as_str());
            let mut data = Vec::new();
            for cell in self.cell.captures_iter(inner) {
                let is_header = cell.get(1).is_some_and(|m| m.as_str().eq_ignore_ascii_case("h"));
                let text = self.text(cell.get(2).map_or("", |m| m.as_str()));
                if is_header {
                    table.headers.push(text);
                } else {
                    data.push(text);
                }
            }
            if !data.is_empty() {
                table.rows.push(data);
            }
        }

        Ok(table)
    }

    /// Option values of the select element with the given id, in page order.
    pub fn select_options(&self, html: &str, id: &str) -> Result<Vec<String>, DataError> {
        let body = element_body(html, "select", id)?.ok_or_else(|| {
            DataError::DirectoryUnavailable(format!("select#{id} not found in page"))
        })?;

        Ok(self
            .option
            .captures_iter(body)
            .filter_map(|c| c.get(1))
            .map(|m| decode_entities(m.as_str().trim()))
            .collect())
    }

    fn text(&self, fragment: &str) -> String {
        let stripped = self.tag.replace_all(fragment, "");
        decode_entities(stripped.trim()).trim().to_string()
    }
}

fn compile(pattern: &str) -> Result<Regex, DataError> {
    Regex::new(pattern).map_err(|e| DataError::ParseError(e.to_string()))
}

/// Inner HTML of the first `<element id="...">`, `None` when absent.
fn element_body<'a>(html: &'a str, element: &str, id: &str) -> Result<Option<&'a str>, DataError> {
    let pattern = format!(
        r#"(?is)<{element}\b[^>]*\bid\s*=\s*["']?{}["']?[^>]*>(.*?)</{element}\s*>"#,
        regex::escape(id)
    );
    let re = compile(&pattern)?;
    Ok(re
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str()))
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table id="other"><tr><td>ignore</td></tr></table>
        <table id="resultsTable" class="table">
          <thead>
            <tr><th>Date</th><th>Last trade price</th><th> Volume </th></tr>
          </thead>
          <tbody>
            <tr><td>3/5/2024</td><td>1,234.50</td><td><span>1&nbsp;000</span></td></tr>
            <tr>
              <td>3/4/2024</td>
              <td></td>
              <td>17</td>
            </tr>
          </tbody>
        </table>
        <select id="Code" name="Code">
          <option value="ADIN">ADIN</option>
          <option selected="selected" value="ALK">ALK</option>
          <option value = 'KMB' >KMB</option>
        </select>
        </body></html>
    "#;

    #[test]
    fn test_table_by_id() {
        let extractor = HtmlExtractor::new().unwrap();
        let table = extractor.table(PAGE, "resultsTable").unwrap();

        assert_eq!(table.headers, vec!["Date", "Last trade price", "Volume"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["3/5/2024", "1,234.50", "1 000"]);
        assert_eq!(table.rows[1], vec!["3/4/2024", "", "17"]);
        assert_eq!(table.column("last trade price"), Some(1));
    }

    #[test]
    fn test_missing_table() {
        let extractor = HtmlExtractor::new().unwrap();
        let err = extractor.table("<html><p>No data</p></html>", "resultsTable").unwrap_err();

        assert_eq!(err, DataError::MissingTable("resultsTable".into()));
    }

    #[test]
    fn test_select_options() {
        let extractor = HtmlExtractor::new().unwrap();
        let options = extractor.select_options(PAGE, "Code").unwrap();

        assert_eq!(options, vec!["ADIN", "ALK", "KMB"]);
        assert!(matches!(
            extractor.select_options(PAGE, "Missing"),
            Err(DataError::DirectoryUnavailable(_))
        ));
    }
}

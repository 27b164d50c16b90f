//! Tolerant RFC 4180 parsing and writing for hand-edited spreadsheet exports.
//!
//! The parser accepts the corner cases the datasets actually exercise: quoted
//! fields with embedded commas, doubled quotes and literal newlines, CRLF line
//! endings, trailing blank lines and ragged rows. It never validates column
//! counts; that is the verify command's job.

/// Parse a full CSV document into rows of fields.
///
/// `"` toggles the quote region unless doubled inside one (which emits a
/// literal quote). Newlines inside a quote region are kept in the field;
/// outside one they terminate the row. Rows whose every field is the empty
/// string are dropped, so trailing blank lines do not produce phantom rows.
pub fn parse_document(input: &str) -> Vec<Vec<String>> {
    // Spreadsheet exports often lead with a UTF-8 BOM.
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                row.push(std::mem::take(&mut field));
            }
            // CRLF outside quotes is one row break; a quoted \r stays data.
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                row.push(std::mem::take(&mut field));
                if row.iter().any(|f| !f.is_empty()) {
                    rows.push(std::mem::take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        if row.iter().any(|f| !f.is_empty()) {
            rows.push(row);
        }
    }

    rows
}

/// Escape a single field for CSV output. Quoting only happens when the field
/// contains a comma, quote, or line break; embedded quotes are doubled.
pub fn escape_field(field: &str) -> String {
    if field.is_empty() {
        return String::new();
    }
    let escaped = field.replace('"', "\"\"");
    if escaped.contains(',')
        || escaped.contains('\n')
        || escaped.contains('\r')
        || escaped.contains('"')
    {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

/// Serialize rows back into a CSV document using [`escape_field`].
pub fn write_document(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|f| escape_field(f))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A parsed CSV document with header-keyed access to its data rows.
#[derive(Debug, Clone)]
pub struct Table {
    header: Vec<String>,
    records: Vec<Vec<String>>,
}

impl Table {
    /// Parse a document and treat the first row as the header. Returns `None`
    /// when the document has no rows at all.
    pub fn parse(input: &str) -> Option<Self> {
        let mut rows = parse_document(input);
        if rows.is_empty() {
            return None;
        }
        let header = rows.remove(0);
        Some(Self {
            header,
            records: rows,
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.records.iter().map(move |fields| Row {
            table: self,
            fields,
        })
    }
}

/// One data row, resolving columns by header name. Missing columns and short
/// (ragged) rows read as the empty string rather than erroring.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    fields: &'a [String],
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> &'a str {
        self.table
            .column_index(column)
            .and_then(|i| self.fields.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn fields(&self) -> &'a [String] {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_fields_on_commas() {
        let rows = parse_document("a,b,c\nd,e,f\n");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]);
    }

    #[test]
    fn quoted_fields_keep_commas_and_newlines() {
        let rows = parse_document("id,note\n1,\"line one\nline two, still\"\n");
        assert_eq!(rows[1], vec!["1", "line one\nline two, still"]);
    }

    #[test]
    fn doubled_quotes_parse_to_one_literal_quote() {
        let rows = parse_document("a\n\"He said \"\"hi\"\"\"\n");
        assert_eq!(rows[1], vec!["He said \"hi\""]);
    }

    #[test]
    fn quote_doubling_round_trips() {
        let original = "He said \"hi\"";
        let escaped = escape_field(original);
        assert_eq!(escaped, "\"He said \"\"hi\"\"\"");
        let rows = parse_document(&format!("{escaped}\n"));
        assert_eq!(rows[0][0], original);
    }

    #[test]
    fn trailing_blank_lines_are_dropped() {
        let with_blank = parse_document("a,b\n1,2\n\n");
        let without = parse_document("a,b\n1,2");
        assert_eq!(with_blank, without);
        assert_eq!(with_blank.len(), 2);
    }

    #[test]
    fn all_empty_rows_are_dropped_anywhere() {
        let rows = parse_document("a,b\n,\n1,2\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn crlf_endings_do_not_leak_into_fields() {
        let rows = parse_document("a,b\r\n1,2\r\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn quoted_trailing_carriage_return_is_data_not_line_ending() {
        let rows = parse_document("a,\"b\r\"\n");
        assert_eq!(rows, vec![vec!["a", "b\r"]]);
    }

    #[test]
    fn fields_ending_in_carriage_return_round_trip() {
        let rows = vec![vec!["a".to_string(), "b\r".to_string()]];
        let doc = write_document(&rows);
        assert_eq!(doc, "a,\"b\r\"");
        assert_eq!(parse_document(&doc), rows);
    }

    #[test]
    fn bom_is_stripped_from_first_header_cell() {
        let table = Table::parse("\u{feff}id,title\nt1,Venue\n").unwrap();
        assert_eq!(table.column_index("id"), Some(0));
    }

    #[test]
    fn ragged_rows_pass_through_unvalidated() {
        let rows = parse_document("a,b,c\n1,2\n1,2,3,4\n");
        assert_eq!(rows[1].len(), 2);
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn round_trips_awkward_content() {
        let rows = vec![
            vec!["id".to_string(), "body".to_string()],
            vec![
                "t1".to_string(),
                "plain".to_string(),
            ],
            vec![
                "t2".to_string(),
                "commas, quotes \"q\" and\nnewlines\r\nincluded".to_string(),
            ],
        ];
        let doc = write_document(&rows);
        assert_eq!(parse_document(&doc), rows);
    }

    #[test]
    fn empty_field_serializes_unquoted() {
        assert_eq!(escape_field(""), "");
        assert_eq!(write_document(&[vec!["a".into(), String::new()]]), "a,");
    }

    #[test]
    fn table_resolves_columns_by_name() {
        let table = Table::parse("id,title\nt1,Book venue\nt2\n").unwrap();
        assert_eq!(table.len(), 2);
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].get("title"), "Book venue");
        // Short row and unknown column both read as empty.
        assert_eq!(rows[1].get("title"), "");
        assert_eq!(rows[0].get("nope"), "");
    }
}

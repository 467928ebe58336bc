use crate::domain::model::ParsedTable;

const BOM: char = '\u{feff}';

/// 將單行 CSV 切成欄位 (支援雙引號包住的逗號與 "" 跳脫)
///
/// Unbalanced quotes are not an error: the scan just reaches the end of the
/// line still inside the quoted section.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Parse a whole CSV document into headers and rows.
///
/// Blank lines are dropped before tokenizing, including blank lines that sit
/// inside a multi-line quoted value. Row widths are not checked against the
/// header width.
pub fn parse_csv(content: &str) -> ParsedTable {
    let body = content.strip_prefix(BOM).unwrap_or(content);

    let lines: Vec<&str> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some((header_line, data_lines)) = lines.split_first() else {
        tracing::debug!("CSV content has no non-empty lines");
        return ParsedTable::empty(content);
    };

    let headers = tokenize_line(header_line);
    let rows: Vec<Vec<String>> = data_lines.iter().map(|line| tokenize_line(line)).collect();

    tracing::debug!(
        "Parsed CSV table: {} headers, {} rows",
        headers.len(),
        rows.len()
    );

    ParsedTable {
        headers,
        rows,
        raw_content: content.to_string(),
    }
}

/// 以固定寬度文字表格輸出，供除錯與預覽使用
pub fn format_csv_as_table(table: &ParsedTable) -> String {
    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            table
                .rows
                .iter()
                .map(|row| row.get(i).map_or(0, |cell| cell.chars().count()))
                .fold(header.chars().count(), usize::max)
        })
        .collect();

    let render_row = |cells: &[String]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = width)
            })
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let separator = widths
        .iter()
        .map(|&width| "-".repeat(width))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut lines = Vec::with_capacity(table.rows.len() + 2);
    lines.push(render_row(&table.headers));
    lines.push(separator);
    lines.extend(table.rows.iter().map(|row| render_row(row)));
    lines.join("\n")
}

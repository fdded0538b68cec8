use serde::Serialize;
use std::fmt::Write;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    print!("{}", render_table(headers, &rows));
}

/// Lay out `rows` under `headers` in space-separated columns. Columns whose
/// cells all start with a digit are right-aligned so counts line up.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let columns = headers.len();
    let width = |i: usize| {
        rows.iter()
            .filter_map(|row| row.get(i))
            .map(|cell| cell.chars().count())
            .fold(headers[i].chars().count(), usize::max)
    };
    let widths: Vec<usize> = (0..columns).map(width).collect();
    let numeric: Vec<bool> = (0..columns)
        .map(|i| {
            !rows.is_empty()
                && rows.iter().all(|row| {
                    row.get(i)
                        .and_then(|cell| cell.chars().next())
                        .is_some_and(|c| c.is_ascii_digit())
                })
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, headers, &widths, &numeric);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(&mut out, &rule, &widths, &numeric);
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        push_line(&mut out, &cells, &widths, &numeric);
    }
    out
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize], numeric: &[bool]) {
    let mut rendered = String::new();
    for (i, cell) in cells.iter().take(widths.len()).enumerate() {
        if i > 0 {
            rendered.push_str("  ");
        }
        let w = widths[i];
        if numeric[i] {
            let _ = write!(rendered, "{cell:>w$}");
        } else {
            let _ = write!(rendered, "{cell:<w$}");
        }
    }
    out.push_str(rendered.trim_end());
    out.push('\n');
}

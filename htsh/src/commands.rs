use crate::{
    Table,
    palette::{BLUE, GREEN, PEACH, RED, RESET},
};
use std::io::Write;

/// Words the highlighter paints as commands.
pub(crate) const COMMANDS: [&str; 6] = ["set", "get", "del", "len", "stats", "dump"];

/// Runs one line against the table. Returns `true` once the shell should exit.
pub fn handle_command(command: &str, table: &mut Table) -> bool {
    let parts = command.split_whitespace().collect::<Vec<_>>();

    match parts.as_slice() {
        ["/q"] | ["/quit"] => return true,
        ["/h"] | ["/help"] | ["/?"] => help(),
        ["/clear"] | ["/c"] => {
            print!("\x1b[2J\x1b[1;1H");
            std::io::stdout().flush().ok();
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            match table.insert(key.to_string(), value.join(" ")) {
                Some(previous) => println!("updated {key} {PEACH}(was {previous}){RESET}"),
                None => println!("inserted {key}"),
            }
        }
        ["get", key] => match table.lookup(*key) {
            Ok(value) => println!("{GREEN}{value}{RESET}"),
            Err(err) => println!("{RED}{err}{RESET}"),
        },
        ["del", key] => match table.delete(*key) {
            Ok(value) => println!("deleted {key} {PEACH}(was {value}){RESET}"),
            Err(err) => println!("{RED}{err}{RESET}"),
        },
        ["len"] => println!("{}", table.len()),
        ["stats"] => stats(table),
        ["dump"] => {
            let rows: Vec<Vec<String>> = table
                .iter()
                .map(|(key, value)| vec![key.replace('\n', "\\n"), value.replace('\n', "\\n")])
                .collect();

            println!("{}\n{} entries", draw(&["key", "value"], &rows), rows.len());
        }
        _ => println!("Unknown command: {command}"),
    }

    false
}

fn help() {
    println!("Available commands:");
    println!("  {BLUE}set <key> <value>{RESET}  Insert or update a key");
    println!("  {BLUE}get <key>{RESET}          Look a key up");
    println!("  {BLUE}del <key>{RESET}          Delete a key");
    println!("  {BLUE}len{RESET}                Number of entries");
    println!("  {BLUE}stats{RESET}              Capacity, tombstones and load factor");
    println!("  {BLUE}dump{RESET}               Every entry, in storage order");
    println!("  {BLUE}/clear, /c{RESET}         Clear the terminal screen");
    println!("  {BLUE}/h, /help{RESET}          Show this help message");
    println!("  {BLUE}/q, /quit{RESET}          Exit htsh");
}

fn stats(table: &Table) {
    let rows = vec![
        vec!["strategy".into(), table.strategy().to_string()],
        vec!["entries".into(), table.len().to_string()],
        vec!["capacity".into(), table.capacity().to_string()],
        vec!["tombstones".into(), table.tombstones().to_string()],
        vec!["load factor".into(), format!("{:.3}", table.load_factor())],
        vec![
            "maximum load factor".into(),
            table.maximum_load_factor().to_string(),
        ],
        vec!["memory".into(), format!("{} bytes", table.memory_usage())],
    ];

    println!("{}", draw(&["stat", "value"], &rows));
}

/// Draws `rows` as an ASCII table below a `columns` header.
fn draw(columns: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            rows.iter()
                .filter_map(|row| row.get(idx))
                .map(|cell| cell.chars().count())
                .fold(column.chars().count(), usize::max)
        })
        .collect();

    let border = widths.iter().fold(String::from("+"), |border, width| {
        format!("{border}{}+", "-".repeat(width + 2))
    });

    let mut lines = vec![
        border.clone(),
        line(columns.iter().copied(), &widths),
        border.clone(),
    ];
    lines.extend(rows.iter().map(|row| line(row.iter().map(String::as_str), &widths)));

    if !rows.is_empty() {
        lines.push(border);
    }

    lines.join("\n")
}

/// One `| cell | cell |` line, each cell padded to its column width.
fn line<'c>(cells: impl Iterator<Item = &'c str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .fold(String::from("|"), |line, (cell, width)| {
            format!("{line} {cell:<width$} |", width = *width)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashtables::Config;

    #[test]
    fn test_draw() {
        let rows = vec![
            vec!["a".to_string(), "1".to_string()],
            vec!["tombstone".to_string(), "2".to_string()],
        ];

        let expected = "\
+-----------+-------+
| key       | value |
+-----------+-------+
| a         | 1     |
| tombstone | 2     |
+-----------+-------+";

        assert_eq!(draw(&["key", "value"], &rows), expected);
    }

    #[test]
    fn test_draw_without_rows() {
        let expected = "\
+-----+-------+
| key | value |
+-----+-------+";

        assert_eq!(draw(&["key", "value"], &[]), expected);
    }

    #[test]
    fn test_commands() {
        let mut table = Table::new(Config::chaining()).unwrap();

        assert!(!handle_command("set colour mauve and blue", &mut table));
        assert!(!handle_command("set shade umbra", &mut table));
        assert!(!handle_command("del shade", &mut table));
        assert!(!handle_command("del shade", &mut table));
        assert!(!handle_command("frobnicate", &mut table));

        assert_eq!(table.lookup("colour").unwrap(), "mauve and blue");
        assert_eq!(table.len(), 1);

        assert!(handle_command("/quit", &mut table));
    }
}

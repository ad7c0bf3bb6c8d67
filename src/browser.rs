//! Interactive menu over the log store.
//!
//! One idle state, four transitions: list, view, search, exit. Unknown menu
//! choices are ignored and the menu repeats; a non-numeric view index is
//! fatal to the process by contract.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::store;

enum MenuCommand {
    List,
    View,
    Search,
    Exit,
}

fn parse_choice(line: &str) -> Option<MenuCommand> {
    match line.trim() {
        "1" => Some(MenuCommand::List),
        "2" => Some(MenuCommand::View),
        "3" => Some(MenuCommand::Search),
        "4" => Some(MenuCommand::Exit),
        _ => None,
    }
}

/// Run the menu loop over the logs in `dir` until exit or end of input.
pub fn run(dir: &Path, input: impl BufRead) -> Result<(), Error> {
    let mut lines = input.lines();
    loop {
        print_menu()?;
        let Some(line) = next_line(&mut lines)? else {
            return Ok(());
        };
        match parse_choice(&line) {
            Some(MenuCommand::List) => cmd_list(dir)?,
            Some(MenuCommand::View) => cmd_view(dir, &mut lines)?,
            Some(MenuCommand::Search) => cmd_search(dir, &mut lines)?,
            Some(MenuCommand::Exit) => return Ok(()),
            None => {}
        }
    }
}

fn print_menu() -> Result<(), Error> {
    println!();
    println!("1. List logs");
    println!("2. View a log");
    println!("3. Search logs");
    println!("4. Exit");
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

fn next_line<I>(lines: &mut I) -> Result<Option<String>, Error>
where
    I: Iterator<Item = io::Result<String>>,
{
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}

fn cmd_list(dir: &Path) -> Result<(), Error> {
    let logs = store::list_logs(dir)?;
    if logs.is_empty() {
        println!("No logs found.");
        return Ok(());
    }
    for (index, path) in logs.iter().enumerate() {
        println!("{}. {}", index + 1, path.display());
    }
    Ok(())
}

fn cmd_view<I>(dir: &Path, lines: &mut I) -> Result<(), Error>
where
    I: Iterator<Item = io::Result<String>>,
{
    let logs = store::list_logs(dir)?;
    print!("Log number: ");
    io::stdout().flush()?;
    let Some(raw) = next_line(lines)? else {
        return Ok(());
    };
    match select_log(&logs, &raw)? {
        Some(path) => println!("{}", store::read_log(path)?),
        None => println!("No log with number '{}'.", raw.trim()),
    }
    Ok(())
}

/// Resolve a 1-based index into the listing.
///
/// Out-of-range input is reported by the caller and the loop continues;
/// non-numeric input is an [`Error::Input`] that ends the process.
fn select_log<'a>(logs: &'a [PathBuf], raw: &str) -> Result<Option<&'a PathBuf>, Error> {
    let index: usize = raw
        .trim()
        .parse()
        .map_err(|_| Error::Input(format!("not a log number: '{}'", raw.trim())))?;
    Ok(index.checked_sub(1).and_then(|index| logs.get(index)))
}

fn cmd_search<I>(dir: &Path, lines: &mut I) -> Result<(), Error>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("Keyword: ");
    io::stdout().flush()?;
    let Some(keyword) = next_line(lines)? else {
        return Ok(());
    };
    let matches = store::search_logs(dir, keyword.trim())?;
    if matches.is_empty() {
        println!("No logs match '{}'.", keyword.trim());
        return Ok(());
    }
    for path in &matches {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn menu_choices_map_to_commands() {
        assert!(matches!(parse_choice(" 1 "), Some(MenuCommand::List)));
        assert!(matches!(parse_choice("2"), Some(MenuCommand::View)));
        assert!(matches!(parse_choice("3"), Some(MenuCommand::Search)));
        assert!(matches!(parse_choice("4"), Some(MenuCommand::Exit)));
        assert!(parse_choice("list").is_none());
        assert!(parse_choice("").is_none());
    }

    #[test]
    fn out_of_range_index_is_not_an_error() {
        let logs = vec![PathBuf::from("prs_a"), PathBuf::from("prs_b")];
        assert_eq!(select_log(&logs, "1").expect("ok"), Some(&logs[0]));
        assert_eq!(select_log(&logs, "2").expect("ok"), Some(&logs[1]));
        assert_eq!(select_log(&logs, "0").expect("ok"), None);
        assert_eq!(select_log(&logs, "5").expect("ok"), None);
    }

    #[test]
    fn non_numeric_index_is_fatal() {
        let logs = vec![PathBuf::from("prs_a")];
        let err = select_log(&logs, "first").expect_err("should fail");
        assert!(matches!(err, Error::Input(_)));
    }

    #[test]
    fn loop_exits_on_choice_and_ignores_unknown_input() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("prs_20240101_000000.prompt.md"), "hello").expect("write");

        let input = Cursor::new("bogus\n1\n3\nhello\n4\n");
        run(dir.path(), input).expect("loop");
    }

    #[test]
    fn loop_ends_cleanly_at_end_of_input() {
        let dir = TempDir::new().expect("tempdir");
        let input = Cursor::new("1\n");
        run(dir.path(), input).expect("loop");
    }

    #[test]
    fn non_numeric_view_input_ends_the_loop_with_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let input = Cursor::new("2\nnot-a-number\n");
        let err = run(dir.path(), input).expect_err("should fail");
        assert!(matches!(err, Error::Input(_)));
    }
}

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

/// What the user picked from the ROM menu
#[derive(Debug, PartialEq, Eq)]
pub enum Choice {
    Rom(usize),
    Quit,
    Invalid,
}

/// Files directly inside `dir`, sorted by name
pub fn list_roms(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut roms = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("unable to list {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() {
            roms.push(path);
        }
    }
    roms.sort();
    Ok(roms)
}

/// Reads a menu selection; entries are numbered from 1
pub fn parse_choice(input: &str, count: usize) -> Choice {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Choice::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Choice::Rom(n - 1),
        _ => Choice::Invalid,
    }
}

/// Prints the numbered ROM list and blocks for a selection. End of input counts as quitting.
pub fn prompt(roms: &[PathBuf], input: &mut dyn BufRead) -> anyhow::Result<Choice> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout)?;
    for (n, rom) in roms.iter().enumerate() {
        let name = rom.file_name().unwrap_or(rom.as_os_str());
        writeln!(stdout, "{:>3}. {}", n + 1, name.to_string_lossy())?;
    }
    write!(stdout, "select a rom (q to quit): ")?;
    stdout.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Choice::Quit);
    }
    Ok(parse_choice(&line, roms.len()))
}

#[cfg(test)]
mod test_menu {
    use super::*;

    #[test]
    fn test_numbers_start_at_one() {
        assert_eq!(parse_choice("1\n", 3), Choice::Rom(0));
        assert_eq!(parse_choice(" 3 ", 3), Choice::Rom(2));
    }

    #[test]
    fn test_out_of_range_is_invalid() {
        assert_eq!(parse_choice("0", 3), Choice::Invalid);
        assert_eq!(parse_choice("4", 3), Choice::Invalid);
        assert_eq!(parse_choice("pong", 3), Choice::Invalid);
        assert_eq!(parse_choice("", 0), Choice::Invalid);
    }

    #[test]
    fn test_quit() {
        assert_eq!(parse_choice("q\n", 3), Choice::Quit);
        assert_eq!(parse_choice("Q", 0), Choice::Quit);
    }

    #[test]
    fn test_prompt_reads_one_line() {
        let roms = vec![PathBuf::from("roms/PONG"), PathBuf::from("roms/TETRIS")];
        let mut input: &[u8] = b"2\nq\n";
        assert_eq!(prompt(&roms, &mut input).unwrap(), Choice::Rom(1));
        assert_eq!(prompt(&roms, &mut input).unwrap(), Choice::Quit);
        assert_eq!(prompt(&roms, &mut input).unwrap(), Choice::Quit);
    }

    #[test]
    fn test_list_roms_of_missing_dir_fails() {
        assert!(list_roms(Path::new("/definitely/not/a/rom/dir")).is_err());
    }
}

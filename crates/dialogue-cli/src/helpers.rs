//! Password entry and path bookkeeping helpers for the CLI.

use std::ffi::OsString;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use dialoguer::Password;
use zeroize::Zeroizing;

/// A password and its retyped confirmation, exactly as entered.
pub struct PasswordPair {
    pub entered: Zeroizing<String>,
    pub retyped: Zeroizing<String>,
}

/// Ask for the password twice.
///
/// On a terminal this uses hidden `dialoguer` prompts; otherwise the first
/// two lines of stdin are taken as the password and its confirmation.
pub fn prompt_password_pair(interactive: bool) -> anyhow::Result<PasswordPair> {
    if !interactive {
        return read_password_lines(io::stdin().lock())
            .map_err(|e| anyhow::anyhow!("Failed to read password from stdin: {}", e));
    }

    let entered = Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
    let entered = Zeroizing::new(entered);
    let retyped = Password::new()
        .with_prompt("Confirm password")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;

    Ok(PasswordPair {
        entered,
        retyped: Zeroizing::new(retyped),
    })
}

/// Read two lines, stripping only their line endings. Missing lines read as empty.
pub fn read_password_lines<R: BufRead>(mut reader: R) -> io::Result<PasswordPair> {
    let mut entered = Zeroizing::new(String::new());
    let mut retyped = Zeroizing::new(String::new());
    reader.read_line(&mut entered)?;
    reader.read_line(&mut retyped)?;
    strip_line_ending(&mut entered);
    strip_line_ending(&mut retyped);
    Ok(PasswordPair { entered, retyped })
}

fn strip_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

/// Derive the default unlock output for `locked`.
///
/// The first occurrence of `locked_suffix` in the file name is swapped for
/// `unlocked_suffix`; a file name without it gets `unlocked_suffix` appended.
/// Parent directories are never rewritten. Returns `None` when the path has
/// no file name (`.`, `..`, `/`).
pub fn unlocked_path(locked: &Path, locked_suffix: &str, unlocked_suffix: &str) -> Option<PathBuf> {
    let name = locked.file_name()?;
    let renamed: OsString = match name.to_str() {
        Some(name) if name.contains(locked_suffix) => {
            name.replacen(locked_suffix, unlocked_suffix, 1).into()
        }
        _ => {
            let mut name = name.to_os_string();
            name.push(unlocked_suffix);
            name
        }
    };
    Some(locked.with_file_name(renamed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_password_lines() {
        let pair = read_password_lines(&b"hunter2\r\nhunter2\nextra\n"[..]).unwrap();
        assert_eq!(pair.entered.as_str(), "hunter2");
        assert_eq!(pair.retyped.as_str(), "hunter2");
    }

    #[test]
    fn test_read_password_lines_without_trailing_newline() {
        let pair = read_password_lines(&b"hunter2\nhunter2"[..]).unwrap();
        assert_eq!(pair.entered.as_str(), pair.retyped.as_str());
    }

    #[test]
    fn test_read_password_lines_missing_confirmation() {
        let pair = read_password_lines(&b"hunter2\n"[..]).unwrap();
        assert_eq!(pair.entered.as_str(), "hunter2");
        assert_eq!(pair.retyped.as_str(), "");
    }

    #[test]
    fn test_read_password_lines_keeps_inner_whitespace() {
        let pair = read_password_lines(&b"  two words \n  two words \n"[..]).unwrap();
        assert_eq!(pair.entered.as_str(), "  two words ");
    }

    #[test]
    fn test_unlocked_path_replaces_suffix() {
        let out = unlocked_path(Path::new("notes/journal.locked"), ".locked", ".unlocked");
        assert_eq!(out, Some(PathBuf::from("notes/journal.unlocked")));
    }

    #[test]
    fn test_unlocked_path_replaces_first_occurrence_only() {
        let out = unlocked_path(Path::new("a.locked.locked"), ".locked", ".unlocked");
        assert_eq!(out, Some(PathBuf::from("a.unlocked.locked")));
    }

    #[test]
    fn test_unlocked_path_leaves_parent_directories() {
        let out = unlocked_path(Path::new("vault.locked/entry.md"), ".locked", ".unlocked");
        assert_eq!(out, Some(PathBuf::from("vault.locked/entry.md.unlocked")));
    }

    #[test]
    fn test_unlocked_path_appends_without_suffix() {
        let out = unlocked_path(Path::new("journal"), ".locked", ".unlocked");
        assert_eq!(out, Some(PathBuf::from("journal.unlocked")));
    }

    #[test]
    fn test_unlocked_path_trailing_separator() {
        let out = unlocked_path(Path::new("journal.locked/"), ".locked", ".unlocked");
        assert_eq!(out, Some(PathBuf::from("journal.unlocked")));
    }

    #[test]
    fn test_unlocked_path_without_file_name() {
        assert_eq!(unlocked_path(Path::new(".."), ".locked", ".unlocked"), None);
        assert_eq!(unlocked_path(Path::new("/"), ".locked", ".unlocked"), None);
    }
}

pub mod config;
pub mod convert;
pub mod css;
pub mod editor;
pub mod mode;
pub mod profile;
pub mod theme;

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

/// Writes `text` to `output`, or prints it when no path is given.
pub fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

pub fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {}", path.display()))
}

pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Ocean Breeze", 20), "Ocean Breeze");
        assert_eq!(truncate_str("A very long theme name", 10), "A very ...");
    }

    #[test]
    fn test_write_then_read_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("theme.css");
        write_output(Some(&path), ":root {}").unwrap();
        assert_eq!(read_input(&path).unwrap(), ":root {}");
        assert!(read_input(&dir.path().join("missing.json")).is_err());
    }
}

//! Puzzle inputs read from a local directory tree

use crate::cli::InputVariant;
use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-based store of puzzle inputs
///
/// Directory structure: `{root}/{year}/{day}.sample.txt` and
/// `{root}/{year}/{day}.input.txt`
#[derive(Debug, Clone)]
pub struct InputStore {
    root: PathBuf,
    variant: InputVariant,
}

impl InputStore {
    pub fn new(root: PathBuf, variant: InputVariant) -> Self {
        Self { root, variant }
    }

    /// Path of the selected variant for a specific year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.root
            .join(year.to_string())
            .join(format!("{}.{}.txt", day, self.variant.file_suffix()))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Read an input, dropping one trailing newline
    pub fn load(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.input_path(year, day);
        let mut content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(InputError::NotFound(path)),
            Err(source) => return Err(InputError::Read { path, source }),
        };

        if content.ends_with('\n') {
            content.pop();
            if content.ends_with('\r') {
                content.pop();
            }
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_input(root: &Path, year: u16, name: &str, content: &str) {
        let dir = root.join(year.to_string());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_input_path_format() {
        let store = InputStore::new(PathBuf::from("inputs"), InputVariant::Sample);
        assert_eq!(store.input_path(2022, 7), PathBuf::from("inputs/2022/7.sample.txt"));

        let store = InputStore::new(PathBuf::from("inputs"), InputVariant::Full);
        assert_eq!(store.input_path(2022, 25), PathBuf::from("inputs/2022/25.input.txt"));
    }

    #[test]
    fn test_variants_are_separate_files() {
        let temp = TempDir::new().unwrap();
        write_input(temp.path(), 2022, "1.sample.txt", "sample\n");

        let sample = InputStore::new(temp.path().to_path_buf(), InputVariant::Sample);
        let full = InputStore::new(temp.path().to_path_buf(), InputVariant::Full);
        assert!(sample.contains(2022, 1));
        assert!(!full.contains(2022, 1));
        assert_eq!(sample.load(2022, 1).unwrap(), "sample");
        assert!(matches!(full.load(2022, 1), Err(InputError::NotFound(_))));
    }

    #[test]
    fn test_only_one_trailing_newline_is_stripped() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), InputVariant::Full);

        write_input(temp.path(), 2022, "5.input.txt", "    [D]\n 1\n\n");
        assert_eq!(store.load(2022, 5).unwrap(), "    [D]\n 1\n");

        write_input(temp.path(), 2022, "6.input.txt", "abc\r\n");
        assert_eq!(store.load(2022, 6).unwrap(), "abc");

        write_input(temp.path(), 2022, "7.input.txt", "no newline");
        assert_eq!(store.load(2022, 7).unwrap(), "no newline");
    }

    #[test]
    fn test_directory_is_not_an_input() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("2022").join("3.sample.txt")).unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), InputVariant::Sample);
        assert!(!store.contains(2022, 3));
        assert!(matches!(store.load(2022, 3), Err(InputError::Read { .. })));
    }
}

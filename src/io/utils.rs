//! Utilities for input/output.

use std::{
    fs,
    io::{self, BufRead, Read},
    path::Path,
};

#[cfg(feature = "json")]
use serde::Serialize;

/// Opens the file at the given path, adding the path to any error message.
pub fn open_file_and_map_err<P: AsRef<Path>>(file_path: P) -> io::Result<fs::File> {
    let file_path = file_path.as_ref();
    fs::File::open(file_path).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!(
                "Could not open {}: {}",
                file_path.to_string_lossy(),
                err
            ),
        )
    })
}

/// Reads and returns the content of the specified text file.
pub fn read_text_file<P: AsRef<Path>>(file_path: P) -> io::Result<String> {
    let file = open_file_and_map_err(file_path)?;
    let mut text = String::new();
    let _ = io::BufReader::new(file).read_to_string(&mut text)?;
    Ok(text)
}

/// Reads and returns all lines of the specified text file, without line terminators.
pub fn read_text_file_lines<P: AsRef<Path>>(file_path: P) -> io::Result<Vec<String>> {
    let file = open_file_and_map_err(file_path)?;
    io::BufReader::new(file).lines().collect()
}

/// Serializes the given data into JSON format and saves it at the given path.
#[cfg(feature = "json")]
pub fn save_data_as_json<P: AsRef<Path>, T: Serialize>(file_path: P, data: &T) -> io::Result<()> {
    let file = fs::File::create(file_path)?;
    serde_json::to_writer(io::BufWriter::new(file), data)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::io::Write;

    #[test]
    fn lines_are_read_without_terminators() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "first\nsecond \n\nfourth\n").unwrap();
        let lines = read_text_file_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["first", "second ", "", "fourth"]);
        assert_eq!(
            read_text_file(file.path()).unwrap(),
            "first\nsecond \n\nfourth\n"
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn data_is_saved_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("data.json");
        save_data_as_json(&file_path, &vec![1.5, 2.0]).unwrap();
        assert_eq!(read_text_file(&file_path).unwrap(), "[1.5,2.0]");
    }

    #[test]
    fn missing_file_error_names_path() {
        let err = read_text_file("no/such/file.txt").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("no/such/file.txt"));
    }
}

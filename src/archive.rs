//! Packaging captured images into a zip archive

use std::io::{Cursor, Write};

use log::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Result, WordshotError};

/// Default folder inside the archive
pub const DEFAULT_FOLDER: &str = "images";

/// A named image waiting to be packaged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name without folder or extension
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            bytes,
        }
    }
}

/// Builds an archive with one `<folder>/<name>.<extension>` file per entry
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    folder: String,
    extension: String,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_FOLDER)
    }
}

impl ArchiveBuilder {
    pub fn new(folder: &str) -> Self {
        Self {
            folder: folder.trim_matches('/').to_string(),
            extension: "png".to_string(),
        }
    }

    /// Path of an entry inside the archive
    ///
    /// Path separators in the name are replaced so an entry cannot leave
    /// its folder.
    pub fn entry_path(&self, name: &str) -> String {
        let name = name.replace(['/', '\\'], "_");
        if self.folder.is_empty() {
            format!("{}.{}", name, self.extension)
        } else {
            format!("{}/{}.{}", self.folder, name, self.extension)
        }
    }

    /// Serialize entries into a zip archive
    ///
    /// An empty entry list is an error: there is nothing meaningful to package.
    /// Entries that share a path overwrite each other; the last one wins.
    pub fn build(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>> {
        if entries.is_empty() {
            return Err(WordshotError::ArchiveEncoding(
                "no entries to package".to_string(),
            ));
        }

        let mut files: Vec<(String, &[u8])> = Vec::with_capacity(entries.len());
        for entry in entries {
            let path = self.entry_path(&entry.name);
            match files.iter_mut().find(|(existing, _)| *existing == path) {
                Some(file) => {
                    debug!("Replacing {} with a later entry", path);
                    file.1 = entry.bytes.as_slice();
                }
                None => files.push((path, entry.bytes.as_slice())),
            }
        }

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (path, bytes) in files {
            debug!("Adding {} ({} bytes)", path, bytes.len());
            zip.start_file(path, options)?;
            zip.write_all(bytes)?;
        }

        Ok(zip.finish()?.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_empty_entries_rejected() {
        let err = ArchiveBuilder::default().build(&[]).unwrap_err();
        assert!(matches!(err, WordshotError::ArchiveEncoding(_)));
    }

    #[test]
    fn test_entries_under_folder() {
        let entries = vec![
            ArchiveEntry::new("Ann", vec![1, 2, 3]),
            ArchiveEntry::new("Bo", vec![4, 5]),
        ];
        let bytes = ArchiveBuilder::default().build(&entries).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(names, vec!["images/Ann.png", "images/Bo.png"]);

        let mut content = Vec::new();
        archive
            .by_name("images/Bo.png")
            .unwrap()
            .read_to_end(&mut content)
            .unwrap();
        assert_eq!(content, vec![4, 5]);
    }

    #[test]
    fn test_entry_path() {
        assert_eq!(ArchiveBuilder::new("out/").entry_path("x"), "out/x.png");
        assert_eq!(ArchiveBuilder::new("").entry_path("x"), "x.png");
        assert_eq!(ArchiveBuilder::default().entry_path("../x"), "images/.._x.png");
        assert_eq!(ArchiveBuilder::default().entry_path(r"a\b"), "images/a_b.png");
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let entries = vec![
            ArchiveEntry::new("Ann", vec![1]),
            ArchiveEntry::new("Bo", vec![2]),
            ArchiveEntry::new("Ann", vec![3]),
        ];
        let bytes = ArchiveBuilder::default().build(&entries).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = Vec::new();
        archive
            .by_name("images/Ann.png")
            .unwrap()
            .read_to_end(&mut content)
            .unwrap();
        assert_eq!(content, vec![3]);
    }
}

use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: Chapter file enumeration and output naming

/// Suffix appended to the stem of every translated chapter
pub const TRANSLATED_SUFFIX: &str = "_translated.tex";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Inclusion predicate for chapter files.
    ///
    /// An entry is dropped only when its name both contains `00` and ends
    /// with `.tex`; `00readme.md` is therefore kept.
    pub fn is_chapter_candidate(file_name: &str) -> bool {
        !file_name.contains("00") || !file_name.ends_with(".tex")
    }

    /// List the entries directly inside `dir` that pass [`Self::is_chapter_candidate`].
    ///
    /// No recursion and no entry-type filtering. Names are sorted so runs are
    /// reproducible.
    pub fn list_chapter_files<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
        let dir = dir.as_ref();
        if !Self::dir_exists(dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", dir));
        }

        let mut result = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.with_context(|| format!("Failed to read directory entry in {:?}", dir))?;
            let file_name = entry.file_name().to_string_lossy().to_string();

            if Self::is_chapter_candidate(&file_name) {
                result.push(file_name);
            }
        }

        result.sort();
        Ok(result)
    }

    // @generates: Output filename, everything before the first dot plus the suffix
    pub fn translated_file_name(input_file_name: &str) -> String {
        let stem = input_file_name.split('.').next().unwrap_or_default();
        format!("{}{}", stem, TRANSLATED_SUFFIX)
    }

    // @generates: Output path inside the output directory
    pub fn generate_output_path<P: AsRef<Path>>(input_file_name: &str, output_dir: P) -> PathBuf {
        output_dir.as_ref().join(Self::translated_file_name(input_file_name))
    }
}

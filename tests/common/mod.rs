/*!
 * Common test utilities for the texlate test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use texlate::app_config::{Config, ProcessingMode};

// Re-export the mock translators module
pub mod mock_translators;

/// Route library logs through env_logger; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a small German chapter mixing prose, a list and a figure
pub fn create_test_chapter(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r"\section{Einleitung}
Dies ist ein Satz.

\begin{itemize}
\item Erster Punkt
\end{itemize}
\begin{figure}
\caption{Ein Bild}
\end{figure}
Noch ein Satz.
";
    create_test_file(dir, filename, content)
}

/// A config whose input and output directories live inside `root`
pub fn config_for_dirs(root: &Path, mode: ProcessingMode) -> Config {
    let mut config = Config::default();
    config.input_dir = root.join("chapters");
    config.output_dir = root.join("chaptersEnglisch");
    config.processing.mode = mode;
    config.processing.max_concurrent_files = 2;
    config
}

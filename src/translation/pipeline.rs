/*!
 * Per-file line pipeline.
 *
 * Reads a chapter, classifies each line, sends translatable lines to a
 * `LineTranslator` one at a time and streams the results to the output file.
 * Output line N is always the result for input line N.
 */

use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

use super::core::LineTranslator;
use crate::errors::{AppError, TranslationError};
use crate::latex::{BlockState, LineClass, classify};

/// Line tallies for one processed stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    /// Lines written
    pub total: usize,
    /// Lines that went through the translator
    pub translated: usize,
}

/// Outcome of one processed chapter file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub counts: LineCounts,
    pub elapsed: Duration,
}

/// Sequential line pipeline over a borrowed translator
pub struct LinePipeline<'a, T: LineTranslator + ?Sized> {
    translator: &'a T,
}

impl<'a, T: LineTranslator + ?Sized> LinePipeline<'a, T> {
    pub fn new(translator: &'a T) -> Self {
        Self { translator }
    }

    /// Process one line: classify, translate if eligible, and return the next state
    pub async fn process_line(&self, state: BlockState, line: &str) -> Result<(BlockState, LineClass, String), TranslationError> {
        let (next, class) = classify(state, line);
        let output = match class {
            LineClass::Structural(_) => line.to_string(),
            LineClass::Translatable => self.translator.translate_line(line).await?,
        };
        Ok((next, class, output))
    }

    /// Run `lines` through the pipeline, writing each result plus `\n` to `writer`.
    ///
    /// `on_line` is called with the running count after every written line.
    pub async fn process_lines<W, F>(&self, lines: &[String], writer: &mut W, mut on_line: F) -> Result<LineCounts, AppError>
    where
        W: AsyncWrite + Unpin,
        F: FnMut(usize),
    {
        let mut state = BlockState::default();
        let mut counts = LineCounts::default();

        for line in lines {
            let (next, class, output) = self.process_line(state, line).await?;
            state = next;

            writer.write_all(output.as_bytes()).await?;
            writer.write_all(b"\n").await?;

            counts.total += 1;
            if class.is_translatable() {
                counts.translated += 1;
            }
            on_line(counts.total);
        }

        writer.flush().await?;
        Ok(counts)
    }

    /// Translate `input_path` into `output_path`.
    ///
    /// The input is read completely before the output file is created, so an
    /// unreadable chapter leaves no output behind. An existing output file is
    /// overwritten.
    pub async fn process_file<F>(&self, input_path: &Path, output_path: &Path, on_line: F) -> Result<FileReport, AppError>
    where
        F: FnMut(usize),
    {
        let start_time = Instant::now();
        let lines = read_lines(input_path).await?;
        debug!("Read {} lines from {:?}", lines.len(), input_path);

        let file = File::create(output_path).await
            .map_err(|e| AppError::File(format!("Failed to create {:?}: {}", output_path, e)))?;
        let mut writer = BufWriter::new(file);

        let counts = self.process_lines(&lines, &mut writer, on_line).await?;
        writer.into_inner().sync_all().await?;

        let report = FileReport {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            counts,
            elapsed: start_time.elapsed(),
        };
        info!(
            "Success: {} ({} lines, {} translated)",
            output_path.display(),
            counts.total,
            counts.translated
        );
        Ok(report)
    }
}

/// Read a UTF-8 text file into lines, stripping `\n` and `\r\n` terminators
pub async fn read_lines(path: &Path) -> Result<Vec<String>, AppError> {
    let file = File::open(path).await
        .map_err(|e| AppError::File(format!("Failed to open {:?}: {}", path, e)))?;
    let mut reader = BufReader::new(file).lines();

    let mut lines = Vec::new();
    while let Some(line) = reader.next_line().await
        .map_err(|e| AppError::File(format!("Failed to read {:?}: {}", path, e)))?
    {
        lines.push(line);
    }
    Ok(lines)
}

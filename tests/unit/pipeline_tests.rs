/*!
 * Tests for the per-file line pipeline
 */

use anyhow::Result;
use std::fs;
use texlate::errors::AppError;
use texlate::translation::LinePipeline;
use texlate::translation::pipeline::read_lines;
use crate::common;
use crate::common::mock_translators::{FailingTranslator, MockErrorType, UppercaseTranslator};

/// The worked example: only prose lines change
#[tokio::test]
async fn test_process_file_withChapter_shouldTranslateOnlyProse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_chapter(temp_dir.path(), "kap01.tex")?;
    let output = temp_dir.path().join("kap01_translated.tex");

    let translator = UppercaseTranslator::new();
    let pipeline = LinePipeline::new(&translator);
    let report = pipeline.process_file(&input, &output, |_| {}).await?;

    let expected = r"\section{Einleitung}
DIES IST EIN SATZ.

\begin{itemize}
\item Erster Punkt
\end{itemize}
\begin{figure}
\caption{Ein Bild}
\end{figure}
NOCH EIN SATZ.
";
    assert_eq!(fs::read_to_string(&output)?, expected);
    assert_eq!(report.counts.total, 10);
    assert_eq!(report.counts.translated, 2);
    assert_eq!(translator.tracker().lock().unwrap().call_count, 2);
    Ok(())
}

/// Output line count equals input line count, CRLF input included
#[tokio::test]
async fn test_process_file_withCrlfInput_shouldKeepLineCount() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "kap02.tex", "Erste Zeile\r\n\r\nZweite Zeile")?;
    let output = temp_dir.path().join("kap02_translated.tex");

    let translator = UppercaseTranslator::new();
    LinePipeline::new(&translator).process_file(&input, &output, |_| {}).await?;

    let written = fs::read_to_string(&output)?;
    assert_eq!(written, "ERSTE ZEILE\n\nZWEITE ZEILE\n");
    assert_eq!(written.lines().count(), read_lines(&input).await?.len());
    Ok(())
}

/// Translator calls happen in line order
#[tokio::test]
async fn test_process_file_shouldTranslateInLineOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "kap03.tex", "eins\nzwei\n\\item drei\nvier\n")?;
    let output = temp_dir.path().join("out.tex");

    let translator = UppercaseTranslator::new();
    LinePipeline::new(&translator).process_file(&input, &output, |_| {}).await?;

    assert_eq!(translator.tracker().lock().unwrap().lines, vec!["eins", "zwei", "vier"]);
    Ok(())
}

/// A failing line stops the file; nothing after it is translated
#[tokio::test]
async fn test_process_file_withTranslatorError_shouldAbortFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "kap04.tex", "gut\nschlecht\nnie erreicht\n")?;
    let output = temp_dir.path().join("out.tex");

    let translator = FailingTranslator::new("schlecht", MockErrorType::RateLimit);
    let result = LinePipeline::new(&translator).process_file(&input, &output, |_| {}).await;

    assert!(matches!(result, Err(AppError::Translation(_))));
    assert_eq!(translator.tracker().lock().unwrap().call_count, 2);
    Ok(())
}

/// An unreadable input leaves no output file behind
#[tokio::test]
async fn test_process_file_withMissingInput_shouldNotCreateOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("out.tex");

    let translator = UppercaseTranslator::new();
    let result = LinePipeline::new(&translator)
        .process_file(&temp_dir.path().join("missing.tex"), &output, |_| {})
        .await;

    assert!(matches!(result, Err(AppError::File(_))));
    assert!(!output.exists());
    Ok(())
}

/// An existing output file is replaced, not appended to
#[tokio::test]
async fn test_process_file_withExistingOutput_shouldOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "kap05.tex", "neu\n")?;
    let output = common::create_test_file(temp_dir.path(), "out.tex", "alter Inhalt\nmit zwei Zeilen\n")?;

    let translator = UppercaseTranslator::new();
    LinePipeline::new(&translator).process_file(&input, &output, |_| {}).await?;

    assert_eq!(fs::read_to_string(&output)?, "NEU\n");
    Ok(())
}

/// The progress callback sees every line
#[tokio::test]
async fn test_process_file_shouldReportProgressPerLine() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_chapter(temp_dir.path(), "kap06.tex")?;
    let output = temp_dir.path().join("out.tex");

    let translator = UppercaseTranslator::new();
    let mut last_seen = 0;
    LinePipeline::new(&translator)
        .process_file(&input, &output, |count| last_seen = count)
        .await?;

    assert_eq!(last_seen, 10);
    Ok(())
}

/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use std::fs;
use texlate::app_config::{Config, ProcessingMode};
use texlate::app_controller::Controller;
use crate::common;

/// Points the active provider at a closed local port so no request leaves the machine
fn offline_config(root: &std::path::Path) -> Config {
    let mut config = common::config_for_dirs(root, ProcessingMode::Sequential);
    let provider = config.translation.active_provider_config_mut();
    provider.api_key = "test-key".to_string();
    provider.endpoint = "http://127.0.0.1:9".to_string();
    provider.timeout_secs = Some(5);
    config
}

/// Test the controller with custom configuration
#[test]
fn test_controller_withCustomConfig_shouldInitializeWithoutErrors() -> Result<()> {
    let mut config = Config::default();
    config.source_language = "fr".to_string();
    config.target_language = "de".to_string();

    let controller = Controller::with_config(config)?;

    assert_eq!(controller.config().target_language, "de");
    Ok(())
}

/// An empty chapter directory is a successful no-op
#[test]
fn test_run_withEmptyInputDir_shouldSucceed() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let config = offline_config(temp_dir.path());
    fs::create_dir(&config.input_dir)?;

    let controller = Controller::with_config(config.clone())?;
    let summary = tokio_test::block_on(controller.run())?;

    assert!(summary.files.is_empty());
    assert!(config.output_dir.exists());
    Ok(())
}

/// Chapters without prose never reach the provider
#[tokio::test]
async fn test_run_withStructuralOnlyChapter_shouldNotCallProvider() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = offline_config(temp_dir.path());
    fs::create_dir(&config.input_dir)?;
    let content = "\\section{Ergebnisse}\n\n\\begin{itemize}\n\\item A\n\\end{itemize}\n";
    common::create_test_file(&config.input_dir, "kap01.tex", content)?;

    let summary = Controller::with_config(config.clone())?.run().await?;

    assert_eq!(summary.translated_lines(), 0);
    assert_eq!(fs::read_to_string(config.output_dir.join("kap01_translated.tex"))?, content);
    Ok(())
}

/// An unreachable provider fails the run with the file named in the error
#[tokio::test]
async fn test_run_withUnreachableProvider_shouldFail() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let config = offline_config(temp_dir.path());
    fs::create_dir(&config.input_dir)?;
    common::create_test_file(&config.input_dir, "kap01.tex", "Ein Satz.\n")?;

    let result = Controller::with_config(config)?.run().await;

    let message = format!("{:#}", result.expect_err("run should fail"));
    assert!(message.contains("kap01.tex"));
    Ok(())
}

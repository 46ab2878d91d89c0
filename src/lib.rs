/*!
 * # texlate - LaTeX chapter translation with AI
 *
 * A Rust library for translating the prose of LaTeX chapter files while
 * leaving their markup byte-identical.
 *
 * ## Features
 *
 * - Line classification: figure blocks, list/table/math environments,
 *   sectioning commands and blank lines pass through unchanged
 * - Translation of the remaining lines using:
 *   - OpenAI API
 *   - Anthropic API
 * - One output line per input line, always in input order
 * - Sequential or bounded concurrent processing of chapter files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `latex`: Line classification
 * - `translation`: Translation services:
 *   - `translation::core`: The `LineTranslator` seam and `TranslationService`
 *   - `translation::pipeline`: Per-file line streaming
 * - `file_utils`: Chapter enumeration and output naming
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for the LLM providers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod latex;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use errors::{AppError, ProviderError, TranslationError};
pub use latex::{BlockState, LineClass, StructuralMarker, classify};
pub use translation::{LinePipeline, LineTranslator, TranslationService};

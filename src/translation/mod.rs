/*!
 * Translation of LaTeX chapters.
 *
 * - `core`: the `LineTranslator` seam and the provider-backed `TranslationService`
 * - `pipeline`: per-file streaming of classified lines through a translator
 */

pub use self::core::{LineTranslator, TokenUsageStats, TranslationService};
pub use self::pipeline::{FileReport, LineCounts, LinePipeline};

pub mod core;
pub mod pipeline;

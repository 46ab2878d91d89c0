/*!
 * Structural marker table.
 *
 * Each entry maps one environment family to a pattern. Patterns are plain
 * substring searches (unanchored) so a marker anywhere on the line counts.
 * Begin markers of list environments require the closing brace, end markers
 * do not; starred variants fall under their family's prefix.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Family of a structural line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralMarker {
    /// Any line inside a figure block, including its delimiters
    Figure,
    /// `itemize`, `enumerate` and `description` boundaries
    ListEnvironment,
    /// `\item`
    ListItem,
    /// `table` and `tabular` boundaries
    Table,
    /// `center` boundaries
    Center,
    /// `equation` and `align` boundaries, starred or not
    Math,
    /// `\section`, `\subsection`, `\subsubsection`
    Sectioning,
    /// The exact empty line
    Blank,
}

/// Line starting a figure block
pub static FIGURE_BEGIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\begin\{figure\}").unwrap());

/// Line closing a figure block
pub static FIGURE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\end\{figure\}").unwrap());

/// Ordered dispatch table, evaluated top to bottom outside figure blocks
pub static STRUCTURAL_PATTERNS: Lazy<Vec<(Regex, StructuralMarker)>> = Lazy::new(|| {
    [
        (r"\\begin\{(?:itemize|enumerate|description)\}", StructuralMarker::ListEnvironment),
        (r"\\end\{(?:itemize|enumerate|description)", StructuralMarker::ListEnvironment),
        (r"\\item", StructuralMarker::ListItem),
        (r"\\(?:begin|end)\{(?:table|tabular)", StructuralMarker::Table),
        (r"\\(?:begin|end)\{center", StructuralMarker::Center),
        (r"\\(?:begin|end)\{(?:equation|align)", StructuralMarker::Math),
        (r"\\(?:sub){0,2}section\b", StructuralMarker::Sectioning),
        (r"^$", StructuralMarker::Blank),
    ]
    .into_iter()
    .map(|(pattern, marker)| (Regex::new(pattern).unwrap(), marker))
    .collect()
});

/// First structural family matching `line`, if any
pub fn match_structural(line: &str) -> Option<StructuralMarker> {
    STRUCTURAL_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(line))
        .map(|(_, marker)| *marker)
}

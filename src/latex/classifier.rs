/*!
 * Per-line classification.
 *
 * `classify` is a pure step function over `(BlockState, line)`. Figure blocks
 * take precedence over every other rule: once `\begin{figure}` is seen, lines
 * pass through untouched until a line containing `\end{figure}` has itself
 * been passed through.
 */

use super::markers::{FIGURE_BEGIN, FIGURE_END, StructuralMarker, match_structural};

/// Scanner state carried from one line to the next within a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    /// Regular text; structural markers decide
    #[default]
    Prose,
    /// Inside a figure block
    Figure,
}

/// What to do with a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Emit unchanged
    Structural(StructuralMarker),
    /// Send to the translator
    Translatable,
}

impl LineClass {
    pub fn is_translatable(&self) -> bool {
        matches!(self, Self::Translatable)
    }
}

/// Classify `line` given the current state, returning the state for the next line
pub fn classify(state: BlockState, line: &str) -> (BlockState, LineClass) {
    if state == BlockState::Figure || FIGURE_BEGIN.is_match(line) {
        let next = if FIGURE_END.is_match(line) {
            BlockState::Prose
        } else {
            BlockState::Figure
        };
        return (next, LineClass::Structural(StructuralMarker::Figure));
    }

    match match_structural(line) {
        Some(marker) => (BlockState::Prose, LineClass::Structural(marker)),
        None => (BlockState::Prose, LineClass::Translatable),
    }
}

/// Classify a whole file's lines from a fresh state
pub fn classify_all<'a, I>(lines: I) -> Vec<LineClass>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut state = BlockState::default();
    lines
        .into_iter()
        .map(|line| {
            let (next, class) = classify(state, line);
            state = next;
            class
        })
        .collect()
}

/*!
 * LaTeX line classification.
 *
 * - `markers`: the ordered table of structural patterns
 * - `classifier`: the per-line state machine built on top of it
 */

pub use self::classifier::{BlockState, LineClass, classify, classify_all};
pub use self::markers::{StructuralMarker, match_structural};

pub mod classifier;
pub mod markers;

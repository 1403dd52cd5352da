//! Context assembly for the answer prompt.

use crate::retrieval::RetrievedFragment;

/// Separator placed between fragments: exactly one blank line.
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Join the non-empty fragment contents in rank order.
///
/// Never fails; no fragments (or only empty ones) yield an empty string.
pub fn assemble_context(fragments: &[RetrievedFragment]) -> String {
    fragments
        .iter()
        .map(|fragment| fragment.content.as_str())
        .filter(|content| !content.is_empty())
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR)
}

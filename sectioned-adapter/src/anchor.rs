use alloc::string::String;

use sectioned::{Role, SectionExt, SectionedAdapter};

/// A position anchor that survives section mutations.
///
/// Typical use cases:
/// - keep the first visible row in place when a section above it is hidden, expands, or
///   switches between loading and loaded
/// - restore a position after sections are re-registered
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionAnchor {
    pub key: String,
    pub role: Role,
    /// Position among the section's content rows; `None` for headers and footers.
    pub content_index: Option<usize>,
}

/// Captures an anchor for the row at a flat position.
///
/// Returns `None` if the position is out of range.
pub fn capture_anchor<H>(adapter: &SectionedAdapter<H>, position: usize) -> Option<SectionAnchor> {
    let resolved = adapter.resolve(position).ok()?;
    Some(SectionAnchor {
        key: resolved.key.into(),
        role: resolved.role,
        content_index: resolved.content_index(),
    })
}

/// Maps a previously captured anchor to a flat position in the current layout.
///
/// Content anchors are clamped to the section's current content rows, so an anchor on item 7
/// lands on the placeholder once the section starts loading. A section left with no content
/// rows anchors to its first row. Returns `None` if the section was removed or hidden, or no
/// longer shows the anchored header/footer.
pub fn resolve_anchor<H>(adapter: &SectionedAdapter<H>, anchor: &SectionAnchor) -> Option<usize> {
    match anchor.role {
        Role::Header => adapter.header_position(&anchor.key).ok(),
        Role::Footer => adapter.footer_position(&anchor.key).ok(),
        Role::Content(_) => {
            let range = adapter.section_range(&anchor.key).ok()?;
            let section = adapter.section(&anchor.key).ok()?;
            let header = usize::from(section.has_header());
            let footer = usize::from(section.has_footer());
            let content = range.len().saturating_sub(header + footer);
            if content == 0 {
                return (!range.is_empty()).then_some(range.start);
            }
            let index = anchor.content_index.unwrap_or(0).min(content - 1);
            Some(range.start + header + index)
        }
    }
}

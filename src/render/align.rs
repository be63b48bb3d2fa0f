//! Label alignment for the description template.
//!
//! Forum fonts render CJK ideographs twice as wide as ASCII, so labels are
//! measured in "label units" and padded with full-width spaces until every
//! value starts in the same column.

/// Full-width space used as padding.
pub const FULL_WIDTH_SPACE: char = '\u{3000}';

/// Width, in label units, that every label is padded to.
pub const LABEL_WIDTH: usize = 8;

/// Width of the unlabeled episode lines.
pub const EPISODE_INDENT: usize = 5;

/// Visual width of `label`: CJK unified ideographs count 2, everything else 1.
pub fn label_units(label: &str) -> usize {
    label
        .chars()
        .map(|c| if is_cjk_ideograph(c) { 2 } else { 1 })
        .sum()
}

fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Render `label` and `content` on one line, padding the label to `width`.
///
/// With `bbcode`, a non-empty label is wrapped in bold dark red; padding and
/// content are left untouched.
pub fn align_with(label: &str, content: &str, width: usize, bbcode: bool) -> String {
    let padding: String = std::iter::repeat(FULL_WIDTH_SPACE)
        .take(width.saturating_sub(label_units(label)))
        .collect();

    if bbcode && !label.is_empty() {
        format!("[b][color=DarkRed]{label}[/color][/b]{padding}{content}")
    } else {
        format!("{label}{padding}{content}")
    }
}

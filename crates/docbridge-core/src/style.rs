//! Inline formatting carried down the HTML tree

/// Character formatting of a run
///
/// Values are copied on descent; a child never changes its parent's style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    /// Font size in points, None inherits the paragraph style's size
    pub size_pt: Option<u32>,
}

impl RunStyle {
    /// Unformatted style with an optional base size
    pub fn sized(size_pt: Option<u32>) -> Self {
        Self {
            size_pt,
            ..Default::default()
        }
    }

    /// Copy with bold turned on
    pub fn with_bold(self) -> Self {
        Self { bold: true, ..self }
    }

    /// Copy with italic turned on
    pub fn with_italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }
}

/// A piece of text with fully resolved formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub style: RunStyle,
    /// Hyperlink target, when the text came from an anchor with an `href`
    pub link: Option<String>,
}

impl TextRun {
    /// A run without a link
    pub fn plain(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
            link: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_keep_other_fields() {
        let base = RunStyle::sized(Some(18));
        let styled = base.with_bold().with_italic();

        assert_eq!(
            styled,
            RunStyle {
                bold: true,
                italic: true,
                size_pt: Some(18)
            }
        );
        assert_eq!(base, RunStyle::sized(Some(18)));
    }
}

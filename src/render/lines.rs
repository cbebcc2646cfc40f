/// Font face used for a line of report text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

/// A single line of positioned report text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub size: u8,
    pub style: FontStyle,
    /// Extra vertical gap inserted before the line, in points.
    pub gap_before: u16,
}

impl TextLine {
    pub fn title(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: 20,
            style: FontStyle::Bold,
            gap_before: 0,
        }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: 14,
            style: FontStyle::Bold,
            gap_before: 12,
        }
    }

    pub fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: 11,
            style: FontStyle::Regular,
            gap_before: 0,
        }
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        Self::body(format!("- {}", text.into()))
    }
}

/// The lines of one page, top to bottom.
pub type PageLines = Vec<TextLine>;

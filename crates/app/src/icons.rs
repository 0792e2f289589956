/// Icon shown next to a category in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryIcon {
    Numbers,
    Bolt,
    Atom,
    Sparkles,
}

const ICONS_BY_TITLE: &[(&str, CategoryIcon)] = &[
    ("Mathematics", CategoryIcon::Numbers),
    ("Marvel Super Heroes", CategoryIcon::Bolt),
    ("Science!", CategoryIcon::Atom),
];

impl CategoryIcon {
    /// Look up the icon for an exact category title; unknown titles get `Sparkles`.
    #[must_use]
    pub fn for_title(title: &str) -> Self {
        ICONS_BY_TITLE
            .iter()
            .find(|(known, _)| *known == title)
            .map_or(Self::Sparkles, |(_, icon)| *icon)
    }

    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Numbers => "🔢",
            Self::Bolt => "⚡",
            Self::Atom => "⚛",
            Self::Sparkles => "✨",
        }
    }
}

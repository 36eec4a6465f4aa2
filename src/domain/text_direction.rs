const ARABIC_BLOCK: std::ops::RangeInclusive<char> = '\u{0600}'..='\u{06FF}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

impl TextDirection {
    /// Any Arabic-script character flips the whole message to right-to-left.
    pub fn detect(text: &str) -> Self {
        if text.chars().any(|c| ARABIC_BLOCK.contains(&c)) {
            Self::Rtl
        } else {
            Self::Ltr
        }
    }

    pub fn alignment(&self) -> Alignment {
        match self {
            Self::Ltr => Alignment::Left,
            Self::Rtl => Alignment::Right,
        }
    }

    pub fn as_attr(&self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

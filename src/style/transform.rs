//! Text case transformation applied to label text.

use std::str::FromStr;

/// Case transformation requested by a draw rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextTransform {
    /// No transformation.
    #[default]
    None,
    /// ALL UPPERCASE.
    Uppercase,
    /// all lowercase.
    Lowercase,
    /// First Letter Of Each Word.
    Capitalize,
}

impl FromStr for TextTransform {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "uppercase" => Self::Uppercase,
            "lowercase" => Self::Lowercase,
            "capitalize" => Self::Capitalize,
            "none" | "" => Self::None,
            _ => return Err("unknown text transform"),
        })
    }
}

/// Apply a text transformation.
pub fn apply_text_transform(text: &str, transform: TextTransform) -> String {
    match transform {
        TextTransform::None => text.to_string(),
        TextTransform::Uppercase => text.to_uppercase(),
        TextTransform::Lowercase => text.to_lowercase(),
        TextTransform::Capitalize => text.split_inclusive(char::is_whitespace).map(capitalize_word).collect(),
    }
}

/// Uppercase the first char of a word piece. Pieces end at a whitespace
/// char, so a piece starting with one is a run separator.
fn capitalize_word(piece: &str) -> String {
    let mut chars = piece.chars();
    match chars.next() {
        Some(first) if !first.is_whitespace() => first.to_uppercase().chain(chars).collect(),
        _ => piece.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transforms() {
        assert_eq!(apply_text_transform("Main Street", TextTransform::Uppercase), "MAIN STREET");
        assert_eq!(apply_text_transform("Main Street", TextTransform::Lowercase), "main street");
        assert_eq!(apply_text_transform("rue de la paix", TextTransform::Capitalize), "Rue De La Paix");
        assert_eq!(apply_text_transform("As Is", TextTransform::None), "As Is");
    }

    #[test]
    fn test_capitalize_keeps_spacing_and_handles_non_ascii() {
        assert_eq!(apply_text_transform("  élan  vital", TextTransform::Capitalize), "  Élan  Vital");
        assert_eq!(apply_text_transform("straße\tößl\n", TextTransform::Capitalize), "Straße\tÖßl\n");
        // multi-char uppercase mapping
        assert_eq!(apply_text_transform("ßx", TextTransform::Capitalize), "SSx");
        assert_eq!(apply_text_transform("mcDonald", TextTransform::Capitalize), "McDonald");
        assert_eq!(apply_text_transform("", TextTransform::Capitalize), "");
    }

    #[test]
    fn test_parse() {
        assert_eq!("capitalize".parse(), Ok(TextTransform::Capitalize));
        assert_eq!("".parse(), Ok(TextTransform::None));
        assert!("smallcaps".parse::<TextTransform>().is_err());
    }
}

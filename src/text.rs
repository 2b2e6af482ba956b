use regex::Regex;
use std::sync::LazyLock;

pub const MISSING_DESCRIPTION: &str = "No description available.";

// "[regular damage]{mechanic:regular-damage}" -> "regular damage"
static LINK_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\{[^}]+\}").expect("valid link markup pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Strip dataset markup from effect and description text.
pub fn clean_effect_text(text: &str) -> String {
    let text = text.replace('\n', " ");
    let text = LINK_MARKUP.replace_all(text.trim(), "$1");
    let text = text.replace(['[', ']'], "");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Cleaned text, or a placeholder when there is nothing to show
pub fn describe_or_placeholder(text: &str) -> String {
    let cleaned = clean_effect_text(text);
    if cleaned.is_empty() {
        MISSING_DESCRIPTION.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(
        "Inflicts [regular damage]{mechanic:regular-damage} with no additional effect.",
        "Inflicts regular damage with no additional effect."
    )]
    #[case("Lowers the target's\n[Attack]{mechanic:stat}  by one stage.", "Lowers the target's Attack by one stage.")]
    #[case("Stray [brackets] stay readable", "Stray brackets stay readable")]
    #[case("  padded  ", "padded")]
    fn test_clean_effect_text(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(clean_effect_text(raw), expected);
    }

    #[test]
    fn test_placeholder_for_blank_text() {
        assert_eq!(describe_or_placeholder(""), MISSING_DESCRIPTION);
        assert_eq!(describe_or_placeholder(" \n "), MISSING_DESCRIPTION);
        assert_eq!(describe_or_placeholder("Never misses."), "Never misses.");
    }
}

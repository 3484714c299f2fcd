//! Cache keys derived from prompt text.

use std::fmt;

/// Normalized form of a prompt used to key the image cache.
///
/// Two prompts that differ only in letter case or in the amount and kind
/// of whitespace map to the same key:
///
/// ```
/// use genimage_gateway::domain::PromptKey;
///
/// let a = PromptKey::from_prompt("  A  Red\tFox ");
/// let b = PromptKey::from_prompt("a red fox");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "image_a_red_fox");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PromptKey(String);

impl PromptKey {
    const PREFIX: &'static str = "image_";

    /// Trims, collapses whitespace runs to `_`, lowercases, and prefixes.
    ///
    /// Leading and trailing whitespace is dropped rather than turned into
    /// `_`, so `" a fox"` and `"a fox"` share the key `image_a_fox`. Keys
    /// from earlier deployments that kept edge underscores do not match.
    #[must_use]
    pub fn from_prompt(prompt: &str) -> Self {
        let body = prompt
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase();
        Self(format!("{}{body}", Self::PREFIX))
    }

    /// Returns the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        let key = PromptKey::from_prompt("cat\n\n on   a\tmat");
        assert_eq!(key.as_str(), "image_cat_on_a_mat");
    }

    #[test]
    fn edge_whitespace_does_not_become_underscores() {
        assert_eq!(PromptKey::from_prompt(" a fox").as_str(), "image_a_fox");
        assert_eq!(PromptKey::from_prompt("a fox\n").as_str(), "image_a_fox");
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(
            PromptKey::from_prompt("Neon CITY"),
            PromptKey::from_prompt("neon city")
        );
    }

    #[test]
    fn punctuation_is_kept() {
        let key = PromptKey::from_prompt("Sunflowers, oil on canvas!");
        assert_eq!(key.as_str(), "image_sunflowers,_oil_on_canvas!");
    }

    #[test]
    fn distinct_words_stay_distinct() {
        assert_ne!(
            PromptKey::from_prompt("red fox"),
            PromptKey::from_prompt("redfox")
        );
    }
}

//! "Surprise me" prompt suggestions.

/// Sample prompts offered when the user asks for inspiration.
pub const SURPRISE_PROMPTS: &[&str] = &[
    "an armchair in the shape of an avocado",
    "a lighthouse on a cliff at dusk, oil painting",
    "a fox wearing a knitted scarf, watercolor",
    "a neon-lit city street in the rain, cinematic",
    "a bowl of ramen floating in space, digital art",
    "an astronaut riding a horse on the moon, photorealistic",
    "a cozy cabin in a snowy forest, warm light in the windows",
    "a steampunk owl made of brass gears",
    "a sunflower field under a starry sky, Van Gogh style",
    "a tiny dragon sleeping in a teacup",
    "an underwater library with glowing jellyfish",
    "a robot painting a self-portrait in a sunlit studio",
];

/// Picks a random sample prompt that differs from `current`.
#[must_use]
pub fn surprise_prompt(current: &str) -> &'static str {
    pick_other(SURPRISE_PROMPTS, current)
}

/// Picks a random entry of `prompts` other than `current`, falling back to
/// the first entry when nothing else is available.
fn pick_other(prompts: &[&'static str], current: &str) -> &'static str {
    let candidates: Vec<&'static str> = prompts
        .iter()
        .copied()
        .filter(|prompt| *prompt != current)
        .collect();
    candidates
        .get(random_index(candidates.len()))
        .or_else(|| prompts.first())
        .copied()
        .unwrap_or_default()
}

/// Uniform index in `0..len` drawn from a v4 UUID's random bits.
fn random_index(len: usize) -> usize {
    let len = u128::try_from(len.max(1)).unwrap_or(u128::MAX);
    usize::try_from(uuid::Uuid::new_v4().as_u128() % len).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_comes_from_the_list() {
        assert!(SURPRISE_PROMPTS.contains(&surprise_prompt("")));
    }

    #[test]
    fn single_entry_list_returns_without_spinning() {
        assert_eq!(pick_other(&["only"], "only"), "only");
        assert_eq!(pick_other(&["only"], "other"), "only");
        assert_eq!(pick_other(&[], "anything"), "");
    }

    #[test]
    fn random_index_stays_in_range() {
        assert_eq!(random_index(0), 0);
        assert_eq!(random_index(1), 0);
        for _ in 0..50 {
            assert!(random_index(3) < 3);
        }
    }

    #[test]
    fn suggestion_differs_from_current_prompt() {
        for current in SURPRISE_PROMPTS {
            for _ in 0..20 {
                assert_ne!(surprise_prompt(current), *current);
            }
        }
    }
}

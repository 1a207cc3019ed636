//! Writing prompts shown to the user.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::ConfigError;

/// Prompts used when no config file overrides them.
pub const DEFAULT_PROMPTS: &[&str] = &[
    "Describe your favorite book and why you like it.",
    "Explain how to bake a cake step by step.",
    "What does it mean to live a good life?",
    "Give your opinion on the importance of education.",
    "How would you teach someone to ride a bicycle?",
];

/// A non-empty, ordered list of writing prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBank {
    prompts: Vec<String>,
}

impl PromptBank {
    /// Build a bank from the given prompts. Blank entries are dropped and
    /// the rest are trimmed; an empty result is an error.
    pub fn new(prompts: Vec<String>) -> Result<Self, ConfigError> {
        let prompts: Vec<String> = prompts
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if prompts.is_empty() {
            return Err(ConfigError::EmptyPromptList);
        }
        Ok(Self { prompts })
    }

    /// Pick a prompt uniformly at random.
    pub fn pick(&self) -> &str {
        self.pick_with(&mut rand::thread_rng())
    }

    /// Pick a prompt using the supplied RNG.
    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // `new` guarantees at least one prompt.
        let prompt = self
            .prompts
            .choose(rng)
            .map_or(DEFAULT_PROMPTS[0], String::as_str);
        debug!("Picked prompt: {prompt}");
        prompt
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn contains(&self, prompt: &str) -> bool {
        self.prompts.iter().any(|p| p == prompt)
    }
}

impl Default for PromptBank {
    fn default() -> Self {
        Self {
            prompts: DEFAULT_PROMPTS.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

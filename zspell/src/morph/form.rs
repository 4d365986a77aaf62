//! `AffixForm`/`CompoundForm`: transient word-form hypotheses produced while
//! walking the affix tries and consulting the lexicon.

use crate::affix::Affix;
use crate::dict::Word;

/// A hypothesis that `surface_text` is `stem` plus up to two prefixes and up
/// to two suffixes. Invariant (spec.md §3): concatenating
/// `prefix.append · secondary_prefix.append · stem · secondary_suffix.append
/// · suffix.append` (after accounting for each affix's `strip`) equals
/// `surface_text`.
#[derive(Debug, Clone)]
pub struct AffixForm<'a> {
    pub surface_text: String,
    pub stem: String,
    pub prefix: Option<&'a Affix>,
    pub secondary_prefix: Option<&'a Affix>,
    pub suffix: Option<&'a Affix>,
    pub secondary_suffix: Option<&'a Affix>,
    pub dictionary_entry: Option<&'a Word>,
}

impl<'a> AffixForm<'a> {
    pub fn trivial(word: &str, entry: Option<&'a Word>) -> Self {
        Self {
            surface_text: word.to_owned(),
            stem: word.to_owned(),
            prefix: None,
            secondary_prefix: None,
            suffix: None,
            secondary_suffix: None,
            dictionary_entry: entry,
        }
    }

    pub fn has_affixes(&self) -> bool {
        self.prefix.is_some()
            || self.secondary_prefix.is_some()
            || self.suffix.is_some()
            || self.secondary_suffix.is_some()
    }

    /// Every affix attached to this form, prefixes first (outer then inner),
    /// then suffixes (inner then outer).
    pub fn affixes(&self) -> impl Iterator<Item = &'a Affix> + '_ {
        [self.prefix, self.secondary_prefix, self.secondary_suffix, self.suffix]
            .into_iter()
            .flatten()
    }
}

/// An ordered list of `AffixForm`s making up a compound word.
#[derive(Debug, Clone)]
pub struct CompoundForm<'a> {
    pub parts: Vec<AffixForm<'a>>,
}

impl<'a> CompoundForm<'a> {
    pub fn surface_text(&self) -> String {
        self.parts.iter().map(|p| p.surface_text.as_str()).collect()
    }
}

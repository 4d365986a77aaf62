//! Hunspell-compatible affix and dictionary spell-checking library.
//!
//! Load a dictionary with [`DictBuilder`], then check words with
//! [`Dictionary::check`] and look up suggestions/stems/morphology through
//! [`Dictionary::entry`].
//!
//! ```no_run
//! use zspell::DictBuilder;
//!
//! let dict = DictBuilder::new()
//!     .config_path("en_US.aff")
//!     .dict_path("en_US.dic")
//!     .build()
//!     .unwrap();
//!
//! assert!(dict.check("hello"));
//! if !dict.check("helo") {
//!     println!("{:?}", dict.entry("helo").suggest());
//! }
//! ```

#![forbid(unsafe_code)]

mod affix;
mod builder;
mod dict;
mod error;
mod flag;
mod helpers;
mod lookup;
mod morph;
mod suggest;

use std::sync::Arc;

use hashbrown::HashMap;

pub use affix::MorphInfo;
pub use builder::DictBuilder;
pub use error::{DictParseError, Error, ParseError, ParseErrorType};

use affix::Aff;
use dict::{Dic, Word};
use lookup::LookupOptions;

/// A loaded, queryable Hunspell-compatible dictionary.
///
/// Cheap to clone: the parsed affix configuration and lexicon are shared
/// via `Arc`, and `Dictionary` is `Send + Sync` so one instance can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct Dictionary {
    inner: Arc<DictionaryInner>,
}

#[derive(Debug)]
struct DictionaryInner {
    aff: Aff,
    dic: Dic,
}

impl Dictionary {
    pub(crate) fn new(aff: Aff, dic: Dic) -> Self {
        Self { inner: Arc::new(DictionaryInner { aff, dic }) }
    }

    /// Is `word` correctly spelled? Checks capitalization, honors
    /// `NOSUGGEST`-flagged entries as valid, and attempts break
    /// decomposition for hyphenated/space-separated input.
    pub fn check(&self, word: &str) -> bool {
        lookup::lookup(
            &self.inner.aff,
            &self.inner.dic,
            word,
            LookupOptions { check_capitalization: true, allow_nosuggest: true, allow_break: true },
        )
    }

    /// Look up `word`, returning a handle for suggestions, stemming, and
    /// morphological analysis.
    pub fn entry<'a>(&'a self, word: &'a str) -> DictionaryEntry<'a> {
        DictionaryEntry { dict: self, word }
    }

    /// Every correctly spelled, suggestable word in the loaded lexicon
    /// (excludes `NOSUGGEST`/`FORBIDDENWORD`-flagged entries).
    pub fn wordlist(&self) -> WordList<'_> {
        self.partition_wordlist(|w| {
            !flagged(w, self.inner.aff.nosuggest_flag) && !flagged(w, self.inner.aff.forbidden_word_flag)
        })
    }

    /// Every `NOSUGGEST`-flagged word: correctly spelled, but never offered
    /// as a suggestion.
    pub fn wordlist_nosuggest(&self) -> WordList<'_> {
        self.partition_wordlist(|w| flagged(w, self.inner.aff.nosuggest_flag))
    }

    /// Every `FORBIDDENWORD`-flagged word.
    pub fn wordlist_forbidden(&self) -> WordList<'_> {
        self.partition_wordlist(|w| flagged(w, self.inner.aff.forbidden_word_flag))
    }

    fn partition_wordlist(&self, pred: impl Fn(&Word) -> bool) -> WordList<'_> {
        let mut map: HashMap<&str, Vec<&Word>> = HashMap::new();
        for word in self.inner.dic.iter() {
            if pred(word) {
                map.entry(word.stem.as_str()).or_default().push(word);
            }
        }
        WordList { inner: map }
    }
}

fn flagged(word: &Word, flag: Option<crate::flag::Flag>) -> bool {
    flag.is_some_and(|f| word.has_flag(f))
}

/// A stem-keyed view of part of a [`Dictionary`]'s lexicon, as produced by
/// [`Dictionary::wordlist`] and friends. Multi-valued: homonyms (same stem,
/// different flag sets) share a key.
#[derive(Debug)]
pub struct WordList<'a> {
    inner: HashMap<&'a str, Vec<&'a Word>>,
}

impl<'a> WordList<'a> {
    pub fn inner(&self) -> &HashMap<&'a str, Vec<&'a Word>> {
        &self.inner
    }
}

/// A single word looked up against a [`Dictionary`]: suggestions, stems, and
/// morphological analysis, each computed on demand.
#[derive(Debug, Clone, Copy)]
pub struct DictionaryEntry<'a> {
    dict: &'a Dictionary,
    word: &'a str,
}

impl<'a> DictionaryEntry<'a> {
    /// Ranked spelling suggestions for this entry's word, or `None` if the
    /// word is already correctly spelled.
    pub fn suggest(&self) -> Option<Vec<String>> {
        if self.dict.check(self.word) {
            return None;
        }
        Some(suggest::suggest(&self.dict.inner.aff, &self.dict.inner.dic, self.word).collect())
    }

    /// The dictionary stem(s) that make this entry's word valid, or `None`
    /// if it is not a correctly spelled word. Words only accepted via
    /// `COMPOUNDRULE` matching or break decomposition report themselves as
    /// their own single stem.
    pub fn stems(&self) -> Option<impl Iterator<Item = &'a str>> {
        if !self.dict.check(self.word) {
            return None;
        }
        let forms = lookup::matching_forms(&self.dict.inner.aff, &self.dict.inner.dic, self.word);
        let mut stems: Vec<&'a str> =
            forms.iter().filter_map(|f| f.dictionary_entry.map(|e| e.stem.as_str())).collect();
        if stems.is_empty() {
            stems.push(self.word);
        }
        Some(stems.into_iter())
    }

    /// Morphological data tags (`st:`/`po:`/... fields) attached to
    /// whichever dictionary entries made this entry's word valid, or `None`
    /// if it is not a correctly spelled word.
    pub fn analyze(&self) -> Option<impl Iterator<Item = &'a MorphInfo>> {
        if !self.dict.check(self.word) {
            return None;
        }
        let forms = lookup::matching_forms(&self.dict.inner.aff, &self.dict.inner.dic, self.word);
        let tags: Vec<&'a MorphInfo> =
            forms.iter().filter_map(|f| f.dictionary_entry).flat_map(|e| e.data_tags.iter()).collect();
        Some(tags.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_and_entry_roundtrip() {
        let dict = DictBuilder::new()
            .config_str("SFX S Y 1\nSFX S 0 s .\n")
            .dict_str("1\ncat/S\n")
            .build()
            .unwrap();

        assert!(dict.check("cat"));
        assert!(dict.check("cats"));
        assert!(!dict.check("dog"));

        let entry = dict.entry("cats");
        assert!(entry.suggest().is_none());
        assert_eq!(entry.stems().unwrap().collect::<Vec<_>>(), vec!["cat"]);
    }

    #[test]
    fn wordlists_partition_by_flag() {
        let dict = DictBuilder::new()
            .config_str("NOSUGGEST N\nFORBIDDENWORD F\n")
            .dict_str("3\nhello\nhush/N\nbadword/F\n")
            .build()
            .unwrap();

        assert!(dict.wordlist().inner().contains_key("hello"));
        assert!(!dict.wordlist().inner().contains_key("hush"));
        assert!(dict.wordlist_nosuggest().inner().contains_key("hush"));
        assert!(dict.wordlist_forbidden().inner().contains_key("badword"));
    }
}

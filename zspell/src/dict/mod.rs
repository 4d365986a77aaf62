//! The lexicon: `Word` entries plus the `Dic` index structure, and the
//! `.dic`-file parser.

pub(crate) mod parser_dict;

use hashbrown::HashMap;

use crate::affix::MorphInfo;
use crate::flag::FlagSet;
use crate::morph::Captype;

/// One dictionary entry, parsed from a single `.dic` line.
#[derive(Debug, Clone)]
pub struct Word {
    pub stem: String,
    pub flags: FlagSet,
    pub data_tags: Vec<MorphInfo>,
    pub captype: Captype,
    pub alt_spellings: Vec<String>,
}

impl Word {
    pub fn has_flag(&self, flag: crate::flag::Flag) -> bool {
        self.flags.contains(flag)
    }
}

/// The full lexicon: the word list plus exact-stem and lowercased-stem
/// indexes. Both indexes are multi-valued since homonyms (same stem,
/// different flag sets) coexist.
#[derive(Debug, Default)]
pub struct Dic {
    pub words: Vec<Word>,
    by_stem: HashMap<String, Vec<usize>>,
    by_lower: HashMap<String, Vec<usize>>,
}

impl Dic {
    pub fn push(&mut self, word: Word) {
        let idx = self.words.len();
        self.by_stem.entry(word.stem.clone()).or_default().push(idx);
        self.by_lower
            .entry(word.stem.to_lowercase())
            .or_default()
            .push(idx);
        self.words.push(word);
    }

    pub fn homonyms(&self, stem: &str) -> impl Iterator<Item = &Word> + '_ {
        self.by_stem
            .get(stem)
            .into_iter()
            .flatten()
            .map(move |&i| &self.words[i])
    }

    pub fn homonyms_lower(&self, stem_lower: &str) -> impl Iterator<Item = &Word> + '_ {
        self.by_lower
            .get(stem_lower)
            .into_iter()
            .flatten()
            .map(move |&i| &self.words[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

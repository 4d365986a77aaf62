//! [`DictBuilder`]: assembles a [`crate::Dictionary`] from `.aff`/`.dic`/
//! personal-dictionary text or file paths.
//!
//! Grounded on `test-util`'s `TestManager::build_dict`, the concrete caller
//! this builder must satisfy: `.config_str(..).dict_str(..)` always set,
//! `.personal_str(..)` set only when the fixture carries one.

use std::fs;
use std::path::{Path, PathBuf};

use crate::affix::parser_affix::parse_affix;
use crate::affix::{consolidate, Aff, RepRule};
use crate::dict::parser_dict::parse_dict;
use crate::dict::{Dic, Word};
use crate::error::Error;
use crate::morph::CasingVariant;
use crate::Dictionary;

/// Builder for a [`Dictionary`]. Affix and dictionary sources are required;
/// each may be supplied as an in-memory string or a file path, and a
/// personal-dictionary source may additionally be layered on top.
#[derive(Debug, Clone, Default)]
pub struct DictBuilder<'a> {
    config_str: Option<&'a str>,
    config_path: Option<PathBuf>,
    dict_str: Option<&'a str>,
    dict_path: Option<PathBuf>,
    personal_str: Option<&'a str>,
    personal_path: Option<PathBuf>,
}

impl<'a> DictBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Affix (`.aff`) file contents.
    pub fn config_str(mut self, s: &'a str) -> Self {
        self.config_str = Some(s);
        self
    }

    /// Path to an affix (`.aff`) file, read at [`Self::build`] time.
    pub fn config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_owned());
        self
    }

    /// Dictionary (`.dic`) file contents.
    pub fn dict_str(mut self, s: &'a str) -> Self {
        self.dict_str = Some(s);
        self
    }

    /// Path to a dictionary (`.dic`) file, read at [`Self::build`] time.
    pub fn dict_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dict_path = Some(path.as_ref().to_owned());
        self
    }

    /// Personal dictionary contents: one `word` or `word/flags` per line,
    /// optionally followed by whitespace and a "friend" word that becomes a
    /// `REP`-table correction pair.
    pub fn personal_str(mut self, s: &'a str) -> Self {
        self.personal_str = Some(s);
        self
    }

    /// Path to a personal dictionary file, read at [`Self::build`] time.
    pub fn personal_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.personal_path = Some(path.as_ref().to_owned());
        self
    }

    pub fn build(self) -> Result<Dictionary, Error> {
        let config_owned;
        let config_src = if let Some(s) = self.config_str {
            s
        } else if let Some(path) = &self.config_path {
            config_owned = fs::read_to_string(path)?;
            config_owned.as_str()
        } else {
            return Err(Error::MissingInput("affix (.aff) source"));
        };

        let dict_owned;
        let dict_src = if let Some(s) = self.dict_str {
            s
        } else if let Some(path) = &self.dict_path {
            dict_owned = fs::read_to_string(path)?;
            dict_owned.as_str()
        } else {
            return Err(Error::MissingInput("dictionary (.dic) source"));
        };

        let nodes = parse_affix(config_src)?;
        let mut aff = consolidate(nodes)?;
        let mut dic = parse_dict(dict_src, &mut aff)?;

        let personal_owned;
        let personal_src = if let Some(s) = self.personal_str {
            Some(s)
        } else if let Some(path) = &self.personal_path {
            personal_owned = fs::read_to_string(path)?;
            Some(personal_owned.as_str())
        } else {
            None
        };

        if let Some(src) = personal_src {
            apply_personal_dict(&mut aff, &mut dic, src);
        }

        Ok(Dictionary::new(aff, dic))
    }
}

/// Fold personal-dictionary lines into `dic`, adding a `REP` correction pair
/// for any "friend" word.
fn apply_personal_dict(aff: &mut Aff, dic: &mut Dic, src: &str) {
    let casing = CasingVariant::select(aff.lang.as_deref(), aff.check_sharps);

    for line in src.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let Some(word_flags) = parts.next() else { continue };
        let friend = parts.next();

        let (stem, flags_raw) = match word_flags.split_once('/') {
            Some((s, f)) => (s.to_owned(), f),
            None => (word_flags.to_owned(), ""),
        };
        let flags = aff.intern_flag_set(flags_raw);
        let captype = casing.classify(&stem);

        if let Some(friend) = friend {
            if let Ok(regex) = regex::Regex::new(&regex::escape(&stem)) {
                aff.rep_table.push(RepRule { regex, replacement: friend.to_owned() });
            }
        }

        dic.push(Word { stem, flags, data_tags: Vec::new(), captype, alt_spellings: Vec::new() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sources_report_which_input_is_missing() {
        let err = DictBuilder::new().build().unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
    }

    #[test]
    fn builds_from_strings() {
        let dict = DictBuilder::new()
            .config_str("SET UTF-8\n")
            .dict_str("1\nhello\n")
            .build()
            .unwrap();
        assert!(dict.check("hello"));
        assert!(!dict.check("goodbye"));
    }

    #[test]
    fn personal_dict_adds_words() {
        let dict = DictBuilder::new()
            .config_str("SET UTF-8\n")
            .dict_str("1\nhello\n")
            .personal_str("goodbye\n")
            .build()
            .unwrap();
        assert!(dict.check("goodbye"));
    }
}

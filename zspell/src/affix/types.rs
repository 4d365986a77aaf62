//! Value types produced by [`super::parser_affix`] while munching a raw
//! `.aff` file, before they are consolidated into the compiled [`super::Aff`].

use std::str::FromStr;

use regex::Regex;

use crate::error::ParseErrorType;

/// Character-set encoding declared by the `SET` directive. Dictionaries are
/// re-decoded to UTF-8 at load time regardless of this value; it is recorded
/// for round-tripping and to validate `WORDCHARS`/flag bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Iso8859(u8),
    Other(String),
}

impl TryFrom<&str> for Encoding {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("UTF-8") {
            return Ok(Self::Utf8);
        }
        if let Some(rest) = s
            .strip_prefix("ISO8859-")
            .or_else(|| s.strip_prefix("ISO-8859-"))
        {
            return rest
                .parse::<u8>()
                .map(Self::Iso8859)
                .map_err(|_| format!("unrecognized encoding '{s}'"));
        }
        if s.is_empty() {
            return Err("empty encoding".to_owned());
        }
        Ok(Self::Other(s.to_owned()))
    }
}

/// A single `(from, to)` text-conversion pair, used for `REP`, `ICONV`, and
/// `OCONV` tables. `from` is compiled as a regex because Hunspell allows
/// anchors (`^`/`$`) and alternation inside `REP` patterns.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub from: String,
    pub to: String,
    pub regex: Regex,
}

impl Conversion {
    pub fn from_str(content: &str, _is_output: bool) -> Result<Self, ParseErrorType> {
        let mut parts = content.split_whitespace();
        let from = parts
            .next()
            .ok_or_else(|| ParseErrorType::AffixBody(content.to_owned()))?
            .to_owned();
        let to = parts
            .next()
            .unwrap_or("")
            .replace('_', " ");

        let anchored = from.starts_with('^') || from.ends_with('$');
        let pattern = if anchored {
            from.clone()
        } else {
            regex::escape(&from)
        };
        let regex = if anchored {
            Regex::new(&pattern)
        } else {
            Regex::new(&pattern)
        }
        .map_err(|e| ParseErrorType::AffixBody(format!("{content}: {e}")))?;

        Ok(Self { from, to, regex })
    }
}

/// One rule of a `PHONE` metaphone table: a match pattern plus its
/// replacement, following Hunspell's terse phonetic-rule mini-language
/// (`-` as "delete", trailing `^` as "only at start of word", etc). We store
/// the raw pieces and compile an anchored regex that [`crate::suggest::phonet`]
/// drives left-to-right.
#[derive(Debug, Clone)]
pub struct Phonetic {
    pub pattern: String,
    pub replacement: String,
    pub regex: Regex,
}

impl TryFrom<&str> for Phonetic {
    type Error = String;

    fn try_from(item: &str) -> Result<Self, Self::Error> {
        let mut parts = item.split_whitespace();
        let raw_pattern = parts
            .next()
            .ok_or_else(|| format!("empty PHONE entry '{item}'"))?
            .to_owned();
        let raw_replacement = parts.next().unwrap_or("").to_owned();
        let replacement = if raw_replacement == "_" {
            String::new()
        } else {
            raw_replacement
        };

        let mut regex_src = String::new();
        let mut anchored_start = false;
        let mut anchored_end = false;
        let mut pat = raw_pattern.as_str();
        if let Some(rest) = pat.strip_prefix('^') {
            anchored_start = true;
            pat = rest;
        }
        if let Some(rest) = pat.strip_suffix('$') {
            anchored_end = true;
            pat = rest;
        }
        if anchored_start {
            regex_src.push('^');
        }
        regex_src.push_str(&regex::escape(pat).replace('_', " "));
        if anchored_end {
            regex_src.push('$');
        }
        let regex = Regex::new(&regex_src).map_err(|e| format!("bad PHONE pattern '{item}': {e}"))?;

        Ok(Self { pattern: raw_pattern, replacement, regex })
    }
}

/// `CHECKCOMPOUNDPATTERN` entry: forbids a specific left-tail/right-head
/// boundary. The third field is accepted and stored but never consulted
/// (spec.md §9 Open Question #3: undocumented and unused in every known
/// dictionary).
#[derive(Debug, Clone)]
pub struct CompoundPattern {
    pub left_tail: String,
    pub right_head: String,
    pub unused_flag: Option<String>,
}

impl TryFrom<&str> for CompoundPattern {
    type Error = String;

    fn try_from(item: &str) -> Result<Self, Self::Error> {
        let mut parts = item.split_whitespace();
        let left_tail = parts
            .next()
            .ok_or_else(|| format!("empty CHECKCOMPOUNDPATTERN entry '{item}'"))?
            .to_owned();
        let right_head = parts
            .next()
            .ok_or_else(|| format!("CHECKCOMPOUNDPATTERN entry missing right side: '{item}'"))?
            .to_owned();
        let unused_flag = parts.next().map(ToOwned::to_owned);
        Ok(Self { left_tail, right_head, unused_flag })
    }
}

/// `COMPOUNDSYLLABLE` directive: max syllable count plus a vowel character
/// class. Hungarian-specific; parsed and stored, never consulted by the
/// engines (spec.md §9 Open Question #2).
#[derive(Debug, Clone)]
pub struct CompoundSyllable {
    pub max: u32,
    pub vowels: String,
}

impl TryFrom<&str> for CompoundSyllable {
    type Error = ParseErrorType;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut parts = s.split_whitespace();
        let max = parts
            .next()
            .ok_or_else(|| ParseErrorType::CompoundSyllable(s.to_owned()))?
            .parse::<u32>()
            .map_err(|_| ParseErrorType::CompoundSyllable(s.to_owned()))?;
        let vowels = parts.next().unwrap_or("").to_owned();
        Ok(Self { max, vowels })
    }
}

/// A morphological data field, e.g. `st:running` or `ph:nite->night`. Stored
/// on [`crate::dict::Word`] entries and affix rules that carry an `AM` alias
/// or inline morph field, and surfaced through
/// [`crate::DictionaryEntry::analyze`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum MorphInfo {
    Stem(String),
    Allomorph(String),
    Phonetic(String),
    Part(String),
    PartOfSpeech(String),
    DerivSfx(String),
    InflSfx(String),
    TermSfx(String),
    DerivPfx(String),
    InflPfx(String),
    TermPfx(String),
    Other { tag: String, value: String },
}

impl MorphInfo {
    pub fn tag(&self) -> &str {
        match self {
            Self::Stem(_) => "st",
            Self::Allomorph(_) => "al",
            Self::Phonetic(_) => "ph",
            Self::Part(_) => "pa",
            Self::PartOfSpeech(_) => "po",
            Self::DerivSfx(_) => "ds",
            Self::InflSfx(_) => "is",
            Self::TermSfx(_) => "ts",
            Self::DerivPfx(_) => "dp",
            Self::InflPfx(_) => "ip",
            Self::TermPfx(_) => "tp",
            Self::Other { tag, .. } => tag,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Stem(v)
            | Self::Allomorph(v)
            | Self::Phonetic(v)
            | Self::Part(v)
            | Self::PartOfSpeech(v)
            | Self::DerivSfx(v)
            | Self::InflSfx(v)
            | Self::TermSfx(v)
            | Self::DerivPfx(v)
            | Self::InflPfx(v)
            | Self::TermPfx(v) => v,
            Self::Other { value, .. } => value,
        }
    }
}

impl TryFrom<&str> for MorphInfo {
    type Error = ParseErrorType;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let (tag, value) = s
            .split_once(':')
            .ok_or_else(|| ParseErrorType::MorphInfo(s.to_owned()))?;
        Ok(match tag {
            "st" => Self::Stem(value.to_owned()),
            "al" => Self::Allomorph(value.to_owned()),
            "ph" => Self::Phonetic(value.to_owned()),
            "pa" => Self::Part(value.to_owned()),
            "po" => Self::PartOfSpeech(value.to_owned()),
            "ds" => Self::DerivSfx(value.to_owned()),
            "is" => Self::InflSfx(value.to_owned()),
            "ts" => Self::TermSfx(value.to_owned()),
            "dp" => Self::DerivPfx(value.to_owned()),
            "ip" => Self::InflPfx(value.to_owned()),
            "tp" => Self::TermPfx(value.to_owned()),
            other => Self::Other { tag: other.to_owned(), value: value.to_owned() },
        })
    }
}

impl FromStr for MorphInfo {
    type Err = ParseErrorType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Whether a `RuleGroup` is a `PFX` or `SFX` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

impl TryFrom<&str> for AffixKind {
    type Error = ParseErrorType;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "PFX" => Ok(Self::Prefix),
            "SFX" => Ok(Self::Suffix),
            other => Err(ParseErrorType::AffixBody(other.to_owned())),
        }
    }
}

/// One row of a `PFX`/`SFX` table, as written on disk (condition still a raw
/// string; compiled to [`super::condition::Condition`] when the `RuleGroup`
/// is folded into the final [`super::Affix`] records).
#[derive(Debug, Clone)]
pub struct AffixRule {
    pub stripping_chars: Option<String>,
    pub affix: String,
    pub condition: Option<String>,
    pub morph_info: Option<Vec<MorphInfo>>,
}

/// A complete `PFX`/`SFX` directive block: the flag it is filed under,
/// whether it cross-products with the opposite affix kind, and its rules.
#[derive(Debug, Clone)]
pub struct RuleGroup {
    pub flag: String,
    pub kind: AffixKind,
    pub can_combine: bool,
    pub rules: Vec<AffixRule>,
}

//! Casing classification and case-shape manipulation.
//!
//! Ported from `spylls.hunspell.algo.capitalization`: three dispatchable
//! variants (default, Turkic, German) rather than subclasses, selected by
//! `CHECKSHARPS` or `LANG ∈ {tr, tr_TR, az, crh}` at load time.

/// Capitalization class of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Captype {
    /// No uppercase letters.
    No,
    /// First letter uppercase, rest lowercase.
    Init,
    /// Every letter uppercase.
    All,
    /// Mixed case not matching `Init`/`All`, first letter lowercase.
    Huh,
    /// Mixed case not matching `Init`/`All`, first letter uppercase.
    HuhInit,
}

/// Which language-specific casing rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CasingVariant {
    #[default]
    Default,
    Turkic,
    German,
}

impl CasingVariant {
    /// Select a variant from `LANG` and `CHECKSHARPS`.
    pub fn select(lang: Option<&str>, check_sharps: bool) -> Self {
        if check_sharps {
            return Self::German;
        }
        match lang {
            Some("tr" | "tr_TR" | "az" | "crh") => Self::Turkic,
            _ => Self::Default,
        }
    }

    fn upper_char(self, c: char) -> char {
        match (self, c) {
            (Self::Turkic, 'i') => 'İ',
            (Self::Turkic, 'ı') => 'I',
            _ => c.to_uppercase().next().unwrap_or(c),
        }
    }

    fn lower_char(self, c: char) -> char {
        match (self, c) {
            (Self::Turkic, 'İ') => 'i',
            (Self::Turkic, 'I') => 'ı',
            _ => c.to_lowercase().next().unwrap_or(c),
        }
    }

    /// Classify `word`'s capitalization shape.
    pub fn classify(self, word: &str) -> Captype {
        let mut chars = word.chars();
        let Some(first) = chars.next() else {
            return Captype::No;
        };

        if self == Self::German && word.contains('ß') && word.chars().all(|c| !c.is_lowercase()) {
            return Captype::All;
        }

        let first_upper = first != self.lower_char(first);
        let rest: Vec<char> = chars.collect();
        let rest_has_upper = rest.iter().any(|&c| c != self.lower_char(c));
        let rest_has_lower = rest.iter().any(|&c| c != self.upper_char(c));

        if !first_upper && !rest_has_upper {
            return Captype::No;
        }
        if first_upper && !rest_has_lower && !rest.is_empty() {
            return Captype::All;
        }
        if first_upper && rest.is_empty() {
            return Captype::All;
        }
        if first_upper && !rest_has_upper {
            return Captype::Init;
        }
        if first_upper {
            return Captype::HuhInit;
        }
        Captype::Huh
    }

    /// Uppercase the whole word.
    pub fn upper(self, word: &str) -> String {
        word.chars().map(|c| self.upper_char(c)).collect()
    }

    /// Lowercase the whole word. German additionally enumerates every
    /// position where an uppercase `SS` sequence could instead be `ß`, since
    /// the reverse mapping is ambiguous.
    pub fn lower(self, word: &str) -> Vec<String> {
        let plain: String = word.chars().map(|c| self.lower_char(c)).collect();
        if self != Self::German || !plain.contains("ss") {
            return vec![plain];
        }

        let mut out = vec![plain.clone()];
        let bytes: Vec<char> = plain.chars().collect();
        let mut positions = Vec::new();
        let mut i = 0;
        while i + 1 < bytes.len() {
            if bytes[i] == 's' && bytes[i + 1] == 's' {
                positions.push(i);
            }
            i += 1;
        }
        for &pos in &positions {
            let mut variant: Vec<char> = bytes.clone();
            variant.splice(pos..pos + 2, ['ß']);
            out.push(variant.into_iter().collect());
        }
        out
    }

    /// Titlecase: uppercase the first letter, lowercase the rest. Returns a
    /// list because [`Self::lower`] may itself enumerate German `ß` variants.
    pub fn capitalize(self, word: &str) -> Vec<String> {
        let Some(first) = word.chars().next() else {
            return vec![String::new()];
        };
        let rest: String = word.chars().skip(1).collect();
        self.lower(&rest)
            .into_iter()
            .map(|lowered| format!("{}{lowered}", self.upper_char(first)))
            .collect()
    }

    /// Stem spellings worth trying during `lookup`.
    pub fn variants(self, word: &str) -> (Captype, Vec<String>) {
        let captype = self.classify(word);
        let mut out = vec![word.to_owned()];
        match captype {
            Captype::No | Captype::Huh | Captype::HuhInit => {}
            Captype::Init => out.extend(self.lower(word)),
            Captype::All => {
                out.extend(self.lower(word));
                out.extend(self.capitalize(word));
            }
        }
        out.dedup();
        (captype, out)
    }

    /// Larger variant set used by `suggest`: mixed-case words also try their
    /// lowercase and titlecase forms.
    pub fn corrections(self, word: &str) -> (Captype, Vec<String>) {
        let (captype, mut out) = self.variants(word);
        if matches!(captype, Captype::Huh | Captype::HuhInit) {
            out.extend(self.lower(word));
            out.extend(self.capitalize(word));
        }
        out.dedup();
        (captype, out)
    }

    /// Re-apply `captype`'s shape to `word` (a found suggestion).
    pub fn coerce(self, word: &str, captype: Captype) -> String {
        match captype {
            Captype::No | Captype::Huh => word.to_owned(),
            Captype::Init | Captype::HuhInit => {
                self.capitalize(word).into_iter().next().unwrap_or_default()
            }
            Captype::All => self.upper(word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_basic_shapes() {
        let v = CasingVariant::Default;
        assert_eq!(v.classify("hello"), Captype::No);
        assert_eq!(v.classify("Hello"), Captype::Init);
        assert_eq!(v.classify("HELLO"), Captype::All);
        assert_eq!(v.classify("hELLO"), Captype::Huh);
        assert_eq!(v.classify("HeLLO"), Captype::HuhInit);
    }

    #[test]
    fn german_lower_enumerates_sharp_s() {
        let v = CasingVariant::German;
        let lowered = v.lower("STRASSE");
        assert!(lowered.contains(&"strasse".to_owned()));
        assert!(lowered.contains(&"straße".to_owned()));
    }

    #[test]
    fn german_all_uppercase_classifies_with_sharp_s() {
        let v = CasingVariant::German;
        assert_eq!(v.classify("STRASSE"), Captype::All);
        assert_eq!(v.classify("STRAßE"), Captype::All);
    }

    #[test]
    fn turkic_upper_maps_dotted_i() {
        let v = CasingVariant::Turkic;
        assert_eq!(v.upper("i"), "İ");
    }

    #[test]
    fn coerce_reapplies_captype() {
        let v = CasingVariant::Default;
        assert_eq!(v.coerce("spells", Captype::Init), "Spells");
        assert_eq!(v.coerce("spells", Captype::All), "SPELLS");
    }
}

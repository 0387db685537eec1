//! Fuzzy phrase matching for OCR'd chat lines
//!
//! The screen reader feeds us text that is close to, but rarely identical to,
//! the scripted lines the game prints: accents get flattened, `b` reads as
//! `6`, punctuation disappears. A [`FuzzyMatcher`] compiles a set of
//! reference phrases (one per supported game locale) into a single
//! case-insensitive predicate that absorbs those substitutions.
//!
//! Compilation is pure: the same phrase set always produces a matcher with
//! identical behavior.

use regex::Regex;
use thiserror::Error;

/// Errors raised while compiling a reference phrase set.
///
/// These surface at configuration load time, never during matching. An empty
/// phrase set is rejected here rather than silently compiling into an empty
/// alternation that would match everything.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("reference phrase set is empty")]
    EmptyPhraseSet,

    #[error("fuzzy pattern failed to compile")]
    Compile(#[from] regex::Error),
}

// ═══════════════════════════════════════════════════════════════════════════
// Character Confusion Tables
// ═══════════════════════════════════════════════════════════════════════════

// Accented vowels and look-alikes the reader collapses. Punctuation characters
// never reach these tables (they are widened to a gap pattern first), so the
// `!`, `.` and `|` members of the i class appear only on the output side.
static ACCENT_CLASSES: phf::Map<char, &'static str> = phf::phf_map! {
    'a' => "[aàáâäãAÀÁÂÄ4@]", 'à' => "[aàáâäãAÀÁÂÄ4@]", 'á' => "[aàáâäãAÀÁÂÄ4@]",
    'â' => "[aàáâäãAÀÁÂÄ4@]", 'ä' => "[aàáâäãAÀÁÂÄ4@]", 'ã' => "[aàáâäãAÀÁÂÄ4@]",
    'A' => "[aàáâäãAÀÁÂÄ4@]", 'À' => "[aàáâäãAÀÁÂÄ4@]", 'Á' => "[aàáâäãAÀÁÂÄ4@]",
    'Â' => "[aàáâäãAÀÁÂÄ4@]", 'Ä' => "[aàáâäãAÀÁÂÄ4@]", '4' => "[aàáâäãAÀÁÂÄ4@]",
    '@' => "[aàáâäãAÀÁÂÄ4@]",

    'e' => "[eéèêëEÉÈÊË3]", 'é' => "[eéèêëEÉÈÊË3]", 'è' => "[eéèêëEÉÈÊË3]",
    'ê' => "[eéèêëEÉÈÊË3]", 'ë' => "[eéèêëEÉÈÊË3]", 'E' => "[eéèêëEÉÈÊË3]",
    'É' => "[eéèêëEÉÈÊË3]", 'È' => "[eéèêëEÉÈÊË3]", 'Ê' => "[eéèêëEÉÈÊË3]",
    'Ë' => "[eéèêëEÉÈÊË3]", '3' => "[eéèêëEÉÈÊË3]",

    'i' => "[iîïíIÎÏÍl1|!.]", 'î' => "[iîïíIÎÏÍl1|!.]", 'ï' => "[iîïíIÎÏÍl1|!.]",
    'í' => "[iîïíIÎÏÍl1|!.]", 'I' => "[iîïíIÎÏÍl1|!.]", 'Î' => "[iîïíIÎÏÍl1|!.]",
    'Ï' => "[iîïíIÎÏÍl1|!.]", 'Í' => "[iîïíIÎÏÍl1|!.]", 'l' => "[iîïíIÎÏÍl1|!.]",
    '1' => "[iîïíIÎÏÍl1|!.]", '|' => "[iîïíIÎÏÍl1|!.]",

    'o' => "[oôöóOÔÖÓ0QD]", 'ô' => "[oôöóOÔÖÓ0QD]", 'ö' => "[oôöóOÔÖÓ0QD]",
    'ó' => "[oôöóOÔÖÓ0QD]", 'O' => "[oôöóOÔÖÓ0QD]", 'Ô' => "[oôöóOÔÖÓ0QD]",
    'Ö' => "[oôöóOÔÖÓ0QD]", 'Ó' => "[oôöóOÔÖÓ0QD]", '0' => "[oôöóOÔÖÓ0QD]",
    'Q' => "[oôöóOÔÖÓ0QD]", 'D' => "[oôöóOÔÖÓ0QD]",

    'u' => "[uùûüúUÙÛÜÚ]", 'ù' => "[uùûüúUÙÛÜÚ]", 'û' => "[uùûüúUÙÛÜÚ]",
    'ü' => "[uùûüúUÙÛÜÚ]", 'ú' => "[uùûüúUÙÛÜÚ]", 'U' => "[uùûüúUÙÛÜÚ]",
    'Ù' => "[uùûüúUÙÛÜÚ]", 'Û' => "[uùûüúUÙÛÜÚ]", 'Ü' => "[uùûüúUÙÛÜÚ]",
    'Ú' => "[uùûüúUÙÛÜÚ]",

    'c' => "[cçCÇ]", 'ç' => "[cçCÇ]", 'C' => "[cçCÇ]", 'Ç' => "[cçCÇ]",
};

// Shape and consonant confusions. Characters already claimed by the accent
// table (or by an earlier shape group) resolve there first; the reader's
// two-character misreads (`rn`, `nn` for `m`) degrade to their constituent
// characters, so the m class is `[mnr]`.
static SHAPE_CLASSES: phf::Map<char, &'static str> = phf::phf_map! {
    'z' => "[z2Z]", '2' => "[z2Z]", 'Z' => "[z2Z]",

    '7' => "[17]",

    's' => "[s5S$]", '5' => "[s5S$]", 'S' => "[s5S$]", '$' => "[s5S$]",

    'b' => "[b68]", '6' => "[b68]", '8' => "[b68]",

    'ß' => "[ßB8]", 'B' => "[ßB8]",

    'g' => "[gq9y]", 'q' => "[gq9y]", '9' => "[gq9y]", 'y' => "[gq9y]",

    'f' => "[ftFT]", 't' => "[ftFT]", 'F' => "[ftFT]", 'T' => "[ftFT]",

    'm' => "[mnr]", 'n' => "[mnr]",

    'r' => "[rn]",

    'v' => "[vuyVUY]", 'V' => "[vuyVUY]", 'Y' => "[vuyVUY]",

    'J' => "[JlI1]",
};

// ═══════════════════════════════════════════════════════════════════════════
// Matcher
// ═══════════════════════════════════════════════════════════════════════════

/// A compiled predicate over one reference phrase set.
///
/// Matches an input if it resembles any of the phrase variants, where
/// "resembles" substitutes characters per the confusion tables above and
/// collapses whitespace and punctuation into permissive gap patterns.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    pattern: Regex,
}

impl FuzzyMatcher {
    /// Compile a phrase set into a matcher.
    ///
    /// Blank variants are ignored; a set with no usable variant is a
    /// configuration error.
    pub fn compile<S: AsRef<str>>(phrases: &[S]) -> Result<Self, PatternError> {
        let variants: Vec<&str> = phrases
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| !p.trim().is_empty())
            .collect();

        if variants.is_empty() {
            return Err(PatternError::EmptyPhraseSet);
        }

        let alternation = variants
            .iter()
            .map(|p| fuzz_phrase(p))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = Regex::new(&format!("(?i)({alternation})"))?;
        Ok(Self { pattern })
    }

    /// Test whether `text` resembles any phrase in the set.
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Widen a single phrase into its OCR-tolerant pattern.
fn fuzz_phrase(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len() * 4);

    for ch in phrase.chars() {
        match ch {
            // Punctuation the reader frequently drops or mangles: accept any
            // run of non-word characters (including none at all).
            ':' | '.' | ',' | '!' | '?' | '\'' | '-' => out.push_str(r"[\W\s]*"),
            c if c.is_whitespace() => out.push_str(r"\s*"),
            c => {
                if let Some(class) = ACCENT_CLASSES.get(&c) {
                    out.push_str(class);
                } else if let Some(class) = SHAPE_CLASSES.get(&c) {
                    out.push_str(class);
                } else {
                    let mut buf = [0u8; 4];
                    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_PHRASES: [&str; 4] = [
        "Merethiel! The betrayer! You'd lead these mortals against me?",
        "Merethiel, die Verräterin! Du sendest diese Sterblichen gegen mich in den Kampf?",
        "Merethiel ! Traîtresse ! Tu dirigerais donc ces mortels contre moi ?",
        "Merethiel! A traidora! Como ousa auxiliar esses mortais em uma luta contra mim?",
    ];

    #[test]
    fn exact_phrases_match_in_every_locale() {
        let matcher = FuzzyMatcher::compile(&START_PHRASES).unwrap();
        for phrase in START_PHRASES {
            assert!(matcher.matches(phrase), "exact phrase failed: {phrase}");
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        let matcher = FuzzyMatcher::compile(&["I will replenish the earth with your bones."]).unwrap();
        assert!(matcher.matches("i WILL REPLENISH the earth with your bones."));
    }

    #[test]
    fn single_confusable_substitutions_still_match() {
        let matcher = FuzzyMatcher::compile(&["I will replenish the earth with your bones."]).unwrap();
        // b -> 6, s -> 5, e -> 3, o -> 0
        assert!(matcher.matches("I will replenish the earth with your 6ones."));
        assert!(matcher.matches("I will repleni5h the earth with your bones."));
        assert!(matcher.matches("I will repl3nish the earth with your bones."));
        assert!(matcher.matches("I will replenish the earth with y0ur bones."));
    }

    #[test]
    fn m_degrades_to_its_confusion_class() {
        let matcher = FuzzyMatcher::compile(&["mortals"]).unwrap();
        assert!(matcher.matches("nortals"));
        assert!(matcher.matches("rortals"));
    }

    #[test]
    fn punctuation_gaps_are_absorbed() {
        let matcher = FuzzyMatcher::compile(&START_PHRASES).unwrap();
        // Dropped exclamation marks and apostrophe, extra spacing.
        assert!(matcher.matches("Merethiel  The betrayer  Youd lead these mortals against me?"));
    }

    #[test]
    fn embedded_in_surrounding_noise() {
        let matcher = FuzzyMatcher::compile(&["How futile. You are weak, disgusting creatures!"]).unwrap();
        assert!(matcher.matches("[12:03] Erethdor: How futile. You are weak, disgusting creatures! xx"));
    }

    #[test]
    fn unrelated_phrase_of_similar_length_does_not_match() {
        let matcher = FuzzyMatcher::compile(&["I will replenish the earth with your bones."]).unwrap();
        assert!(!matcher.matches("You will not free him, THIS POWER IS MINE."));
        assert!(!matcher.matches("Merethiel: Erethdor is getting weaker and losing control."));
    }

    #[test]
    fn empty_phrase_set_is_rejected() {
        let phrases: [&str; 0] = [];
        assert!(matches!(
            FuzzyMatcher::compile(&phrases),
            Err(PatternError::EmptyPhraseSet)
        ));
        assert!(matches!(
            FuzzyMatcher::compile(&["", "   "]),
            Err(PatternError::EmptyPhraseSet)
        ));
    }

    #[test]
    fn literal_characters_outside_the_tables_are_strict() {
        let matcher = FuzzyMatcher::compile(&["power"]).unwrap();
        assert!(matcher.matches("power"));
        assert!(!matcher.matches("poxer"));
    }

    #[test]
    fn compilation_is_deterministic() {
        let a = FuzzyMatcher::compile(&START_PHRASES).unwrap();
        let b = FuzzyMatcher::compile(&START_PHRASES).unwrap();
        assert_eq!(a.pattern.as_str(), b.pattern.as_str());
    }
}

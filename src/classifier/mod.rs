//! Named classifiers and the dispatch table that selects them
//!
//! A [`ClassifierTable`] maps a classifier name to a [`Predicate`]. Tables are
//! built per group: most predicates are plain functions, but a few look at the
//! sibling words of the group and therefore capture that group's contents.

pub mod predicates;

use crate::error::{MapSatError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A classifier applied to one element
pub type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Builds the dispatch table for one group's context
pub type TableBuilder = Arc<dyn Fn(Arc<[String]>) -> ClassifierTable + Send + Sync>;

/// Built-in classifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classifier {
    VowelsConsonants,
    Palindrome,
    Gibberish,
    VowelStartEnd,
    AnagramWithFacultate,
    UpperStartEnd,
    ContainsDiacritics,
    HasSubstitutionPair,
    HasRhymePair,
    AlternantVowelConsonant,
    StrongPasswords,
    UnixPaths,
    RomanianNames,
    FibonacciNumbers,
    ThreeSetBits,
}

impl Classifier {
    pub const ALL: [Classifier; 15] = [
        Classifier::VowelsConsonants,
        Classifier::Palindrome,
        Classifier::Gibberish,
        Classifier::VowelStartEnd,
        Classifier::AnagramWithFacultate,
        Classifier::UpperStartEnd,
        Classifier::ContainsDiacritics,
        Classifier::HasSubstitutionPair,
        Classifier::HasRhymePair,
        Classifier::AlternantVowelConsonant,
        Classifier::StrongPasswords,
        Classifier::UnixPaths,
        Classifier::RomanianNames,
        Classifier::FibonacciNumbers,
        Classifier::ThreeSetBits,
    ];

    /// Dispatch key of the classifier
    pub fn name(self) -> &'static str {
        match self {
            Self::VowelsConsonants => "vowels_consonants",
            Self::Palindrome => "palindrome",
            Self::Gibberish => "gibberish",
            Self::VowelStartEnd => "vowel_start_end",
            Self::AnagramWithFacultate => "anagram_with_facultate",
            Self::UpperStartEnd => "upper_start_end",
            Self::ContainsDiacritics => "contains_diacritics",
            Self::HasSubstitutionPair => "has_substitution_pair",
            Self::HasRhymePair => "has_rhyme_pair",
            Self::AlternantVowelConsonant => "alternant_vowel_consonant",
            Self::StrongPasswords => "strong_passwords",
            Self::UnixPaths => "unix_paths",
            Self::RomanianNames => "romanian_names",
            Self::FibonacciNumbers => "fibonacci_numbers",
            Self::ThreeSetBits => "three_set_bits",
        }
    }

    /// Whether the verdict for a word depends on the other words of its group
    pub fn needs_group_context(self) -> bool {
        matches!(self, Self::HasSubstitutionPair | Self::HasRhymePair)
    }

    /// Predicate for this classifier, bound to `group` where needed
    pub fn predicate(self, group: &Arc<[String]>) -> Predicate {
        use predicates::*;

        match self {
            Self::VowelsConsonants => Arc::new(vowels_consonants),
            Self::Palindrome => Arc::new(is_palindrome),
            Self::Gibberish => Arc::new(is_gibberish),
            Self::VowelStartEnd => Arc::new(vowel_start_end),
            Self::AnagramWithFacultate => Arc::new(anagram_with_facultate),
            Self::UpperStartEnd => Arc::new(upper_start_end),
            Self::ContainsDiacritics => Arc::new(contains_diacritics),
            Self::HasSubstitutionPair => {
                let words = Arc::clone(group);
                Arc::new(move |word: &str| has_substitution_pair(word, &words))
            }
            Self::HasRhymePair => {
                let words = Arc::clone(group);
                Arc::new(move |word: &str| has_rhyme_pair(word, &words))
            }
            Self::AlternantVowelConsonant => Arc::new(alternant_vowel_consonant),
            Self::StrongPasswords => Arc::new(is_strong_password),
            Self::UnixPaths => Arc::new(is_unix_path),
            Self::RomanianNames => Arc::new(is_romanian_name),
            Self::FibonacciNumbers => Arc::new(is_fibonacci_number),
            Self::ThreeSetBits => Arc::new(has_three_set_bits),
        }
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Classifier {
    type Err = MapSatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| MapSatError::UnknownClassifier {
                name: s.to_string(),
                available: Self::ALL.iter().map(|c| c.name().to_string()).collect(),
            })
    }
}

/// Name-to-predicate dispatch table
#[derive(Clone, Default)]
pub struct ClassifierTable {
    entries: BTreeMap<String, Predicate>,
}

impl fmt::Debug for ClassifierTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierTable")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ClassifierTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table of every built-in classifier, bound to `group`
    pub fn for_group(group: Arc<[String]>) -> Self {
        let entries = Classifier::ALL
            .into_iter()
            .map(|c| (c.name().to_string(), c.predicate(&group)))
            .collect();
        Self { entries }
    }

    /// Builder producing [`ClassifierTable::for_group`] tables
    pub fn builtin() -> TableBuilder {
        Arc::new(Self::for_group)
    }

    /// Add a classifier under a new name. Names are unique.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F) -> Result<()>
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(MapSatError::Config(format!(
                "classifier '{name}' is already registered"
            )));
        }
        self.entries.insert(name, Arc::new(predicate));
        Ok(())
    }

    /// Predicate registered under `name`
    pub fn lookup(&self, name: &str) -> Result<Predicate> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| MapSatError::UnknownClassifier {
                name: name.to_string(),
                available: self.names().map(str::to_string).collect(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(words: &[&str]) -> Arc<[String]> {
        words.iter().map(|w| w.to_string()).collect::<Vec<_>>().into()
    }

    #[test]
    fn test_builtin_table_has_every_classifier() {
        let table = ClassifierTable::for_group(group(&[]));
        assert_eq!(table.len(), 15);
        for classifier in Classifier::ALL {
            assert!(table.contains(classifier.name()));
        }
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let table = ClassifierTable::for_group(group(&[]));
        let err = table.lookup("is_prime").err().unwrap();
        match err {
            MapSatError::UnknownClassifier { name, available } => {
                assert_eq!(name, "is_prime");
                assert_eq!(available.len(), 15);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_context_predicates_see_their_own_group() {
        let first = ClassifierTable::for_group(group(&["stele", "mele"]));
        let second = ClassifierTable::for_group(group(&["stele", "borcan"]));

        let rhyme_first = first.lookup("has_rhyme_pair").unwrap();
        let rhyme_second = second.lookup("has_rhyme_pair").unwrap();
        assert!(rhyme_first("stele"));
        assert!(!rhyme_second("stele"));
    }

    #[test]
    fn test_register_custom_classifier() {
        let mut table = ClassifierTable::new();
        assert!(table.is_empty());
        table.register("long_words", |w| w.chars().count() > 6).unwrap();
        assert!(table.lookup("long_words").unwrap()("crocodil"));
        assert!(table.register("long_words", |_| true).is_err());
    }

    #[test]
    fn test_classifier_names_round_trip_through_from_str() {
        for classifier in Classifier::ALL {
            assert_eq!(classifier.name().parse::<Classifier>().unwrap(), classifier);
            assert_eq!(classifier.to_string(), classifier.name());
        }
        assert!("Palindrome".parse::<Classifier>().is_err());
    }

    #[test]
    fn test_group_context_flags() {
        let contextual: Vec<_> = Classifier::ALL
            .into_iter()
            .filter(|c| c.needs_group_context())
            .collect();
        assert_eq!(
            contextual,
            vec![Classifier::HasSubstitutionPair, Classifier::HasRhymePair]
        );
    }
}

//! String classifiers
//!
//! Every classifier is total: malformed input (an empty string, a number
//! that does not parse) is classified as non-matching instead of failing.

use crate::pipeline::filter::{any_sat, count_sat};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

const VOWELS: &str = "aăâeiîouAĂÂEIÎOU";
const FACULTATE: &str = "facultate";
const ROMANIAN_NAME_SUFFIX: &str = "escu";

static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").expect("Valid regex pattern"));
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("Valid regex pattern"));
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("Valid regex pattern"));
// Anything outside ASCII letters and digits, underscore included
static SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9A-Za-z]").expect("Valid regex pattern"));

pub fn is_vowel(ch: char) -> bool {
    VOWELS.contains(ch)
}

pub fn is_consonant(ch: char) -> bool {
    !is_vowel(ch)
}

fn is_diacritic(ch: char) -> bool {
    !ch.is_ascii()
}

/// Mirror each code point around the latin alphabet (`a <-> z`, `b <-> y`, ...).
///
/// Code points that do not map to a valid `char` become U+FFFD.
pub fn atbash(word: &str) -> String {
    word.chars()
        .map(|ch| {
            let code = 'z' as i64 - ch as i64 + 'a' as i64;
            u32::try_from(code)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER)
        })
        .collect()
}

/// Two words rhyme when their trailing bytes agree on at least two positions
pub fn rhymes(word: &str, candidate: &str) -> bool {
    let common = word
        .bytes()
        .rev()
        .zip(candidate.bytes().rev())
        .take_while(|(a, b)| a == b)
        .count();
    common > 1
}

fn is_perfect_square(n: i64) -> bool {
    let root = (n as f64).sqrt();
    root == root.floor()
}

/// Even number of vowels and a consonant count divisible by three
pub fn vowels_consonants(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    count_sat(&chars, |c| is_vowel(*c)) % 2 == 0 && count_sat(&chars, |c| is_consonant(*c)) % 3 == 0
}

/// Byte-wise two-pointer palindrome check; the empty string is a palindrome
pub fn is_palindrome(word: &str) -> bool {
    let bytes = word.as_bytes();
    if bytes.is_empty() {
        return true;
    }
    let (mut left, mut right) = (0, bytes.len() - 1);
    while left < right {
        if bytes[left] != bytes[right] {
            return false;
        }
        left += 1;
        right -= 1;
    }
    true
}

/// Every vowel that is not the final byte is followed by a `p`
pub fn is_gibberish(word: &str) -> bool {
    let bytes = word.as_bytes();
    word.char_indices()
        .all(|(i, ch)| !is_vowel(ch) || i + 1 >= bytes.len() || bytes[i + 1] == b'p')
}

pub fn vowel_start_end(word: &str) -> bool {
    match (word.chars().next(), word.chars().last()) {
        (Some(first), Some(last)) => is_vowel(first) && is_vowel(last),
        _ => false,
    }
}

/// Word holds every letter of "facultate", with multiplicity
pub fn anagram_with_facultate(word: &str) -> bool {
    let mut available: HashMap<char, usize> = HashMap::new();
    for ch in word.chars() {
        *available.entry(ch).or_default() += 1;
    }
    FACULTATE.chars().all(|ch| match available.get_mut(&ch) {
        Some(count) if *count > 0 => {
            *count -= 1;
            true
        }
        _ => false,
    })
}

pub fn upper_start_end(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    match (chars.first(), chars.last()) {
        (Some(first), Some(last)) => {
            first.is_ascii_uppercase()
                && last.is_ascii_uppercase()
                && count_sat(&chars, |c| c.is_ascii_lowercase()) % 2 == 0
        }
        _ => false,
    }
}

/// More than one non-ASCII character
pub fn contains_diacritics(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    count_sat(&chars, |c| is_diacritic(*c)) > 1
}

/// Some word in the group enciphers to `word` under [`atbash`]
pub fn has_substitution_pair(word: &str, words: &[String]) -> bool {
    any_sat(words, |w| atbash(w) == word)
}

/// Some other word in the group rhymes with `word`
pub fn has_rhyme_pair(word: &str, words: &[String]) -> bool {
    any_sat(words, |w| w != word && rhymes(word, w))
}

/// Starts with a consonant and alternates consonant/vowel throughout
pub fn alternant_vowel_consonant(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    match chars.first() {
        None => false,
        Some(first) if is_vowel(*first) => false,
        Some(_) => chars.windows(2).all(|pair| is_vowel(pair[0]) != is_vowel(pair[1])),
    }
}

pub fn is_strong_password(word: &str) -> bool {
    LOWERCASE.is_match(word)
        && UPPERCASE.is_match(word)
        && DIGIT.is_match(word)
        && SYMBOL.is_match(word)
}

pub fn is_unix_path(word: &str) -> bool {
    word.starts_with('/') || word.starts_with("./") || word.starts_with("../")
}

pub fn is_romanian_name(word: &str) -> bool {
    word.ends_with(ROMANIAN_NAME_SUFFIX)
}

/// `n` is Fibonacci iff `5n² + 4` or `5n² - 4` is a perfect square
pub fn is_fibonacci_number(num: &str) -> bool {
    let Ok(n) = num.parse::<i64>() else {
        return false;
    };
    let base = n.wrapping_mul(n).wrapping_mul(5);
    is_perfect_square(base.wrapping_add(4)) || is_perfect_square(base.wrapping_sub(4))
}

pub fn has_three_set_bits(num: &str) -> bool {
    match num.parse::<i64>() {
        Ok(n) if n > 0 => n.count_ones() == 3,
        _ => false,
    }
}

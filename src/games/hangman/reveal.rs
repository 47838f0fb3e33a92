//! Letters handed to the player before the first guess, by difficulty.
use super::language::{lowercase, Difficulty};
use crate::random::RandomSource;

const VOWELS: [char; 11] = ['a', 'e', 'i', 'o', 'u', 'á', 'é', 'í', 'ó', 'ú', 'ü'];
/// Vowels present in every alphabet, so the player can still type them.
const PLAIN_VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Letters that count for the medium reveal: Spanish alphabet plus accented vowels.
fn is_word_letter(c: char) -> bool {
    c.is_ascii_lowercase() || matches!(c, 'ñ' | 'á' | 'é' | 'í' | 'ó' | 'ú' | 'ü')
}

/// Distinct lowercase characters of `word`, in order of first appearance.
pub fn distinct_letters(word: &str) -> Vec<char> {
    let mut letters = Vec::new();
    for c in word.chars().map(lowercase) {
        if !letters.contains(&c) {
            letters.push(c);
        }
    }
    letters
}

/// Lowercase letters of `word` to pre-reveal.
///
/// - hard: none.
/// - easy: every vowel (plain or accented) in the word, except that the last
///   plain vowel is held back when the vowels alone would spell the whole word.
///   Accented vowels cannot be guessed, so they are never held back.
/// - medium: `min(2, candidates / 3)` letters drawn at random from the word's
///   distinct letters.
pub fn initial_letters(word: &str, difficulty: Difficulty, rng: &mut dyn RandomSource) -> Vec<char> {
    let letters = distinct_letters(word);
    match difficulty {
        Difficulty::Hard => Vec::new(),
        Difficulty::Easy => {
            let total = letters.len();
            let mut vowels: Vec<char> = letters.into_iter().filter(|c| VOWELS.contains(c)).collect();
            if vowels.len() == total {
                if let Some(pos) = vowels.iter().rposition(|c| PLAIN_VOWELS.contains(c)) {
                    vowels.remove(pos);
                }
            }
            vowels
        }
        Difficulty::Medium => {
            let mut candidates: Vec<char> = letters.into_iter().filter(|&c| is_word_letter(c)).collect();
            let count = (candidates.len() / 3).min(2);
            if count == 0 {
                return Vec::new();
            }
            rng.shuffle(&mut candidates);
            candidates.truncate(count);
            candidates
        }
    }
}

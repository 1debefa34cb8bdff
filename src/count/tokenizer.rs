//! Letter-run tokenizer
//!
//! Splits a line into maximal runs of letters, meaning characters whose
//! Unicode General_Category is one of the `L*` classes. Every non-letter acts
//! as a separator, combining marks and letter-like numerals included, so
//! punctuation, digits and whitespace never show up in a token and
//! consecutive separators never produce an empty one.

use unicode_general_category::{GeneralCategory, get_general_category};

/// Lazy iterator over the letter runs of a line.
///
/// Tokens borrow from the input. The iterator is `Clone`, so a saved copy
/// restarts the sequence from wherever it was cloned.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    rest: &'a str,
}

/// Tokenize `line` into its letter runs.
pub fn words(line: &str) -> Words<'_> {
    Words { rest: line }
}

fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.rest.find(is_letter)?;
        let tail = &self.rest[start..];
        let end = tail.find(|c: char| !is_letter(c)).unwrap_or(tail.len());

        let (word, rest) = tail.split_at(end);
        self.rest = rest;
        Some(word)
    }
}

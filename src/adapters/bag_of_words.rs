//! Bag-of-words feature extractor
//!
//! Tokenization lowercases the text and splits every ASCII punctuation mark
//! and digit into its own token before splitting on whitespace. The feature
//! vector counts occurrences of each vocabulary token; unknown tokens are
//! ignored.

use std::collections::HashMap;

use crate::ports::FeatureExtractor;

/// Split `text` into lowercase tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let mut spaced = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        if c.is_ascii_punctuation() || c.is_ascii_digit() {
            spaced.push(' ');
            spaced.push(c);
            spaced.push(' ');
        } else {
            spaced.extend(c.to_lowercase());
        }
    }
    spaced.split_whitespace().map(str::to_string).collect()
}

/// Ordered token dictionary; indices follow first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from every token of `texts`
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self::default();
        for text in texts {
            for token in tokenize(text.as_ref()) {
                vocabulary.insert(token);
            }
        }
        vocabulary
    }

    /// Rebuild a vocabulary from its ordered token list. Duplicates are dropped.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        let mut vocabulary = Self::default();
        for token in tokens {
            vocabulary.insert(token);
        }
        vocabulary
    }

    fn insert(&mut self, token: String) {
        if !self.index.contains_key(&token) {
            self.index.insert(token.clone(), self.tokens.len());
            self.tokens.push(token);
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Count-vector extractor over a fixed vocabulary
#[derive(Debug, Clone)]
pub struct BagOfWords {
    vocabulary: Vocabulary,
}

impl BagOfWords {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

impl FeatureExtractor for BagOfWords {
    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    fn vectorize(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        for token in tokenize(text) {
            if let Some(i) = self.vocabulary.get(&token) {
                vector[i] += 1.0;
            }
        }
        vector
    }
}

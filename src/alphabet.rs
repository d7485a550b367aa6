use crate::consts::{ENGLISH_ALPHABET, MIN_ALPHABET_LEN, SYMBOL_NOT_FOUND};
use crate::error::{CfResult, CipherForgeError};
use std::fmt;

/// An ordered set of distinct lowercase ASCII letters.
///
/// Fixed for the lifetime of an engine. Construction folds case and rejects
/// anything that would make the permutation space degenerate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
    pos_map: [u8; 256],
}

impl Alphabet {
    pub fn parse(s: &str) -> CfResult<Self> {
        if s.is_empty() {
            return Err(CipherForgeError::Config("Alphabet is empty".to_string()));
        }

        let mut symbols = Vec::with_capacity(s.len());
        let mut pos_map = [SYMBOL_NOT_FOUND; 256];

        for c in s.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(CipherForgeError::Config(format!(
                    "Alphabet symbol '{}' is not an ASCII letter",
                    c
                )));
            }
            let byte = c.to_ascii_lowercase() as u8;
            if pos_map[byte as usize] != SYMBOL_NOT_FOUND {
                return Err(CipherForgeError::Config(format!(
                    "Alphabet contains duplicate symbol '{}'",
                    byte as char
                )));
            }
            pos_map[byte as usize] = symbols.len() as u8;
            symbols.push(byte);
        }

        if symbols.len() < MIN_ALPHABET_LEN {
            return Err(CipherForgeError::Config(format!(
                "Alphabet needs at least {} symbols, got {}",
                MIN_ALPHABET_LEN,
                symbols.len()
            )));
        }

        Ok(Self { symbols, pos_map })
    }

    pub fn english() -> Self {
        let symbols = ENGLISH_ALPHABET.as_bytes().to_vec();
        let mut pos_map = [SYMBOL_NOT_FOUND; 256];
        for (i, &b) in symbols.iter().enumerate() {
            pos_map[b as usize] = i as u8;
        }
        Self { symbols, pos_map }
    }

    #[inline(always)]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline(always)]
    pub fn position(&self, symbol: u8) -> Option<usize> {
        match self.pos_map[symbol as usize] {
            SYMBOL_NOT_FOUND => None,
            p => Some(p as usize),
        }
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.position(symbol).is_some()
    }

    pub fn identity(&self) -> Key {
        Key {
            symbols: self.symbols.clone(),
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.symbols {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

/// A permutation of an [`Alphabet`], read positionally: `alphabet[i] -> key[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    symbols: Vec<u8>,
}

impl Key {
    /// Validates that `symbols` is a permutation of `alphabet`.
    pub fn from_symbols(alphabet: &Alphabet, symbols: Vec<u8>) -> CfResult<Self> {
        if symbols.len() != alphabet.len() {
            return Err(CipherForgeError::Validation(format!(
                "Key has {} symbols, alphabet has {}",
                symbols.len(),
                alphabet.len()
            )));
        }

        let mut seen = vec![false; alphabet.len()];
        for &b in &symbols {
            let p = alphabet.position(b).ok_or_else(|| {
                CipherForgeError::Validation(format!(
                    "Key symbol '{}' is not in the alphabet",
                    b as char
                ))
            })?;
            if seen[p] {
                return Err(CipherForgeError::Validation(format!(
                    "Key maps two symbols to '{}'",
                    b as char
                )));
            }
            seen[p] = true;
        }

        Ok(Self { symbols })
    }

    /// For symbols produced by permuting an alphabet in place; callers that
    /// store a key in the engine still go through `from_symbols`.
    pub(crate) fn from_permutation(symbols: Vec<u8>) -> Self {
        Self { symbols }
    }

    /// Parses a key string, folding case the same way the alphabet does.
    pub fn parse(alphabet: &Alphabet, s: &str) -> CfResult<Self> {
        let mut symbols = Vec::with_capacity(s.len());
        for c in s.trim().chars() {
            if !c.is_ascii() {
                return Err(CipherForgeError::Validation(format!(
                    "Key symbol '{}' is not in the alphabet",
                    c
                )));
            }
            symbols.push(c.to_ascii_lowercase() as u8);
        }
        Self::from_symbols(alphabet, symbols)
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The permutation that undoes this one: if `alphabet[i] -> self[i]`,
    /// the result maps `self[i] -> alphabet[i]`.
    pub fn inverse(&self, alphabet: &Alphabet) -> Key {
        let mut inverted = alphabet.symbols().to_vec();
        for (i, &target) in self.symbols.iter().enumerate() {
            if let Some(p) = alphabet.position(target) {
                inverted[p] = alphabet.symbols()[i];
            }
        }
        Key { symbols: inverted }
    }

    pub fn is_identity(&self, alphabet: &Alphabet) -> bool {
        self.symbols == alphabet.symbols()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.symbols {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

use crate::alphabet::{Alphabet, Key};

/// A one-shot byte lookup built from an alphabet and a key.
///
/// Starts as the identity on every byte, so anything outside the alphabet
/// maps to itself.
#[derive(Clone)]
pub struct SubstitutionTable {
    map: [u8; 256],
}

impl SubstitutionTable {
    pub fn identity() -> Self {
        let mut map = [0u8; 256];
        for (i, slot) in map.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self { map }
    }

    /// `key` is read positionally against `alphabet`; both are lowercase.
    pub fn new(alphabet: &Alphabet, key: &[u8]) -> Self {
        let mut table = Self::identity();
        for (&from, &to) in alphabet.symbols().iter().zip(key) {
            table.map[from as usize] = to;
        }
        table
    }

    pub fn from_key(alphabet: &Alphabet, key: &Key) -> Self {
        Self::new(alphabet, key.as_bytes())
    }

    #[inline(always)]
    pub fn set(&mut self, from: u8, to: u8) {
        self.map[from as usize] = to;
    }

    #[inline(always)]
    pub fn map_byte(&self, b: u8) -> u8 {
        self.map[b as usize]
    }

    /// Case-preserving substitution over arbitrary text.
    ///
    /// Uppercase letters are folded, looked up, and re-uppercased. Everything
    /// that is not an ASCII letter is copied through.
    pub fn apply(&self, text: &str) -> String {
        text.chars()
            .map(|c| {
                if !c.is_ascii_alphabetic() {
                    return c;
                }
                if c.is_ascii_lowercase() {
                    self.map_byte(c as u8) as char
                } else {
                    let lower = c.to_ascii_lowercase() as u8;
                    (self.map_byte(lower) as char).to_ascii_uppercase()
                }
            })
            .collect()
    }

    /// Raw byte substitution into a reusable buffer. Used on normalized text
    /// inside the search loop, where no case handling is needed.
    #[inline(always)]
    pub fn apply_bytes_into(&self, src: &[u8], dst: &mut Vec<u8>) {
        dst.clear();
        dst.extend(src.iter().map(|&b| self.map[b as usize]));
    }
}

/// Applies `key` to `text`, rebuilding the lookup for this call.
pub fn transform(alphabet: &Alphabet, key: &Key, text: &str) -> String {
    SubstitutionTable::from_key(alphabet, key).apply(text)
}

use crate::alphabet::Alphabet;
use fastrand::Rng;

/// A uniformly random permutation of the alphabet (the restart point of a trial).
pub fn shuffled_key(rng: &mut Rng, alphabet: &Alphabet) -> Vec<u8> {
    let mut key = alphabet.symbols().to_vec();
    rng.shuffle(&mut key);
    key
}

/// Two distinct, uniformly chosen positions in `0..len`.
///
/// `len` must be at least 2; alphabets shorter than that are rejected at
/// construction, otherwise this would never return.
#[inline(always)]
pub fn pick_swap(rng: &mut Rng, len: usize) -> (usize, usize) {
    let lhs = rng.usize(0..len);
    let mut rhs = rng.usize(0..len);
    while lhs == rhs {
        rhs = rng.usize(0..len);
    }
    (lhs, rhs)
}

pub mod encrypt;
pub mod ngrams;
pub mod solve;

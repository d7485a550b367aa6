use crate::error::CfResult;
use crate::normalizer::Normalizer;
use crate::scorer::ngram::validate_ngram_size;
use std::collections::HashMap;

/// Counts every overlapping n-gram of the normalized text.
///
/// Returned in descending count order, ties broken alphabetically, so the
/// output is stable across runs.
pub fn count_ngrams<N: Normalizer + ?Sized>(
    content: &str,
    n: usize,
    normalizer: &N,
) -> CfResult<Vec<(String, u64)>> {
    validate_ngram_size(n)?;

    let clean = normalizer.normalize(content);
    let bytes = clean.as_bytes();

    let mut counts: HashMap<&[u8], u64> = HashMap::new();
    if bytes.len() >= n {
        for window in bytes.windows(n) {
            *counts.entry(window).or_default() += 1;
        }
    }

    let mut entries: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(gram, count)| (String::from_utf8_lossy(gram).into_owned(), count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(entries)
}

/// Renders entries in the frequency-table line format read by
/// [`crate::scorer::loader`]. `top` limits the output; 0 keeps everything.
pub fn render_table(entries: &[(String, u64)], top: usize) -> String {
    let limit = if top == 0 { entries.len() } else { top };

    let mut output = String::new();
    for (gram, count) in entries.iter().take(limit) {
        output.push_str(&format!("{} {}\n", gram.to_uppercase(), count));
    }
    output
}

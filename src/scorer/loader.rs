use super::{NgramTable, Weighting};
use crate::error::CfResult;
use crate::normalizer::{EnglishNormalizer, Normalizer};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

pub struct RawNgrams {
    pub entries: Vec<(String, f64)>,
    pub skipped: usize,
}

/// Reads `<token> <whitespace> <weight>` lines.
///
/// Tokens are normalized (letters only, lowercase). Lines with fewer than two
/// fields, an unparsable or non-finite weight, or a token that normalizes to
/// nothing are counted in `skipped`.
pub fn read_ngram_entries<R: Read>(reader: R) -> CfResult<RawNgrams> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let normalizer = EnglishNormalizer;
    let mut entries = Vec::new();
    let mut skipped = 0;
    let mut row_idx = 0;

    for result in rdr.records() {
        row_idx += 1;
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                debug!("[Row {}] parse error: {}", row_idx, e);
                skipped += 1;
                continue;
            }
        };

        // Fields may still hold tabs or be empty when spaces repeat.
        let mut tokens = rec.iter().flat_map(str::split_whitespace);
        let (Some(raw_token), Some(raw_weight)) = (tokens.next(), tokens.next()) else {
            skipped += 1;
            continue;
        };

        let token = normalizer.normalize(raw_token);
        let weight = match raw_weight.parse::<f64>() {
            Ok(w) if w.is_finite() && !token.is_empty() => w,
            _ => {
                skipped += 1;
                continue;
            }
        };

        entries.push((token, weight));
    }

    if skipped > 0 {
        warn!("Skipped {} invalid rows in frequency table.", skipped);
    }

    Ok(RawNgrams { entries, skipped })
}

pub fn load_ngram_entries<P: AsRef<Path>>(path: P) -> CfResult<RawNgrams> {
    let file = File::open(path)?;
    read_ngram_entries(file)
}

/// Loads a frequency file straight into an [`NgramTable`] of order `n`.
pub fn load_ngram_table<P: AsRef<Path>>(
    path: P,
    n: usize,
    weighting: Weighting,
) -> CfResult<NgramTable> {
    let path = path.as_ref();
    info!("Loading n-grams from: {}", path.display());

    let raw = load_ngram_entries(path)?;
    debug!(
        "Read {} entries ({} skipped) from {}",
        raw.entries.len(),
        raw.skipped,
        path.display()
    );

    NgramTable::from_entries(n, raw.entries, weighting)
}

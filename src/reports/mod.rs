use cipherforge::{Alphabet, FitSummary, Key};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Cipher symbol over plain symbol, split into rows of 13 so 26 letters fit
/// a terminal.
pub fn key_grid(alphabet: &Alphabet, key: &Key) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let cols = 13;
    for (from, to) in alphabet
        .symbols()
        .chunks(cols)
        .zip(key.as_bytes().chunks(cols))
    {
        let mut cipher_row = vec![Cell::new("cipher").add_attribute(Attribute::Bold)];
        cipher_row.extend(from.iter().map(|&b| Cell::new(b as char).fg(Color::Red)));

        let mut plain_row = vec![Cell::new("plain").add_attribute(Attribute::Bold)];
        plain_row.extend(to.iter().map(|&b| Cell::new(b as char).fg(Color::Green)));

        table.add_row(cipher_row);
        table.add_row(plain_row);
    }

    for i in 1..=cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Center);
        }
    }

    table
}

pub fn fit_summary(summary: &FitSummary, seed: u64, swaps: u32) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    table.set_header(vec![
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Workers"),
        Cell::new("Trials/Worker"),
        Cell::new("Swaps"),
        Cell::new("Seed"),
        Cell::new("Updated"),
    ]);
    table.add_row(vec![
        Cell::new(format!("{:.2}", summary.score)).fg(Color::Cyan),
        Cell::new(summary.workers),
        Cell::new(summary.trials_per_worker),
        Cell::new(swaps),
        Cell::new(seed),
        Cell::new(if summary.updated { "yes" } else { "no" }),
    ]);

    table
}

pub fn print_fit(alphabet: &Alphabet, key: &Key, summary: &FitSummary, seed: u64, swaps: u32) {
    eprintln!("\n=== 🔑 RECOVERED KEY ===");
    eprintln!("{}", fit_summary(summary, seed, swaps));
    eprintln!("{}", key_grid(alphabet, key));
    eprintln!("Key: {}", key);
}

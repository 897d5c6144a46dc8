use std::path::PathBuf;

use bitraster::{geometry::total_rows, load_bytes, Settings, Viewport};
use clap::Parser;
use color_eyre::eyre::{self, eyre};

#[derive(clap::Parser)]
/// Print the size of a file as seen by the bit viewer
struct Options {
    /// A file
    file: PathBuf,
    /// Number of bits per row
    #[clap(long, short = 'w', default_value_t = 64)]
    row_width: usize,
    /// Number of visible rows
    #[clap(long, default_value_t = 32)]
    rows: usize,
    /// Number of visible columns
    #[clap(long, default_value_t = 64)]
    columns: usize,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let opt: Options = Options::parse();

    let buffer = load_bytes(&opt.file, Settings::default().max_bytes)?;
    if buffer.is_empty() {
        return Err(eyre!("'{}' is empty", opt.file.display()));
    }
    let viewport = Viewport::new(opt.row_width, opt.rows, opt.columns)?;
    let limits = viewport.scroll_limits(buffer.num_bits());

    println!("Bytes:       {}", buffer.len());
    println!("Bits:        {}", buffer.num_bits());
    println!("Rows:        {}", total_rows(buffer.num_bits(), opt.row_width));
    println!("Last row:    {}", limits.rows);
    println!("Last column: {}", limits.columns);
    Ok(())
}

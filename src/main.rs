//! # Bit viewer
//!
//! Shows the bits of a file as a raster. See `bitview --help`.

use bitview::cli::{self, export::export, opt::Options};
use bitraster::BitView;
use color_eyre::eyre::{self, WrapErr};
use log::debug;

fn main() -> eyre::Result<()> {
    let opt: Options = cli::init()?;
    let settings = opt
        .settings()
        .wrap_err("Failed to load settings")?;
    debug!("{:?}", settings);

    let mut view = BitView::new();
    view.load_file(&opt.file, &settings)?;

    let viewport = opt
        .window
        .viewport(&settings, view.num_bits())
        .wrap_err("Invalid window")?;
    let limits = viewport.scroll_limits(view.num_bits());
    debug!("{:?}, scroll limits {:?}", viewport, limits);

    export(&view, &viewport, &settings, &opt)
}

use std::{
    fmt::Write as _,
    io::{self, Write},
    path::{Path, PathBuf},
};

use bitraster::{
    geometry::grid_lines,
    raster::{ASCII, UNICODE},
    BitView, Bitmap, Magnification, Settings, Viewport,
};
use color_eyre::eyre::{self, eyre};
use image::{GrayImage, ImageFormat, Luma};
use log::info;

use super::opt::{Format, Options};

const BIT_BORDER: Luma<u8> = Luma([0xC0]);
const GRID_LINE: Luma<u8> = Luma([0x80]);

fn write_text(out: Option<&Path>, text: &str) -> eyre::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text)?;
            info!("Saved text as '{}'", path.display());
        }
        None => io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}

/// Draw the outline of every magnified bit onto the background
fn draw_bit_borders(image: &mut GrayImage, magnification: Magnification) {
    let n = magnification.get() as u32;
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        if (x % n == 0 || y % n == 0) && pixel.0[0] != 0 {
            *pixel = BIT_BORDER;
        }
    }
}

fn draw_grid(
    image: &mut GrayImage,
    viewport: &Viewport,
    grid_size: usize,
    magnification: Magnification,
) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    for x in grid_lines(
        viewport.start_column,
        grid_size,
        magnification,
        width as usize - 1,
    ) {
        for y in 0..height {
            image.put_pixel(x as u32, y, GRID_LINE);
        }
    }
    for y in grid_lines(
        viewport.start_row,
        grid_size,
        magnification,
        height as usize - 1,
    ) {
        for x in 0..width {
            image.put_pixel(x, y as u32, GRID_LINE);
        }
    }
}

/// Render `bitmap` as an image with optional bit borders and grid
pub fn render_png(
    bitmap: &Bitmap,
    viewport: &Viewport,
    settings: &Settings,
    magnification: Magnification,
) -> GrayImage {
    let mut image = bitmap.to_image();
    if settings.bit_borders(magnification) {
        draw_bit_borders(&mut image, magnification);
    }
    draw_grid(&mut image, viewport, settings.grid_size, magnification);
    image
}

/// Print one `x y bit` line per visible bit
pub fn write_draw_commands(view: &BitView, viewport: &Viewport, out: &mut String) -> eyre::Result<()> {
    let walk = view.walk(viewport).ok_or_else(|| eyre!("Nothing to draw"))?;
    for (x, y, bit) in walk {
        writeln!(out, "{} {} {}", x, y, u8::from(bit))?;
    }
    Ok(())
}

fn out_path(opt: &Options, format: Format) -> PathBuf {
    opt.out
        .clone()
        .unwrap_or_else(|| opt.file.with_extension(format.extension()))
}

pub fn export(
    view: &BitView,
    viewport: &Viewport,
    settings: &Settings,
    opt: &Options,
) -> eyre::Result<()> {
    if let Format::Draw = opt.format {
        let mut out = String::new();
        write_draw_commands(view, viewport, &mut out)?;
        return write_text(opt.out.as_deref(), &out);
    }

    let magnification = settings.magnification;
    let bitmap = view
        .rasterize(viewport, magnification, opt.strategy)
        .ok_or_else(|| eyre!("The file '{}' is empty", opt.file.display()))?;
    info!(
        "Rasterized {} rows of {} pixels",
        bitmap.rows(),
        bitmap.width
    );
    if !bitmap.remainder.is_empty() {
        info!("{} bits are left over after the last row", bitmap.remainder.len());
    }

    match opt.format {
        Format::Ascii | Format::Unicode => {
            let style = match opt.format {
                Format::Unicode => UNICODE,
                _ => ASCII,
            };
            let mut out = String::new();
            bitmap.ascii_art(&mut out, style)?;
            write_text(opt.out.as_deref(), &out)?;
        }
        Format::Pbm => {
            let mut out = String::new();
            bitmap.write_as_pbm(&mut out)?;

            let out_path = out_path(opt, Format::Pbm);
            std::fs::write(&out_path, out)?;
            info!("Saved image as '{}'", out_path.display());
        }
        Format::Png => {
            let image = render_png(&bitmap, viewport, settings, magnification);

            let out_path = out_path(opt, Format::Png);
            image.save_with_format(&out_path, ImageFormat::Png)?;
            info!("Saved image as '{}'", out_path.display());
        }
        Format::Draw => unreachable!(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use bitraster::{BitView, ByteBuffer, Magnification, Settings, Strategy, Viewport};

    use super::{render_png, write_draw_commands};

    #[test]
    fn draw_commands() {
        let view = BitView::with_buffer(ByteBuffer::from(vec![0b1010_0000]));
        let vp = Viewport::new(2, 1, 2).unwrap();
        let mut out = String::new();
        write_draw_commands(&view, &vp, &mut out).unwrap();
        assert_eq!(out, "0 0 1\n1 0 0\n0 1 1\n1 1 0\n");
    }

    #[test]
    fn png_with_borders_and_grid() {
        let view = BitView::with_buffer(ByteBuffer::from(vec![0x80, 0x00]));
        let vp = Viewport::new(8, 1, 8).unwrap();
        let three = Magnification::new(3).unwrap();
        let bitmap = view.rasterize(&vp, three, Strategy::Batch).unwrap();
        let settings = Settings {
            grid_size: 4,
            ..Settings::default()
        };
        let image = render_png(&bitmap, &vp, &settings, three);
        assert_eq!(image.dimensions(), (24, 6));
        // ink stays black, borders only cover the background
        assert_eq!(image.get_pixel(1, 1).0, [0x00]);
        assert_eq!(image.get_pixel(3, 1).0, [0xC0]);
        assert_eq!(image.get_pixel(4, 1).0, [0xFF]);
        // grid lines every 4 bits, starting at the scroll position
        assert_eq!(image.get_pixel(12, 1).0, [0x80]);
        assert_eq!(image.get_pixel(1, 0).0, [0x80]);
    }
}

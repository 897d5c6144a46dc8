use std::{convert::TryFrom, fmt, io, path::PathBuf, str::FromStr};

use bitraster::{
    geometry::total_rows, GeometryError, Magnification, Settings, Strategy, Viewport,
};
use clap::Parser;
use thiserror::*;

/// The format to export the raster into
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    /// Text with `#` for set bits
    Ascii,
    /// Text with unicode box drawing characters
    Unicode,
    /// Portable Bitmap Format
    Pbm,
    /// Portable Network Graphic
    Png,
    /// A list of `x y bit` draw commands
    Draw,
}

#[derive(Debug)]
/// Failed to parse a format name
pub struct FormatError {}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Use one of `ascii`, `unicode`, `pbm`, `png` or `draw`")?;
        Ok(())
    }
}

impl std::error::Error for FormatError {}

impl Default for Format {
    fn default() -> Self {
        Format::Ascii
    }
}

impl FromStr for Format {
    type Err = FormatError;
    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "txt" | "ascii" => Ok(Self::Ascii),
            "unicode" => Ok(Self::Unicode),
            "pbm" => Ok(Self::Pbm),
            "png" => Ok(Self::Png),
            "draw" => Ok(Self::Draw),
            _ => Err(FormatError {}),
        }
    }
}

impl Format {
    fn to_static_str(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Unicode => "unicode",
            Self::Pbm => "pbm",
            Self::Png => "png",
            Self::Draw => "draw",
        }
    }

    /// The file extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Ascii | Self::Unicode | Self::Draw => "txt",
            Self::Pbm => "pbm",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_static_str())
    }
}

#[derive(Parser)]
/// Show the bits of a file as a raster
pub struct Options {
    /// The file to be shown
    pub file: PathBuf,
    /// Where to store the output (text formats default to STDOUT)
    pub out: Option<PathBuf>,
    /// Format of the output. Valid choices are:
    ///
    /// "ascii", "unicode", "pbm", "png" and "draw"
    #[clap(default_value_t, long, short = 'F')]
    pub format: Format,
    /// How the raster is built: "batch", "streaming" or "auto"
    #[clap(default_value_t, long, short = 'S')]
    pub strategy: Strategy,

    /// The visible window
    #[clap(flatten)]
    pub window: Window,

    /// Settings passed as command line args
    #[clap(flatten)]
    pub cl_settings: SettingsArgs,

    /// Settings as a RON file
    #[clap(long)]
    pub config: Option<PathBuf>,
}

/// The visible window, in bits and rows
#[derive(Debug, Default, Clone, Parser)]
pub struct Window {
    /// Number of bits to skip at the start of the file
    #[clap(long, default_value_t = 0, allow_hyphen_values = true)]
    pub offset: i64,
    /// First visible column
    #[clap(long, short = 'x', default_value_t = 0, allow_hyphen_values = true)]
    pub start_column: i64,
    /// First visible row
    #[clap(long, short = 'y', default_value_t = 0, allow_hyphen_values = true)]
    pub start_row: i64,
    /// Number of visible rows (default: all)
    #[clap(long, allow_hyphen_values = true)]
    pub rows: Option<i64>,
    /// Number of visible columns (default: the row width)
    #[clap(long, allow_hyphen_values = true)]
    pub columns: Option<i64>,
    /// Clamp the start row and column to the scrollable range
    #[clap(long)]
    pub clamp: bool,
}

/// Overrides for the settings file
#[derive(Debug, Default, Clone, Parser)]
pub struct SettingsArgs {
    /// Number of bits per row
    #[clap(long, short = 'w', allow_hyphen_values = true)]
    pub row_width: Option<i64>,
    /// Size of a bit in pixels
    #[clap(long, short = 'm')]
    pub magnification: Option<Magnification>,
    /// Distance between grid lines in bits (0 disables the grid)
    #[clap(long)]
    pub grid: Option<usize>,
    /// Maximum number of bytes to read
    #[clap(long)]
    pub max_bytes: Option<u64>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO Error")]
    Io(#[from] io::Error),
    #[error("Deserialize Error")]
    Ron(#[from] ron::error::Error),
    #[error("Invalid geometry")]
    Geometry(#[from] GeometryError),
}

impl SettingsArgs {
    /// Apply the command line values on top of `settings`
    pub fn apply(&self, mut settings: Settings) -> Result<Settings, SettingsError> {
        if let Some(row_width) = self.row_width {
            settings.row_width = usize::try_from(row_width).map_err(|_| {
                GeometryError::Negative {
                    name: "row_width",
                    value: row_width,
                }
            })?;
        }
        if let Some(magnification) = self.magnification {
            settings.magnification = magnification;
        }
        if let Some(grid) = self.grid {
            settings.grid_size = grid;
        }
        if let Some(max_bytes) = self.max_bytes {
            settings.max_bytes = max_bytes;
        }
        Ok(settings)
    }
}

impl Options {
    pub fn settings(&self) -> Result<Settings, SettingsError> {
        let settings = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                ron::from_str(&text)?
            }
            None => Settings::default(),
        };
        self.cl_settings.apply(settings)
    }
}

impl Window {
    /// The viewport for a buffer of `total_bits`
    pub fn viewport(&self, settings: &Settings, total_bits: usize) -> Result<Viewport, GeometryError> {
        let row_width = i64::try_from(settings.row_width).map_err(|_| GeometryError::Overflow {
            name: "row_width",
            value: i64::MAX,
        })?;
        let all_rows = total_rows(total_bits, settings.row_width);
        let viewport = Viewport::from_signed(
            self.offset,
            row_width,
            self.start_column,
            self.start_row,
            self.rows.unwrap_or(all_rows as i64),
            self.columns.unwrap_or(row_width),
        )?;
        Ok(match self.clamp {
            true => viewport.clamp_scroll(total_bits),
            false => viewport,
        })
    }
}

#[cfg(test)]
mod tests {
    use bitraster::{GeometryError, Magnification, Settings, Strategy};
    use clap::Parser;

    use super::{Format, Options};

    #[test]
    fn parse_options() {
        let opt = Options::parse_from([
            "bitview", "data.bin", "-F", "png", "-S", "batch", "-w", "12", "-m", "4", "-y",
            "3", "--rows", "10",
        ]);
        assert_eq!(opt.format, Format::Png);
        assert_eq!(opt.strategy, Strategy::Batch);
        let settings = opt.settings().unwrap();
        assert_eq!(settings.row_width, 12);
        assert_eq!(settings.magnification, Magnification::new(4).unwrap());

        let vp = opt.window.viewport(&settings, 800).unwrap();
        assert_eq!(vp.row_width, 12);
        assert_eq!(vp.start_row, 3);
        assert_eq!(vp.visible_rows, 10);
        assert_eq!(vp.visible_columns, 12);
    }

    #[test]
    fn defaults_cover_the_file() {
        let opt = Options::parse_from(["bitview", "data.bin"]);
        assert_eq!(opt.format, Format::Ascii);
        assert_eq!(opt.strategy, Strategy::Auto);
        let settings = opt.settings().unwrap();
        assert_eq!(settings, Settings::default());
        let vp = opt.window.viewport(&settings, 64 * 7 + 1).unwrap();
        assert_eq!(vp.visible_rows, 8);
        assert_eq!(vp.visible_columns, 64);
    }

    #[test]
    fn negative_values_are_rejected() {
        let opt = Options::parse_from(["bitview", "data.bin", "--offset", "-4"]);
        let settings = opt.settings().unwrap();
        assert_eq!(
            opt.window.viewport(&settings, 64),
            Err(GeometryError::Negative {
                name: "offset",
                value: -4
            })
        );

        let opt = Options::parse_from(["bitview", "data.bin", "-w", "0"]);
        let settings = opt.settings().unwrap();
        assert_eq!(
            opt.window.viewport(&settings, 64),
            Err(GeometryError::ZeroRowWidth)
        );

        let opt = Options::parse_from(["bitview", "data.bin", "-w", "-8"]);
        assert!(opt.settings().is_err());
    }

    #[test]
    fn settings_file() {
        let settings: Settings = ron::from_str("(row_width: 32, magnification: 2)").unwrap();
        assert_eq!(settings.row_width, 32);
        assert_eq!(settings.magnification.get(), 2);
        assert_eq!(settings.max_bytes, 1 << 20);
        assert!(ron::from_str::<Settings>("(magnification: 0)").is_err());
    }
}

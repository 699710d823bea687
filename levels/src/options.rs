use anyhow::{Context, Error as AnyError};
use clap::Parser;
use std::{fs::File, io::BufReader, path::PathBuf};
use terrain::{Config, ElevationMode};

/// Adds contours, cross sections and point elevations to a DXF drawing
/// of level readings.
///
/// The drawing needs a POINT at every surveyed spot and an MTEXT with
/// the staff reading placed next to it. Only the first line of each
/// MTEXT is read, so notes can go on the following lines.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// Input DXF drawing.
    pub input: PathBuf,

    /// JSON configuration file. Flags below take precedence over it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Level reading at your zero point.
    #[arg(short, long, allow_hyphen_values = true)]
    pub zero: Option<f64>,

    /// Labels already hold elevations, not staff readings.
    #[arg(long, default_value_t = false)]
    pub precomputed: bool,

    /// Output drawing [default: <input>_with_contours.dxf].
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Interpolation grid spacing, in drawing units.
    #[arg(short, long)]
    pub resolution: Option<f64>,

    /// Elevation step between contours.
    #[arg(short = 'd', long)]
    pub contour_interval: Option<f64>,

    /// Distance between cross sections, in drawing units.
    #[arg(short = 'S', long)]
    pub section_spacing: Option<f64>,

    /// Approximate distance between elevation labels along contours.
    #[arg(long)]
    pub label_spacing: Option<f64>,

    /// Blank space between stacked cross sections.
    #[arg(long)]
    pub section_gap: Option<f64>,

    /// Character height of added text.
    #[arg(long)]
    pub text_height: Option<f64>,

    /// Also export samples as CSV next to the input.
    #[arg(short = 'c', long, default_value_t = false)]
    pub export_csv: bool,

    /// Only export samples as CSV.
    #[arg(long, default_value_t = false)]
    pub csv_only: bool,

    /// Overwrite an existing output without asking.
    #[arg(short, long, default_value_t = false)]
    pub yes: bool,

    /// Print the derived model as JSON to stdout.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Plot cross sections in the terminal.
    #[arg(short, long, default_value_t = false)]
    pub show: bool,

    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Returns the configuration file (or defaults) with flags applied.
    pub fn config(&self) -> Result<Config, AnyError> {
        let mut config = match &self.config {
            Some(path) => {
                let rdr = BufReader::new(
                    File::open(path).with_context(|| format!("opening {}", path.display()))?,
                );
                serde_json::from_reader(rdr)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => Config::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        let overrides = [
            (self.zero, &mut config.zero_offset),
            (self.resolution, &mut config.grid_resolution),
            (self.contour_interval, &mut config.contour_interval),
            (self.section_spacing, &mut config.section_spacing),
            (self.label_spacing, &mut config.label_spacing),
            (self.section_gap, &mut config.section_gap),
            (self.text_height, &mut config.text_height),
        ];
        for (flag, value) in overrides {
            if let Some(flag) = flag {
                *value = flag;
            }
        }
        if self.precomputed {
            config.elevation_mode = ElevationMode::Precomputed;
        }
        if let Some(output) = &self.output {
            config.output_path = Some(output.clone());
        }
        config.csv_export |= self.export_csv;
        config.csv_only |= self.csv_only;
        config.verbose |= self.verbose;
    }
}

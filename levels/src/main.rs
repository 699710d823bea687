mod options;

use anyhow::{Context, Error as AnyError};
use cad::Document;
use clap::Parser;
use log::{debug, info};
use options::Cli;
use serde::Serialize;
use std::{
    fs::File,
    io::{BufRead, BufWriter, Write},
    path::{Path, PathBuf},
};
use terrain::{annotate, table, Config, Sample, Samples, TerrainModel};
use textplots::{Chart, Plot, Shape};

fn main() -> Result<(), AnyError> {
    let cli = Cli::parse();
    let config = cli.config()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if config.verbose { "debug" } else { "info" }),
    )
    .init();

    run(&cli, &config)
}

fn run(cli: &Cli, config: &Config) -> Result<(), AnyError> {
    info!("converting points from {} to contours", cli.input.display());
    let mut document = Document::load(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let points = document.points();
    let labels = document.labels();
    debug!("{} points, {} labels", points.len(), labels.len());
    debug!("level reading at zero: {:.2}", config.zero_offset);

    let Samples {
        samples,
        diagnostics,
    } = Samples::match_labels(&points, &labels, config)
        .with_context(|| format!("matching readings in {}", cli.input.display()))?;
    debug!("samples: {samples:?}");

    let csv_path = cli.input.with_extension("csv");
    if config.csv_only {
        return write_csv(&csv_path, &samples);
    }

    // Nothing is written until the whole model is built and the output
    // path is cleared.
    let model = TerrainModel::from_samples(samples, diagnostics, config)?;
    let primitives = annotate::assemble(&model, config);

    let out_path = config
        .output_path
        .clone()
        .unwrap_or_else(|| default_output(&cli.input));
    let allowed = may_overwrite(
        &out_path,
        cli.yes,
        std::io::stdin().lock(),
        std::io::stderr().lock(),
    )?;
    if !allowed {
        info!("not overwriting {}, exiting", out_path.display());
        return Ok(());
    }

    if config.csv_export {
        write_csv(&csv_path, &model.samples)?;
    }
    if cli.json {
        print_json(&model)?;
    }
    if cli.show {
        plot_sections(&model);
    }

    document.annotate(&primitives);
    document
        .save(&out_path)
        .with_context(|| format!("writing {}", out_path.display()))?;
    info!("saved output to {}", out_path.display());
    Ok(())
}

/// `<dir>/<stem>_with_contours.dxf` next to `input`.
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_with_contours.dxf"))
}

fn write_csv(path: &Path, samples: &[Sample]) -> Result<(), AnyError> {
    let out = BufWriter::new(File::create(path)?);
    table::write_samples(out, samples)?;
    info!("CSV file written to {}", path.display());
    Ok(())
}

/// Returns whether `path` may be written, asking on `prompt` and
/// reading the answer from `answers` when it already exists.
fn may_overwrite<R: BufRead, W: Write>(
    path: &Path,
    yes: bool,
    mut answers: R,
    mut prompt: W,
) -> Result<bool, AnyError> {
    if yes || !path.exists() {
        return Ok(true);
    }
    write!(
        prompt,
        "{} already exists, do you want to overwrite? (y/n): ",
        path.display()
    )?;
    prompt.flush()?;
    let mut answer = String::new();
    answers.read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_json(model: &TerrainModel) -> Result<(), AnyError> {
    #[derive(Serialize)]
    struct JsonLevel {
        z: f64,
        color: u8,
        polylines: Vec<Vec<[f64; 2]>>,
    }

    #[derive(Serialize)]
    struct JsonModel<'a> {
        samples: &'a [Sample],
        grid: &'a terrain::Grid,
        levels: Vec<JsonLevel>,
        sections: &'a [terrain::SectionLine],
        diagnostics: Vec<String>,
    }

    let levels = model
        .contours
        .levels
        .iter()
        .map(|level| JsonLevel {
            z: level.z,
            color: level.color,
            polylines: level
                .polylines
                .iter()
                .map(|line| line.coords().map(|c| [c.x, c.y]).collect())
                .collect(),
        })
        .collect();
    let json = serde_json::to_string(&JsonModel {
        samples: &model.samples,
        grid: &model.grid,
        levels,
        sections: &model.sections.lines,
        diagnostics: model.diagnostics.iter().map(ToString::to_string).collect(),
    })?;
    println!("{json}");
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
fn plot_sections(model: &TerrainModel) {
    for section in &model.sections.lines {
        let plot_data: Vec<(f32, f32)> = section
            .profile
            .iter()
            .map(|(d, z)| (*d as f32, *z as f32))
            .collect();
        let (Some(first), Some(last)) = (plot_data.first(), plot_data.last()) else {
            continue;
        };
        println!("section {} ({})", section.name, section.axis);
        Chart::new(180, 60, first.0, last.0.max(first.0 + 1.0))
            .lineplot(&Shape::Lines(&plot_data))
            .display();
    }
}

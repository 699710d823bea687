use crate::{
    Config, ContourSet, Diagnostic, Grid, HeightField, RawLabel, Sample, Samples, Sections,
    TerrainError,
};
use geo::Coord;
use log::{debug, info};

/// Everything derived from one drawing's points and labels.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainModel {
    pub samples: Vec<Sample>,
    pub grid: Grid,
    pub field: HeightField,
    pub contours: ContourSet,
    pub sections: Sections,

    /// Skipped labels and section cuts, in the order they were met.
    pub diagnostics: Vec<Diagnostic>,
}

impl TerrainModel {
    /// Runs the whole pipeline.
    ///
    /// Fails on the first fatal stage error; per-item problems end up
    /// in [TerrainModel::diagnostics].
    pub fn build(
        points: &[Coord<f64>],
        labels: &[RawLabel],
        config: &Config,
    ) -> Result<Self, TerrainError> {
        let Samples {
            samples,
            diagnostics,
        } = Samples::match_labels(points, labels, config)?;
        Self::from_samples(samples, diagnostics, config)
    }

    pub fn from_samples(
        samples: Vec<Sample>,
        mut diagnostics: Vec<Diagnostic>,
        config: &Config,
    ) -> Result<Self, TerrainError> {
        let now = std::time::Instant::now();

        let grid = Grid::covering(&samples, config.grid_resolution)?;
        let field = HeightField::interpolate(&samples, grid)?;
        let contours = ContourSet::builder()
            .interval(config.contour_interval)
            .label_spacing(config.label_spacing)
            .palette(&config.palette)
            .build(&field)?;
        let sections = Sections::cut(&field, config.section_spacing, config.section_gap)?;
        diagnostics.extend(sections.diagnostics.iter().cloned());

        info!(
            "{} samples, {}x{} grid, {} contour levels, {} sections",
            samples.len(),
            grid.nx,
            grid.ny,
            contours.levels.len(),
            sections.lines.len()
        );
        debug!("model; exec: {:?}", now.elapsed());

        Ok(Self {
            samples,
            grid,
            field,
            contours,
            sections,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::TerrainModel;
    use crate::{contour::contour_levels, Config, RawLabel, TerrainError};
    use geo::{coord, Coord};

    fn corners() -> (Vec<Coord<f64>>, Vec<RawLabel>) {
        let points = vec![
            coord!(x: 0.0, y: 0.0),
            coord!(x: 10.0, y: 0.0),
            coord!(x: 0.0, y: 10.0),
            coord!(x: 10.0, y: 10.0),
        ];
        let labels = points
            .iter()
            .zip(["1", "2", "3", "4"])
            .map(|(p, reading)| RawLabel::new(*p + coord!(x: 0.3, y: 0.1), reading))
            .collect();
        (points, labels)
    }

    fn config() -> Config {
        Config {
            zero_offset: 0.0,
            grid_resolution: 1.0,
            contour_interval: 0.5,
            ..Config::default()
        }
    }

    #[test]
    fn test_four_corners() {
        let (points, labels) = corners();
        let model = TerrainModel::build(&points, &labels, &config()).unwrap();

        let elevations: Vec<f64> = model.samples.iter().map(|s| s.elevation).collect();
        assert_eq!(elevations, vec![-1.0, -2.0, -3.0, -4.0]);
        assert_eq!((model.grid.nx, model.grid.ny), (11, 11));

        assert_eq!(
            contour_levels(&model.field, 0.5),
            vec![-4.0, -3.5, -3.0, -2.5, -2.0, -1.5]
        );
        assert!(!model.contours.levels.is_empty());
        for level in &model.contours.levels {
            assert!((-4.0..-1.0).contains(&level.z));
        }

        let grid = model.grid;
        for level in &model.contours.levels {
            for line in &level.polylines {
                for c in line.coords() {
                    assert!((0.0..=10.0).contains(&c.x) && (0.0..=10.0).contains(&c.y));
                    // Every vertex sits on a grid edge with both ends defined.
                    let (i, j) = (c.x.floor() as usize, c.y.floor() as usize);
                    let on_column = (c.x - c.x.round()).abs() < 1e-9;
                    let ends = if on_column {
                        let i = c.x.round() as usize;
                        [(i, j), (i, (j + 1).min(grid.ny - 1))]
                    } else {
                        [(i, c.y.round() as usize), (i + 1, c.y.round() as usize)]
                    };
                    for (i, j) in ends {
                        assert!(model.field.get(i, j).is_some());
                    }
                }
            }
        }
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let points: Vec<Coord<f64>> = (0..30)
            .map(|k| {
                let k = f64::from(k);
                coord!(x: (k * 7.7) % 23.0, y: (k * 5.3) % 19.0)
            })
            .collect();
        let labels: Vec<RawLabel> = points
            .iter()
            .enumerate()
            .map(|(k, p)| RawLabel::new(*p, format!("{:.3}", (k as f64 * 0.61).cos() * 2.0)))
            .collect();
        let config = Config {
            grid_resolution: 0.5,
            contour_interval: 0.25,
            section_spacing: 3.0,
            ..Config::default()
        };
        let a = TerrainModel::build(&points, &labels, &config).unwrap();
        let b = TerrainModel::build(&points, &labels, &config).unwrap();
        assert_eq!(a.contours, b.contours);
        assert_eq!(a.sections, b.sections);
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_sample_fails_without_output() {
        let points = vec![coord!(x: 1.0, y: 1.0)];
        let labels = vec![RawLabel::new(coord!(x: 1.0, y: 1.0), "1.5")];
        let res = TerrainModel::build(&points, &labels, &config());
        assert!(matches!(
            res,
            Err(TerrainError::InsufficientSamples(_) | TerrainError::DegenerateGrid { .. })
        ));
    }

    #[test]
    fn test_diagnostics_are_collected() {
        let (points, mut labels) = corners();
        labels.push(RawLabel::new(coord!(x: 5.0, y: 5.0), "BM1"));
        let model = TerrainModel::build(&points, &labels, &config()).unwrap();
        assert_eq!(model.samples.len(), 4);
        assert_eq!(model.diagnostics.len(), 1);
    }
}

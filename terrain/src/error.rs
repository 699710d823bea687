use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("missing or invalid parameter '{0}'")]
    Builder(&'static str),

    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("need at least 3 non-collinear samples, got {0} usable")]
    InsufficientSamples(usize),

    #[error("degenerate grid, {nx}x{ny} nodes (need at least 2 per axis)")]
    DegenerateGrid { nx: usize, ny: usize },

    #[error("triangulation failed, {0}")]
    Triangulation(#[from] spade::InsertionError),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("unreadable drawing, {0}")]
    Dxf(#[from] dxf::DxfError),
}

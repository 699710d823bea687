mod arange;
mod linspace;
mod snap;

pub(crate) use {
    arange::arange,
    linspace::linspace,
    snap::{snap_down, snap_up},
};

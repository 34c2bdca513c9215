use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid grid dimensions: {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },

    #[error("Position ({row}, {col}) is outside the {height}x{width} grid")]
    OutOfBounds {
        row:    usize,
        col:    usize,
        height: usize,
        width:  usize,
    },

    #[error("Distance field is {actual:?} but the grid is {expected:?}")]
    FieldShapeMismatch {
        expected: (usize, usize),
        actual:   (usize, usize),
    },

    #[error("Distance field needs {expected} values, got {actual}")]
    FieldLength { expected: usize, actual: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;

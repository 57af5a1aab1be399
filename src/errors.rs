//! Centralized error handling for VolProc
//!
//! Every operation returns [`Result`], so validation failures abort only the
//! requested operation and leave the caller's input untouched.

use std::fmt;

/// Main error type for VolProc operations
#[derive(Debug)]
pub enum VolProcError {
    /// NetCDF file operation errors
    NetCDFError(netcdf::Error),

    /// I/O operation errors
    IoError(std::io::Error),

    /// Variable not found in NetCDF file
    VariableNotFound { var: String },

    /// A parameter (window size, axis, part count...) is not valid for the volume
    InvalidParameter(String),

    /// Two volumes that must agree in shape do not
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// Malformed or unresolvable reshape descriptor
    InvalidShapeSpec { message: String },

    /// Thread pool configuration error
    ThreadPoolError(String),

    /// Array shape or dimension error
    ArrayError(ndarray::ShapeError),

    /// Anything else
    Generic(String),
}

impl VolProcError {
    pub(crate) fn invalid_parameter(message: impl Into<String>) -> Self {
        VolProcError::InvalidParameter(message.into())
    }

    pub(crate) fn shape_spec(message: impl Into<String>) -> Self {
        VolProcError::InvalidShapeSpec {
            message: message.into(),
        }
    }
}

impl fmt::Display for VolProcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolProcError::NetCDFError(e) => write!(f, "NetCDF error: {}", e),
            VolProcError::IoError(e) => write!(f, "I/O error: {}", e),
            VolProcError::VariableNotFound { var } => {
                write!(f, "Variable '{}' not found in file", var)
            }
            VolProcError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            VolProcError::ShapeMismatch { expected, found } => {
                write!(f, "Shape mismatch: expected {:?}, found {:?}", expected, found)
            }
            VolProcError::InvalidShapeSpec { message } => {
                write!(f, "Invalid shape specification: {}", message)
            }
            VolProcError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
            VolProcError::ArrayError(e) => write!(f, "Array error: {}", e),
            VolProcError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for VolProcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VolProcError::NetCDFError(e) => Some(e),
            VolProcError::IoError(e) => Some(e),
            VolProcError::ArrayError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<netcdf::Error> for VolProcError {
    fn from(error: netcdf::Error) -> Self {
        VolProcError::NetCDFError(error)
    }
}

impl From<std::io::Error> for VolProcError {
    fn from(error: std::io::Error) -> Self {
        VolProcError::IoError(error)
    }
}

impl From<ndarray::ShapeError> for VolProcError {
    fn from(error: ndarray::ShapeError) -> Self {
        VolProcError::ArrayError(error)
    }
}

impl From<String> for VolProcError {
    fn from(error: String) -> Self {
        VolProcError::Generic(error)
    }
}

impl From<&str> for VolProcError {
    fn from(error: &str) -> Self {
        VolProcError::Generic(error.to_string())
    }
}

/// Result type alias for VolProc operations
pub type Result<T> = std::result::Result<T, VolProcError>;

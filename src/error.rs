//! Error types for random projection operations.

use std::fmt;

/// Failure raised by the dimension calculator, the matrix generators, or
/// the fit/transform lifecycle.
///
/// Every failure is surfaced synchronously at the offending call; a failed
/// `fit` leaves the transformer unfitted.
///
/// # Examples
///
/// ```
/// use random_projection::ProjectionError;
///
/// let err = ProjectionError::InvalidEpsilon { eps: 1.1 };
/// assert!(err.to_string().contains("eps=1.1"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// A matrix generator was asked for a zero-sized axis.
    InvalidDimension {
        /// Requested number of components (rows).
        n_components: usize,
        /// Requested number of features (columns).
        n_features: usize,
    },

    /// Distortion tolerance outside the open interval (0, 1).
    InvalidEpsilon {
        /// Offending tolerance value.
        eps: f64,
    },

    /// Projection matrix density outside the half-open interval (0, 1].
    InvalidDensity {
        /// Offending density value.
        density: f64,
    },

    /// `n_components` was not a usable embedding dimension, either because
    /// it was explicitly zero or because the automatic target dimension
    /// does not fit in the original feature space.
    InvalidComponents {
        /// Full diagnostic, including the offending parameters.
        message: String,
    },

    /// `transform` was called before a successful `fit`.
    NotFitted,

    /// The dataset is not a usable two-dimensional numeric collection.
    InvalidInput {
        /// Description of the rejected input.
        message: String,
    },
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::InvalidDimension {
                n_components,
                n_features,
            } => {
                write!(
                    f,
                    "invalid matrix shape ({n_components}, {n_features}): both axes must be positive"
                )
            }
            ProjectionError::InvalidEpsilon { eps } => {
                write!(f, "eps={eps} is out of range: the distortion tolerance must lie in (0, 1)")
            }
            ProjectionError::InvalidDensity { density } => {
                write!(f, "density={density} is out of range: expected a value in (0, 1]")
            }
            ProjectionError::InvalidComponents { message } => write!(f, "{message}"),
            ProjectionError::NotFitted => {
                write!(f, "not fitted: call fit before transform")
            }
            ProjectionError::InvalidInput { message } => write!(f, "invalid input: {message}"),
        }
    }
}

impl std::error::Error for ProjectionError {}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, ProjectionError>;

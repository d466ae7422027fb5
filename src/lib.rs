// Random projection (Johnson-Lindenstrauss)

#![doc = include_str!("../README.md")]

pub mod dimension;
pub mod error;
pub mod matrix;
pub mod projection;
pub mod random_matrix;

pub use dimension::johnson_lindenstrauss_min_dim;
pub use error::{ProjectionError, Result};
pub use matrix::Matrix;
pub use projection::{
    BernoulliRandomProjection, Density, GaussianRandomProjection, NComponents, RandomProjection,
};
pub use random_matrix::{bernoulli_random_matrix, gaussian_random_matrix};

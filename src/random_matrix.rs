//! Random projection matrix generators.
//!
//! Both generators draw from a ChaCha8 stream seeded from the caller's
//! `random_state`, so a fixed seed reproduces the matrix bit for bit.

use log::debug;
use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use sprs::{CsMat, TriMat};

use crate::error::{ProjectionError, Result};

pub(crate) fn seeded_rng(random_state: Option<u64>) -> ChaCha8Rng {
    match random_state {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn check_shape(n_components: usize, n_features: usize) -> Result<()> {
    if n_components == 0 || n_features == 0 {
        return Err(ProjectionError::InvalidDimension {
            n_components,
            n_features,
        });
    }
    Ok(())
}

/// Dense Gaussian projection matrix of shape `(n_components, n_features)`.
///
/// Entries are drawn independently from `N(0, 1 / n_components)`, the
/// scaling that makes the projection distance-preserving in expectation.
///
/// # Errors
///
/// Returns [`ProjectionError::InvalidDimension`] when either axis is zero.
pub fn gaussian_random_matrix(
    n_components: usize,
    n_features: usize,
    random_state: Option<u64>,
) -> Result<Array2<f64>> {
    check_shape(n_components, n_features)?;
    let mut rng = seeded_rng(random_state);
    let std_dev = 1.0 / (n_components as f64).sqrt();
    let normal = Normal::new(0.0, std_dev).expect("standard deviation is positive and finite");
    debug!(
        "generating gaussian projection matrix ({} x {})",
        n_components, n_features
    );
    Ok(Array2::random_using(
        (n_components, n_features),
        normal,
        &mut rng,
    ))
}

/// Sparse Bernoulli (Achlioptas) projection matrix of shape
/// `(n_components, n_features)`, in compressed-row form.
///
/// With `s = 1 / density`, each entry independently takes the value
/// `+sqrt(s) / sqrt(n_components)` with probability `1 / 2s`,
/// `-sqrt(s) / sqrt(n_components)` with probability `1 / 2s`, and zero
/// otherwise. At `density = 1` every entry is nonzero.
///
/// # Errors
///
/// Returns [`ProjectionError::InvalidDimension`] when either axis is zero
/// and [`ProjectionError::InvalidDensity`] unless `density` lies in
/// `(0, 1]`.
pub fn bernoulli_random_matrix(
    n_components: usize,
    n_features: usize,
    density: f64,
    random_state: Option<u64>,
) -> Result<CsMat<f64>> {
    check_shape(n_components, n_features)?;
    if density <= 0.0 || density > 1.0 {
        return Err(ProjectionError::InvalidDensity { density });
    }
    let mut rng = seeded_rng(random_state);
    let s = 1.0 / density;
    let value = s.sqrt() / (n_components as f64).sqrt();
    debug!(
        "generating bernoulli projection matrix ({} x {}) at density {}",
        n_components, n_features, density
    );
    let mut triplets = TriMat::new((n_components, n_features));
    for row in 0..n_components {
        for col in 0..n_features {
            let draw: f64 = rng.gen();
            if draw < density / 2.0 {
                triplets.add_triplet(row, col, value);
            } else if draw < density {
                triplets.add_triplet(row, col, -value);
            }
        }
    }
    Ok(triplets.to_csr())
}

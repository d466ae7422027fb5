//! Gaussian and Bernoulli random projection transformers.
//!
//! Both transformers share the [`RandomProjection`] lifecycle: `fit`
//! resolves the embedding dimension (and, for the Bernoulli variant, the
//! matrix density), materializes the projection matrix once, and
//! `transform` multiplies new data against it. The generation strategy is
//! the only thing that differs between the two variants.

use log::debug;
use ndarray::Array2;
use sprs::CsMat;

use crate::dimension::johnson_lindenstrauss_min_dim;
use crate::error::{ProjectionError, Result};
use crate::matrix::Matrix;
use crate::random_matrix::{bernoulli_random_matrix, gaussian_random_matrix};

/// Requested embedding dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NComponents {
    /// Derive the dimension from the training shape via the
    /// Johnson-Lindenstrauss bound and the configured `eps`.
    Auto,
    /// Use exactly this many components.
    Fixed(usize),
}

/// Requested density of the Bernoulli projection matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Density {
    /// Use the `1 / sqrt(n_features)` heuristic.
    Auto,
    /// Use exactly this density.
    Fixed(f64),
}

/// Distortion tolerance used when `n_components` is resolved
/// automatically.
const DEFAULT_EPS: f64 = 0.5;

/// Common fit/transform lifecycle of the projection transformers.
pub trait RandomProjection {
    /// Resolves the configuration against the shape of `x`, generates the
    /// projection matrix, and stores it as fitted state.
    fn fit(&mut self, x: &Matrix) -> Result<&mut Self>;

    /// Projects `x` with the fitted matrix, computing `X . components^T`.
    fn transform(&self, x: &Matrix) -> Result<Matrix>;

    /// Fits on `x` and immediately projects it; equivalent to `fit`
    /// followed by `transform` with the same seed.
    fn fit_transform(&mut self, x: &Matrix) -> Result<Matrix> {
        self.fit(x)?;
        self.transform(x)
    }
}

fn dataset_shape(x: &Matrix) -> Result<(usize, usize)> {
    let (n_samples, n_features) = x.shape();
    if n_samples == 0 || n_features == 0 {
        return Err(ProjectionError::InvalidInput {
            message: format!(
                "expected a non-empty two-dimensional dataset, got shape ({n_samples}, {n_features})"
            ),
        });
    }
    Ok((n_samples, n_features))
}

fn resolve_n_components(
    requested: NComponents,
    eps: f64,
    n_samples: usize,
    n_features: usize,
) -> Result<usize> {
    match requested {
        NComponents::Auto => {
            let target = johnson_lindenstrauss_min_dim(n_samples, eps)?;
            if target > n_features {
                return Err(ProjectionError::InvalidComponents {
                    message: format!(
                        "eps={eps:.6} and n_samples={n_samples} lead to a target dimension \
                         of {target} which is larger than the original space with \
                         n_features={n_features}"
                    ),
                });
            }
            debug!(
                "auto-resolved n_components={} from n_samples={} at eps={}",
                target, n_samples, eps
            );
            Ok(target)
        }
        NComponents::Fixed(0) => Err(ProjectionError::InvalidComponents {
            message: "n_components must be a strictly positive integer, got 0".to_string(),
        }),
        NComponents::Fixed(n_components) => Ok(n_components),
    }
}

fn resolve_density(requested: Density, n_features: usize) -> Result<f64> {
    let density = match requested {
        Density::Auto => 1.0 / (n_features as f64).sqrt(),
        Density::Fixed(density) => density,
    };
    if density <= 0.0 || density > 1.0 {
        return Err(ProjectionError::InvalidDensity { density });
    }
    Ok(density)
}

fn check_transform_features(n_input: usize, n_fitted: usize) -> Result<()> {
    if n_input != n_fitted {
        return Err(ProjectionError::InvalidInput {
            message: format!(
                "X has {n_input} features, but the projection matrix was fitted with {n_fitted}"
            ),
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
struct GaussianState {
    components: Array2<f64>,
    n_components: usize,
}

/// Random projection through a dense Gaussian matrix.
///
/// ```
/// use ndarray::Array2;
/// use random_projection::{GaussianRandomProjection, Matrix, RandomProjection};
///
/// let data = Matrix::from(Array2::from_elem((30, 200), 1.0));
/// let mut projection = GaussianRandomProjection::new()
///     .with_n_components(10)
///     .with_random_state(0);
/// let projected = projection.fit_transform(&data)?;
/// assert_eq!(projected.shape(), (30, 10));
/// # Ok::<(), random_projection::ProjectionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GaussianRandomProjection {
    n_components: NComponents,
    eps: f64,
    random_state: Option<u64>,
    fitted: Option<GaussianState>,
}

impl Default for GaussianRandomProjection {
    fn default() -> Self {
        Self::new()
    }
}

impl GaussianRandomProjection {
    /// Unfitted transformer with automatic dimension selection at the
    /// default tolerance of 0.5.
    pub fn new() -> Self {
        Self {
            n_components: NComponents::Auto,
            eps: DEFAULT_EPS,
            random_state: None,
            fitted: None,
        }
    }

    /// Fixes the embedding dimension instead of deriving it from the data.
    pub fn with_n_components(mut self, n_components: usize) -> Self {
        self.n_components = NComponents::Fixed(n_components);
        self
    }

    /// Distortion tolerance for automatic dimension selection. Validated
    /// at fit time, and only when `n_components` is automatic.
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Seed for the projection matrix generation, making `fit`
    /// reproducible.
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Fitted projection matrix of shape `(n_components, n_features)`.
    pub fn components(&self) -> Option<&Array2<f64>> {
        self.fitted.as_ref().map(|state| &state.components)
    }

    /// Embedding dimension resolved at fit time.
    pub fn n_components(&self) -> Option<usize> {
        self.fitted.as_ref().map(|state| state.n_components)
    }

    /// Feature count seen at fit time.
    pub fn n_features(&self) -> Option<usize> {
        self.fitted.as_ref().map(|state| state.components.ncols())
    }
}

impl RandomProjection for GaussianRandomProjection {
    fn fit(&mut self, x: &Matrix) -> Result<&mut Self> {
        self.fitted = None;
        let (n_samples, n_features) = dataset_shape(x)?;
        let n_components = resolve_n_components(self.n_components, self.eps, n_samples, n_features)?;
        let components = gaussian_random_matrix(n_components, n_features, self.random_state)?;
        self.fitted = Some(GaussianState {
            components,
            n_components,
        });
        Ok(self)
    }

    fn transform(&self, x: &Matrix) -> Result<Matrix> {
        let state = self.fitted.as_ref().ok_or(ProjectionError::NotFitted)?;
        check_transform_features(x.ncols(), state.components.ncols())?;
        // The components are dense, so the product is dense for either
        // input representation.
        let projected = match x {
            Matrix::Dense(dense) => dense.dot(&state.components.t()),
            Matrix::Sparse(sparse) => sparse * &state.components.t(),
        };
        Ok(Matrix::Dense(projected))
    }
}

#[derive(Debug, Clone)]
struct BernoulliState {
    components: CsMat<f64>,
    n_components: usize,
    density: f64,
}

/// Random projection through a sparse Bernoulli (Achlioptas) matrix.
///
/// Sparse input stays sparse through `transform` unless `dense_output`
/// is set; dense input always produces dense output.
#[derive(Debug, Clone)]
pub struct BernoulliRandomProjection {
    n_components: NComponents,
    density: Density,
    eps: f64,
    dense_output: bool,
    random_state: Option<u64>,
    fitted: Option<BernoulliState>,
}

impl Default for BernoulliRandomProjection {
    fn default() -> Self {
        Self::new()
    }
}

impl BernoulliRandomProjection {
    /// Unfitted transformer with automatic dimension and density
    /// selection.
    pub fn new() -> Self {
        Self {
            n_components: NComponents::Auto,
            density: Density::Auto,
            eps: DEFAULT_EPS,
            dense_output: false,
            random_state: None,
            fitted: None,
        }
    }

    /// Fixes the embedding dimension instead of deriving it from the data.
    pub fn with_n_components(mut self, n_components: usize) -> Self {
        self.n_components = NComponents::Fixed(n_components);
        self
    }

    /// Fixes the matrix density instead of the `1 / sqrt(n_features)`
    /// heuristic. Validated at fit time.
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = Density::Fixed(density);
        self
    }

    /// Distortion tolerance for automatic dimension selection.
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Forces dense output even for sparse input.
    pub fn with_dense_output(mut self, dense_output: bool) -> Self {
        self.dense_output = dense_output;
        self
    }

    /// Seed for the projection matrix generation, making `fit`
    /// reproducible.
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Fitted projection matrix of shape `(n_components, n_features)`.
    pub fn components(&self) -> Option<&CsMat<f64>> {
        self.fitted.as_ref().map(|state| &state.components)
    }

    /// Embedding dimension resolved at fit time.
    pub fn n_components(&self) -> Option<usize> {
        self.fitted.as_ref().map(|state| state.n_components)
    }

    /// Matrix density resolved at fit time.
    pub fn density(&self) -> Option<f64> {
        self.fitted.as_ref().map(|state| state.density)
    }

    /// Feature count seen at fit time.
    pub fn n_features(&self) -> Option<usize> {
        self.fitted.as_ref().map(|state| state.components.cols())
    }
}

impl RandomProjection for BernoulliRandomProjection {
    fn fit(&mut self, x: &Matrix) -> Result<&mut Self> {
        self.fitted = None;
        let (n_samples, n_features) = dataset_shape(x)?;
        let n_components = resolve_n_components(self.n_components, self.eps, n_samples, n_features)?;
        let density = resolve_density(self.density, n_features)?;
        debug!(
            "fitting bernoulli projection with n_components={} at density {}",
            n_components, density
        );
        let components =
            bernoulli_random_matrix(n_components, n_features, density, self.random_state)?;
        self.fitted = Some(BernoulliState {
            components,
            n_components,
            density,
        });
        Ok(self)
    }

    fn transform(&self, x: &Matrix) -> Result<Matrix> {
        let state = self.fitted.as_ref().ok_or(ProjectionError::NotFitted)?;
        check_transform_features(x.ncols(), state.components.cols())?;
        match x {
            // Dense input always projects to a dense array. The product is
            // taken as (P . X^T)^T to keep the sparse operand on the left.
            Matrix::Dense(dense) => {
                let projected = &state.components * &dense.t();
                Ok(Matrix::Dense(projected.t().to_owned()))
            }
            Matrix::Sparse(sparse) => {
                let components_t: CsMat<f64> = state.components.transpose_view().to_csr();
                let projected = sparse * &components_t;
                if self.dense_output {
                    Ok(Matrix::Dense(projected.to_dense()))
                } else {
                    Ok(Matrix::Sparse(projected))
                }
            }
        }
    }
}

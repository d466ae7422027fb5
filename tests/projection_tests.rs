// End-to-end behaviour of the random projection transformers: automatic
// sizing, determinism, output representation, and the distance
// preservation contract.

use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use random_projection::{
    BernoulliRandomProjection, GaussianRandomProjection, Matrix, RandomProjection,
};
use sprs::{CsMat, TriMat};

/// Random data with uniformly located nonzero entries and
/// normally-distributed values, returned as dense and CSR twins of the
/// same content.
fn make_sparse_random_data(
    n_samples: usize,
    n_features: usize,
    n_nonzeros: usize,
) -> (Matrix, Matrix) {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut triplets = TriMat::new((n_samples, n_features));
    for _ in 0..n_nonzeros {
        let row = rng.gen_range(0..n_samples);
        let col = rng.gen_range(0..n_features);
        let value: f64 = rng.sample(StandardNormal);
        triplets.add_triplet(row, col, value);
    }
    let csr: CsMat<f64> = triplets.to_csr();
    (Matrix::from(csr.to_dense()), Matrix::from(csr))
}

/// All pairwise squared Euclidean distances, row against row.
fn squared_pairwise_distances(data: &Array2<f64>) -> Vec<f64> {
    let n_samples = data.nrows();
    let mut distances = Vec::with_capacity(n_samples * n_samples);
    for i in 0..n_samples {
        for j in 0..n_samples {
            let difference = &data.row(i) - &data.row(j);
            distances.push(difference.dot(&difference));
        }
    }
    distances
}

fn check_embedding_quality<P: RandomProjection>(projection: &mut P, data: &Matrix, eps: f64) {
    let original = squared_pairwise_distances(&data.to_dense());
    let projected = projection.fit_transform(data).unwrap();
    let projected = squared_pairwise_distances(&projected.to_dense());

    for (pair, (&original_sq, &projected_sq)) in
        original.iter().zip(projected.iter()).enumerate()
    {
        // Zero distances are the diagonal and exactly coincident rows;
        // the ratio is undefined there.
        if original_sq == 0.0 {
            continue;
        }
        let ratio = projected_sq / original_sq;
        assert!(
            ratio < 1.0 + eps,
            "pair {pair}: squared distance ratio {ratio} above 1 + eps"
        );
        assert!(
            ratio > 1.0 - eps,
            "pair {pair}: squared distance ratio {ratio} below 1 - eps"
        );
    }
}

#[test]
fn projections_preserve_pairwise_distances_within_eps() {
    let (dense, _) = make_sparse_random_data(8, 5000, 15000);
    let eps = 0.3;

    let mut gaussian = GaussianRandomProjection::new()
        .with_eps(eps)
        .with_random_state(0);
    check_embedding_quality(&mut gaussian, &dense, eps);

    let mut bernoulli = BernoulliRandomProjection::new()
        .with_eps(eps)
        .with_random_state(0);
    check_embedding_quality(&mut bernoulli, &dense, eps);
}

#[test]
fn auto_sized_gaussian_resolves_from_the_training_shape() {
    let (dense, _) = make_sparse_random_data(10, 1000, 100);

    let mut projection = GaussianRandomProjection::new().with_random_state(0);
    projection.fit(&dense).unwrap();
    assert_eq!(projection.n_components(), Some(110));
    assert_eq!(projection.components().unwrap().dim(), (110, 1000));

    let projected_1 = projection.transform(&dense).unwrap();
    assert_eq!(projected_1.shape(), (10, 110));

    // Once fitted, the projection never re-randomizes.
    let projected_2 = projection.transform(&dense).unwrap();
    assert_eq!(projected_1, projected_2);

    // fit_transform with the same seed reproduces the same embedding.
    let mut chained = GaussianRandomProjection::new().with_random_state(0);
    let projected_3 = chained.fit_transform(&dense).unwrap();
    assert_eq!(projected_1, projected_3);
}

#[test]
fn auto_sized_bernoulli_resolves_dimension_and_density() {
    let (dense, _) = make_sparse_random_data(10, 1000, 100);

    let mut projection = BernoulliRandomProjection::new().with_random_state(0);
    projection.fit(&dense).unwrap();
    assert_eq!(projection.n_components(), Some(110));
    let density = projection.density().unwrap();
    assert!(
        (density - 0.03).abs() < 0.01,
        "density {density} should resolve to about 1/sqrt(1000)"
    );
    let components = projection.components().unwrap();
    assert_eq!((components.rows(), components.cols()), (110, 1000));

    let projected_1 = projection.transform(&dense).unwrap();
    assert_eq!(projected_1.shape(), (10, 110));
    let projected_2 = projection.transform(&dense).unwrap();
    assert_eq!(projected_1, projected_2);

    let mut chained = BernoulliRandomProjection::new().with_random_state(0);
    let projected_3 = chained.fit_transform(&dense).unwrap();
    assert_eq!(projected_1, projected_3);
}

#[test]
fn bernoulli_output_representation_matches_the_configuration() {
    let (dense, sparse) = make_sparse_random_data(10, 1000, 100);

    // Sparse input can be forced to a dense result.
    let mut forced_dense = BernoulliRandomProjection::new()
        .with_n_components(10)
        .with_dense_output(true)
        .with_random_state(0);
    forced_dense.fit(&dense).unwrap();
    assert!(forced_dense.transform(&dense).unwrap().is_dense());
    assert!(forced_dense.transform(&sparse).unwrap().is_dense());

    // Left alone, the output representation follows the input.
    let mut kept_sparse = BernoulliRandomProjection::new()
        .with_n_components(10)
        .with_random_state(0);
    kept_sparse.fit(&dense).unwrap();
    assert!(kept_sparse.transform(&dense).unwrap().is_dense());
    assert!(kept_sparse.transform(&sparse).unwrap().is_sparse());
}

#[test]
fn gaussian_output_is_dense_for_sparse_input() {
    let (dense, sparse) = make_sparse_random_data(10, 1000, 100);

    let mut projection = GaussianRandomProjection::new()
        .with_n_components(10)
        .with_random_state(0);
    projection.fit(&dense).unwrap();
    assert!(projection.transform(&dense).unwrap().is_dense());
    assert!(projection.transform(&sparse).unwrap().is_dense());
}

#[test]
fn fixed_components_and_density_are_respected() {
    let (dense, _) = make_sparse_random_data(10, 1000, 100);

    let mut projection = BernoulliRandomProjection::new()
        .with_n_components(100)
        .with_density(0.001)
        .with_random_state(0);
    let projected = projection.fit_transform(&dense).unwrap();
    assert_eq!(projected.shape(), (10, 100));

    let components = projection.components().unwrap();
    assert_eq!((components.rows(), components.cols()), (100, 1000));

    // 100_000 entries at density 0.001 store about 100 values.
    let nnz = components.nnz();
    assert!(nnz > 50 && nnz < 150, "nnz {nnz} far from the expected 100");
}

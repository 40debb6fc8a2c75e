//! Vector algebra helpers: Gram–Schmidt orthogonalization.

use nalgebra::DVector;

/// Orthogonalize a family of vectors with the Gram–Schmidt process.
///
/// The result spans the same space as the input and its members are pairwise
/// orthogonal. Linearly dependent inputs come out as zero vectors, which
/// later steps skip as projection targets.
pub fn orthogonalize(vectors: &[DVector<f64>]) -> Vec<DVector<f64>> {
    let mut basis: Vec<DVector<f64>> = Vec::with_capacity(vectors.len());

    for vector in vectors {
        let mut next = vector.clone();

        for previous in &basis {
            let norm_squared = previous.dot(previous);
            if norm_squared > 0.0 {
                next -= previous * (vector.dot(previous) / norm_squared);
            }
        }

        basis.push(next);
    }

    basis
}

/// [`orthogonalize`], then scale every non-zero vector to unit length.
pub fn orthonormalize(vectors: &[DVector<f64>]) -> Vec<DVector<f64>> {
    orthogonalize(vectors)
        .into_iter()
        .map(|vector| {
            let norm = vector.norm();
            if norm > 0.0 {
                vector / norm
            } else {
                vector
            }
        })
        .collect()
}

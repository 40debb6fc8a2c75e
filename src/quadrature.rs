//! Numeric quadrature over plain callables.
//!
//! These routines know nothing about expression trees; a symbolic function
//! can participate by wrapping itself in a closure (see
//! [`Function::evaluate_at`](crate::Function::evaluate_at)).

/// Approximate `∫ f dx` over `segment` with left Riemann sums of width `dx`.
///
/// A reversed segment (`a > b`) negates the result, matching the usual
/// orientation convention for integrals.
pub fn riemann<F>(f: F, segment: (f64, f64), dx: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    riemann_stieltjes(f, |x| x, segment, dx)
}

/// Approximate the Riemann–Stieltjes integral `∫ f dg` over `segment`,
/// stepping the integrand every `dx`.
///
/// With `g(x) = x` this reduces to the plain Riemann sum. A step size that
/// isn't strictly positive can't advance through the segment, so it yields an
/// empty sum.
pub fn riemann_stieltjes<F, G>(f: F, g: G, segment: (f64, f64), dx: f64) -> f64
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
    if !(dx > 0.0) {
        return 0.0;
    }

    let (mut a, mut b) = segment;
    let sign = if a > b {
        std::mem::swap(&mut a, &mut b);
        -1.0
    } else {
        1.0
    };

    let mut sum = 0.0;
    let mut x = a;
    while x < b {
        let step = dx.min(b - x);
        sum += f(x) * (g(x + step) - g(x));
        x += step;
    }

    sign * sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DX: f64 = 1e-5;

    #[test]
    fn integral_of_the_identity() {
        let got = riemann(|x| x, (0.0, 1.0), DX);
        assert_relative_eq!(got, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn integral_of_sine_over_a_half_period() {
        let got = riemann(f64::sin, (0.0, std::f64::consts::PI), DX);
        assert_relative_eq!(got, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn a_degenerate_step_size_yields_an_empty_sum() {
        for dx in vec![0.0, -1.0, std::f64::NAN] {
            assert_eq!(riemann(|x| x, (0.0, 1.0), dx), 0.0, "dx = {}", dx);
        }
    }

    #[test]
    fn a_reversed_segment_negates_the_result() {
        let forward = riemann(|x| x * x, (0.0, 1.0), DX);
        let backward = riemann(|x| x * x, (1.0, 0.0), DX);
        assert_relative_eq!(forward, -backward, epsilon = 1e-12);
    }

    #[test]
    fn stieltjes_against_a_linear_integrator_is_riemann() {
        let plain = riemann(f64::cos, (0.0, 1.0), DX);
        let stieltjes = riemann_stieltjes(f64::cos, |x| x, (0.0, 1.0), DX);
        assert_relative_eq!(plain, stieltjes, epsilon = 1e-9);
    }

    #[test]
    fn stieltjes_with_a_quadratic_integrator() {
        // ∫ x d(x²) = ∫ 2x² dx = 2/3 over [0, 1]
        let got = riemann_stieltjes(|x| x, |x| x * x, (0.0, 1.0), DX);
        assert_relative_eq!(got, 2.0 / 3.0, epsilon = 1e-4);
    }

    #[test]
    fn a_symbolic_function_is_a_plain_callable() {
        use crate::{registry::Registry, Function};

        let registry = Registry::new();
        let x = registry.variable("x");
        let f = Function::new("f", vec![x.clone()], &x * &x);

        let got = riemann(
            |x| f.evaluate_at(x).unwrap().as_real().unwrap(),
            (0.0, 1.0),
            1e-4,
        );
        assert_relative_eq!(got, 1.0 / 3.0, epsilon = 1e-3);
    }
}

// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Property-Based Tests (proptest) for pde-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for pde-math using proptest.
//!
//! Covers: binomial identities, library size block structure,
//! uniform and Latin hypercube sampling bounds.

use pde_math::combinatorics::{binomial, block_offsets, block_size, total_indices};
use pde_math::sampling::{latin_hypercube, uniform_points, Bounds};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Binomial Identities ──────────────────────────────────────────────

proptest! {
    /// Pascal's rule: C(n, k) = C(n-1, k-1) + C(n-1, k).
    #[test]
    fn binomial_pascal_rule(n in 1usize..60, k in 1usize..60) {
        let lhs = binomial(n, k).unwrap();
        let rhs = binomial(n - 1, k - 1).unwrap() + binomial(n - 1, k).unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    /// Symmetry: C(n, k) = C(n, n-k).
    #[test]
    fn binomial_symmetry(n in 0usize..60, k_frac in 0.0f64..=1.0) {
        let k = ((n as f64) * k_frac) as usize;
        prop_assert_eq!(binomial(n, k).unwrap(), binomial(n, n - k).unwrap());
    }
}

// ── Library Size ─────────────────────────────────────────────────────

proptest! {
    /// Offsets are the running sum of block sizes and end at the total.
    #[test]
    fn offsets_accumulate_block_sizes(v in 1usize..12, d in 0usize..6) {
        let offsets = block_offsets(v, d).unwrap();
        prop_assert_eq!(offsets.len(), d + 2);
        prop_assert_eq!(offsets[0], 0);
        for l in 0..=d {
            prop_assert_eq!(offsets[l + 1] - offsets[l], block_size(v, l).unwrap());
        }
        prop_assert_eq!(offsets[d + 1], total_indices(v, d).unwrap());
    }

    /// Hockey-stick identity: Σ_{L=0}^{D} C(V+L-1, L) = C(V+D, D).
    #[test]
    fn total_indices_hockey_stick(v in 1usize..15, d in 0usize..8) {
        prop_assert_eq!(total_indices(v, d).unwrap(), binomial(v + d, d).unwrap());
    }

    /// A single sub-index value gives exactly one term per length.
    #[test]
    fn single_value_library(d in 0usize..20) {
        prop_assert_eq!(total_indices(1, d).unwrap(), d + 1);
    }
}

// ── Sampling ─────────────────────────────────────────────────────────

proptest! {
    /// Uniform points never leave the box.
    #[test]
    fn uniform_points_inside(
        seed in 0u64..1000,
        n in 1usize..200,
        t_max in 0.1f64..10.0,
        x_half in 0.1f64..10.0,
    ) {
        let bounds = Bounds::new(vec![[0.0, t_max], [-x_half, x_half]]).unwrap();
        let pts = uniform_points(&bounds, n, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(pts.dim(), (n, 2));
        for row in pts.outer_iter() {
            prop_assert!(row[0] >= 0.0 && row[0] <= t_max);
            prop_assert!(row[1] >= -x_half && row[1] <= x_half);
        }
    }

    /// Latin hypercube points never leave the box.
    #[test]
    fn latin_hypercube_inside(seed in 0u64..1000, n in 1usize..200) {
        let bounds = Bounds::new(vec![[0.0, 1.0], [-1.0, 1.0], [2.0, 3.0]]).unwrap();
        let pts = latin_hypercube(&bounds, n, &mut StdRng::seed_from_u64(seed));
        for row in pts.outer_iter() {
            prop_assert!(bounds.contains(&row.to_vec()));
        }
    }
}

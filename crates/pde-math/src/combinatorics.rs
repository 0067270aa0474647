// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Library Size Combinatorics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Exact counts of candidate library terms.
//!
//! A term of length L over V sub-index values is a multiset, so the number of
//! terms of that length is the multiset coefficient C(V+L-1, L). All counts
//! are exact integers; overflow is reported, never wrapped.

use pde_types::error::{PdeError, PdeResult};

/// Binomial coefficient C(n, k) in exact integer arithmetic.
///
/// Uses the multiplicative form; every partial product is itself a binomial
/// coefficient, so each division is exact.
pub fn binomial(n: usize, k: usize) -> PdeResult<usize> {
    if k > n {
        return Ok(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc
            .checked_mul((n - i) as u128)
            .ok_or_else(|| PdeError::Overflow(format!("C({n}, {k}) exceeds u128")))?
            / (i as u128 + 1);
    }
    usize::try_from(acc)
        .map_err(|_| PdeError::Overflow(format!("C({n}, {k}) = {acc} exceeds usize")))
}

/// Number of non-decreasing sequences of length `length` over `num_values` values.
pub fn block_size(num_values: usize, length: usize) -> PdeResult<usize> {
    if num_values == 0 {
        return Err(PdeError::Precondition(
            "library requires at least one sub-index value".to_string(),
        ));
    }
    binomial(num_values + length - 1, length)
}

/// Total number of library columns with at most `max_degree` factors.
pub fn total_indices(num_values: usize, max_degree: usize) -> PdeResult<usize> {
    let offsets = block_offsets(num_values, max_degree)?;
    Ok(offsets[max_degree + 1])
}

/// Cumulative block offsets, length `max_degree + 2`.
///
/// `offsets[l]` is the first column holding a term of length `l`;
/// the last entry is the total column count.
pub fn block_offsets(num_values: usize, max_degree: usize) -> PdeResult<Vec<usize>> {
    let mut offsets = Vec::with_capacity(max_degree + 2);
    offsets.push(0usize);
    let mut running = 0usize;
    for length in 0..=max_degree {
        let size = block_size(num_values, length)?;
        running = running.checked_add(size).ok_or_else(|| {
            PdeError::Overflow(format!(
                "library size for V={num_values}, D={max_degree} exceeds usize"
            ))
        })?;
        offsets.push(running);
    }
    Ok(offsets)
}

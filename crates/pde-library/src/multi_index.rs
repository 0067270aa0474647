// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Multi-Index Enumerator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Rank/unrank bijection between library column numbers and multi-indices.
//!
//! Columns are grouped by term length L = 0, 1, ..., D. Inside a length block
//! the non-decreasing tuples appear in lexicographic order, e.g. for V = 3:
//!
//! ```text
//! 0: ()   1: (0)   2: (1)   3: (2)
//! 4: (0,0)  5: (0,1)  6: (0,2)  7: (1,1)  8: (1,2)  9: (2,2)
//! ```
//!
//! Only the block offset table is stored. Unranking peels one value at a
//! time: the number of completions that start with value `a` and have `r`
//! further positions is the multiset count C((V-a)+r-1, r).

use pde_math::combinatorics::{block_offsets, block_size};
use pde_types::error::{PdeError, PdeResult};
use std::ops::Range;

/// Non-decreasing sequence of sub-index values; one library term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MultiIndex(Vec<usize>);

impl MultiIndex {
    pub fn values(&self) -> &[usize] {
        &self.0
    }

    /// Number of derivative factors in the term.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The empty multi-index is the constant-one term.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[usize]> for MultiIndex {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiIndexEnumerator {
    num_values: usize,
    max_degree: usize,
    /// `offsets[l]` = first column of length `l`; `offsets[max_degree + 1]` = total.
    offsets: Vec<usize>,
}

impl MultiIndexEnumerator {
    pub fn new(num_values: usize, max_degree: usize) -> PdeResult<Self> {
        let offsets = block_offsets(num_values, max_degree)?;
        Ok(Self {
            num_values,
            max_degree,
            offsets,
        })
    }

    /// V
    pub fn num_values(&self) -> usize {
        self.num_values
    }

    /// D
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    pub fn total_indices(&self) -> usize {
        self.offsets[self.max_degree + 1]
    }

    /// Columns holding terms with exactly `length` factors.
    pub fn block_range(&self, length: usize) -> PdeResult<Range<usize>> {
        if length > self.max_degree {
            return Err(PdeError::MultiIndexInvalid(format!(
                "length {length} exceeds maximum term degree {}",
                self.max_degree
            )));
        }
        Ok(self.offsets[length]..self.offsets[length + 1])
    }

    pub fn unrank(&self, column: usize) -> PdeResult<MultiIndex> {
        let mut values = Vec::with_capacity(self.max_degree);
        self.unrank_into(column, &mut values)?;
        Ok(MultiIndex(values))
    }

    /// Writes the multi-index of `column` into `out`, replacing its contents.
    pub fn unrank_into(&self, column: usize, out: &mut Vec<usize>) -> PdeResult<()> {
        let total = self.total_indices();
        if column >= total {
            return Err(PdeError::ColumnOutOfRange { column, total });
        }
        out.clear();

        let mut length = 0;
        while column >= self.offsets[length + 1] {
            length += 1;
        }
        let mut residual = column - self.offsets[length];

        let mut lo = 0;
        for remaining in (0..length).rev() {
            let mut a = lo;
            loop {
                let completions = block_size(self.num_values - a, remaining)?;
                if residual < completions {
                    break;
                }
                residual -= completions;
                a += 1;
            }
            out.push(a);
            lo = a;
        }
        Ok(())
    }

    /// Column number of a multiset of sub-index values, in any order.
    pub fn rank(&self, values: &[usize]) -> PdeResult<usize> {
        if values.len() > self.max_degree {
            return Err(PdeError::MultiIndexInvalid(format!(
                "{} factors exceed maximum term degree {}",
                values.len(),
                self.max_degree
            )));
        }
        if let Some(&value) = values.iter().find(|&&v| v >= self.num_values) {
            return Err(PdeError::SubIndexOutOfRange {
                value,
                num_values: self.num_values,
            });
        }

        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        let length = sorted.len();

        let mut column = self.offsets[length];
        let mut lo = 0;
        for (pos, &v) in sorted.iter().enumerate() {
            let remaining = length - pos - 1;
            for a in lo..v {
                column += block_size(self.num_values - a, remaining)?;
            }
            lo = v;
        }
        Ok(column)
    }
}

/// Column → multi-index table, built once per run.
///
/// The loss and the equation renderer both read terms from this table so
/// they always agree on what a coefficient means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTable {
    enumerator: MultiIndexEnumerator,
    columns: Vec<MultiIndex>,
}

impl ColumnTable {
    pub fn build(enumerator: MultiIndexEnumerator) -> PdeResult<Self> {
        let columns = (0..enumerator.total_indices())
            .map(|column| enumerator.unrank(column))
            .collect::<PdeResult<Vec<_>>>()?;
        Ok(Self {
            enumerator,
            columns,
        })
    }

    pub fn enumerator(&self) -> &MultiIndexEnumerator {
        &self.enumerator
    }

    /// Library column count (Xi has one more component).
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, column: usize) -> PdeResult<&MultiIndex> {
        self.columns.get(column).ok_or(PdeError::ColumnOutOfRange {
            column,
            total: self.columns.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &MultiIndex)> + '_ {
        self.columns.iter().enumerate()
    }
}

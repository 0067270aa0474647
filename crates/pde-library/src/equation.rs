// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Equation Renderer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Human-readable form of the PDE encoded by Xi.

use crate::multi_index::ColumnTable;
use crate::sub_index::{SpatialDerivative, SubIndexUniverse};
use ndarray::Array1;
use pde_types::error::{PdeError, PdeResult};
use pde_types::state::SpatialDimensions;
use std::fmt;

/// One non-zero term of the discovered equation.
#[derive(Debug, Clone, PartialEq)]
pub struct EquationTerm {
    /// Library column, or `None` for the trailing constant offset.
    pub column: Option<usize>,
    pub coefficient: f64,
    pub factors: Vec<SpatialDerivative>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredEquation {
    dimensions: SpatialDimensions,
    terms: Vec<EquationTerm>,
}

impl DiscoveredEquation {
    /// Collect every term with a coefficient that is not exactly zero.
    pub fn from_coefficients(
        xi: &Array1<f64>,
        columns: &ColumnTable,
        universe: &SubIndexUniverse,
    ) -> PdeResult<Self> {
        if xi.len() != columns.len() + 1 {
            return Err(PdeError::ShapeMismatch(format!(
                "Xi has {} components, expected {} library terms + 1 offset",
                xi.len(),
                columns.len()
            )));
        }

        let mut terms = Vec::new();
        for (column, multi_index) in columns.iter() {
            let coefficient = xi[column];
            if coefficient == 0.0 {
                continue;
            }
            let factors = multi_index
                .values()
                .iter()
                .map(|&v| universe.descriptor(v))
                .collect::<PdeResult<Vec<_>>>()?;
            terms.push(EquationTerm {
                column: Some(column),
                coefficient,
                factors,
            });
        }

        let offset = xi[columns.len()];
        if offset != 0.0 {
            terms.push(EquationTerm {
                column: None,
                coefficient: offset,
                factors: Vec::new(),
            });
        }

        Ok(Self {
            dimensions: universe.dimensions(),
            terms,
        })
    }

    pub fn terms(&self) -> &[EquationTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// `(D_x^2 U)`, `(D_y^1 U)`, `(D_x^1 D_y^2 U)`; order zero is `(U)`.
pub fn factor_label(derivative: SpatialDerivative, dimensions: SpatialDimensions) -> String {
    let SpatialDerivative { x, y } = derivative;
    match (dimensions, x, y) {
        (_, 0, 0) => "(U)".to_string(),
        (SpatialDimensions::One, _, _) => format!("(D_x^{x} U)"),
        (SpatialDimensions::Two, 0, _) => format!("(D_y^{y} U)"),
        (SpatialDimensions::Two, _, 0) => format!("(D_x^{x} U)"),
        (SpatialDimensions::Two, _, _) => format!("(D_x^{x} D_y^{y} U)"),
    }
}

impl fmt::Display for DiscoveredEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "D_t U = ")?;
        for term in &self.terms {
            let sign = if term.coefficient < 0.0 { '-' } else { '+' };
            write!(f, "{sign} {:7.4}", term.coefficient.abs())?;
            match term.column {
                // Empty multi-index: the library's constant column.
                Some(_) if term.factors.is_empty() => write!(f, "(1)")?,
                Some(_) => {
                    for &factor in &term.factors {
                        write!(f, "{}", factor_label(factor, self.dimensions))?;
                    }
                }
                None => {}
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

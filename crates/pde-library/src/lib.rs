// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — PDE Library
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Candidate-term library engine.
//!
//! Sub-index universe, multi-index enumeration, term assembly and the
//! collocation / data / sparsity losses used to discover D_t u = Θ(u) Xi.

pub mod collocation;
pub mod derivatives;
pub mod equation;
pub mod loss;
pub mod multi_index;
pub mod sub_index;
pub mod surrogate;

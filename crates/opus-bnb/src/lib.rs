// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! OPUS-BnB: optimistic top-k search over refinement lattices
//!
//! Finds the `k` highest-valued candidates of a search space that is spanned
//! by refinement operators, without enumerating it. The engine explores a
//! non-redundant search tree (every candidate reachable by a set of operators
//! is generated once) and prunes with admissible optimistic estimators.
//!
//! Core flow
//! - Describe the problem with an `opus::OpusSearchBuilder`: a root (or a base
//!   candidate for singleton roots), the operator table, a target function,
//!   one or more optimistic estimators and optional pruning rules.
//! - Pick an `config::OpusConfig`: `k`, the approximation factor `alpha`, an
//!   optional depth limit, the operator distribution order and the traversal
//!   order.
//! - Call `OpusSearch::solve` with a monitor and read the `result::OpusOutcome`.
//!
//! Assumptions and guarantees
//! - Operators are pure and commutative on the candidate space.
//! - Estimators are admissible: never below the best value of a candidate or
//!   any of its refinements. Under that assumption, a run that ends with
//!   `SearchExhausted` or `BoundReached` and `alpha == 1` returns the exact
//!   top-k. With `alpha < 1` every returned value is at least `alpha` times
//!   the true k-th best.
//! - Deterministic given deterministic callbacks.
//!
//! Module map
//! - `opus`: the engine, its builder and the search session.
//! - `config`: search configuration and its builder.
//! - `operator`: operator indices, operator sets and the operator trait.
//! - `eval`: target function, estimator and pruning rule traits.
//! - `node`: search tree nodes.
//! - `frontier`: open lists for each traversal order.
//! - `traverse`: traversal orders.
//! - `distribution`: operator distribution among siblings.
//! - `pruning`: the bound and rule checks.
//! - `top_k`: the bounded result set.
//! - `monitor`: tree-search monitors (log, node limit, composite, wrappers).
//! - `result`: outcomes with termination reasons.
//! - `stats`: counters and timing.
//! - `error`: configuration errors.

pub mod config;
pub mod distribution;
pub mod error;
pub mod eval;
pub mod frontier;
pub mod monitor;
pub mod node;
pub mod operator;
pub mod opus;
pub mod pruning;
pub mod result;
pub mod stats;
pub mod top_k;
pub mod traverse;

//! Boolean composition of filter results.
//!
//! A [`SerialChainFilter`] combines the bitsets of an ordered list of
//! child filters with a parallel operator sequence. `Not` is a unary
//! prefix on the operand that follows it in the operator queue, not a
//! binary operator paired 1:1 with filters. Evaluation first normalizes
//! the `(filters, operators)` pair into `(operand, negate)` terms plus a
//! purely binary operator list, which removes the index-skew bug class
//! of walking both sequences with independent cursors.

use geosift_core::error::Result;
use serde::{Deserialize, Serialize};

use crate::bitset::BitSet;
use crate::ports::{Filter, IndexReader};

/// Boolean operator combining (or negating) filter results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainOp {
    And,
    Or,
    Xor,
    /// Unary: negates the single adjacent operand before any binary
    /// combination.
    Not,
}

/// Composes child filters (spatial filters or nested chains) into one
/// bitset.
pub struct SerialChainFilter {
    filters: Vec<Box<dyn Filter>>,
    operators: Vec<ChainOp>,
}

/// One normalized operand: which filter, and whether a `Not` was attached
/// to it.
struct Term {
    index: usize,
    negate: bool,
}

impl SerialChainFilter {
    /// Combine filters with every operator defaulting to `Or`.
    pub fn new(filters: Vec<Box<dyn Filter>>) -> Self {
        Self {
            filters,
            operators: Vec::new(),
        }
    }

    /// Combine filters with an explicit operator sequence.
    ///
    /// No length validation is performed: missing trailing operators
    /// default to `Or` during evaluation (inherited leniency, see
    /// DESIGN.md).
    pub fn with_operators(filters: Vec<Box<dyn Filter>>, operators: Vec<ChainOp>) -> Self {
        Self { filters, operators }
    }

    /// The operator sequence as supplied.
    pub fn operators(&self) -> &[ChainOp] {
        &self.operators
    }

    /// Number of child filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True when the chain has no child filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Consume `Not` tokens and attach them to the operand that follows,
    /// leaving only binary operators between consecutive terms.
    ///
    /// The first term takes an optional leading `Not`; every later term
    /// takes an optional `Not` and then one binary operator (`Or` when
    /// the queue is exhausted).
    fn normalize(&self) -> (Vec<Term>, Vec<ChainOp>) {
        let mut terms = Vec::with_capacity(self.filters.len());
        let mut binary = Vec::new();
        let mut ops = self.operators.iter().copied();
        let mut pending = ops.next();

        for index in 0..self.filters.len() {
            // An operand's Not precedes its combining operator in the
            // queue.
            let negate = pending == Some(ChainOp::Not);
            if negate {
                pending = ops.next();
            }

            if index > 0 {
                let op = match pending {
                    Some(ChainOp::And) => ChainOp::And,
                    Some(ChainOp::Xor) => ChainOp::Xor,
                    // Anything else, including an exhausted queue,
                    // combines with Or.
                    _ => ChainOp::Or,
                };
                pending = ops.next();
                binary.push(op);
            }

            terms.push(Term { index, negate });
        }

        (terms, binary)
    }

    /// Evaluate one normalized term, flipping over the full document-id
    /// range when negated.
    fn term_bits(&self, term: &Term, reader: &dyn IndexReader) -> Result<BitSet> {
        let mut bits = self.filters[term.index].bits(reader)?;
        if term.negate {
            let mut full = BitSet::with_capacity(reader.max_doc());
            full.union_with(&bits);
            full.flip_all();
            bits = full;
        }
        Ok(bits)
    }
}

impl Filter for SerialChainFilter {
    /// Child errors, including index I/O failures, propagate unchanged;
    /// there is no per-document tolerance at this layer.
    fn bits(&self, reader: &dyn IndexReader) -> Result<BitSet> {
        let (terms, binary) = self.normalize();

        let mut terms = terms.iter();
        let mut result = match terms.next() {
            Some(first) => self.term_bits(first, reader)?,
            None => return Ok(BitSet::with_capacity(reader.max_doc())),
        };

        for (term, op) in terms.zip(binary) {
            let bits = self.term_bits(term, reader)?;
            match op {
                ChainOp::And => result.intersect_with(&bits),
                ChainOp::Xor => result.symmetric_difference_with(&bits),
                ChainOp::Or | ChainOp::Not => result.union_with(&bits),
            }
        }

        Ok(result)
    }
}

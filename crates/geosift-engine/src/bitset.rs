//! Fixed-capacity document bitset.
//!
//! Word-packed over `u64`, indexed by document id. Binary combinations
//! over mismatched capacities extend to the larger one; `flip_all` stays
//! inside the capacity so padding bits in the last word never leak into
//! `count_ones` or iteration.

/// A fixed-size bit array indexed by document id. Bit set = document
/// matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSet {
    words: Vec<u64>,
    len: usize,
}

impl BitSet {
    /// Create an empty bitset able to hold `len` document ids.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            words: vec![0u64; len.div_ceil(64)],
            len,
        }
    }

    /// Number of document ids this set covers.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no bit is set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Set the bit for `id`, growing the capacity if needed.
    pub fn insert(&mut self, id: usize) {
        if id >= self.len {
            self.grow(id + 1);
        }
        self.words[id / 64] |= 1u64 << (id % 64);
    }

    /// Whether the bit for `id` is set.
    pub fn contains(&self, id: usize) -> bool {
        if id >= self.len {
            return false;
        }
        self.words[id / 64] & (1u64 << (id % 64)) != 0
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Flip every bit over the full document-id range `0..len`.
    pub fn flip_all(&mut self) {
        for word in &mut self.words {
            *word = !*word;
        }
        self.clear_padding();
    }

    /// Bitwise intersection with `other` (AND).
    pub fn intersect_with(&mut self, other: &BitSet) {
        self.align_to(other);
        for (word, o) in self.words.iter_mut().zip(padded(other, self.len)) {
            *word &= o;
        }
    }

    /// Bitwise union with `other` (OR).
    pub fn union_with(&mut self, other: &BitSet) {
        self.align_to(other);
        for (word, o) in self.words.iter_mut().zip(padded(other, self.len)) {
            *word |= o;
        }
    }

    /// Bitwise symmetric difference with `other` (XOR).
    pub fn symmetric_difference_with(&mut self, other: &BitSet) {
        self.align_to(other);
        for (word, o) in self.words.iter_mut().zip(padded(other, self.len)) {
            *word ^= o;
        }
    }

    /// Iterate set bits in ascending document-id order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, word)| {
            (0..64)
                .filter(move |bit| word & (1u64 << bit) != 0)
                .map(move |bit| i * 64 + bit)
        })
    }

    fn grow(&mut self, len: usize) {
        self.words.resize(len.div_ceil(64), 0);
        self.len = len;
    }

    fn align_to(&mut self, other: &BitSet) {
        if other.len > self.len {
            self.grow(other.len);
        }
    }

    /// Zero the bits beyond `len` in the last word.
    fn clear_padding(&mut self) {
        let tail = self.len % 64;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << tail) - 1;
            }
        }
    }
}

impl FromIterator<usize> for BitSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut bits = BitSet::default();
        for id in iter {
            bits.insert(id);
        }
        bits
    }
}

/// Words of `other` padded with zeros out to `len` bits.
fn padded(other: &BitSet, len: usize) -> impl Iterator<Item = u64> + '_ {
    other
        .words
        .iter()
        .copied()
        .chain(std::iter::repeat(0))
        .take(len.div_ceil(64))
}

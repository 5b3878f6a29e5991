/// A packed row of a [`crate::GF2Matrix`]. This is an alias for [`u64`]
pub type Word = u64;

/// Number of bits in a [`Word`], which is also the largest allowed number of rows or columns
pub const WORD_BITS: usize = 64;

/// Returns a [`Word`] with the lowest `bits` bits set to one and the rest set to zero.
///
/// # Arguments
///
/// * `bits` - The number of low bits to keep, at most [`WORD_BITS`].
///
/// # Returns
///
/// The mask selecting the first `bits` positions. `low_mask(WORD_BITS)` is [`Word::MAX`].
#[inline]
pub fn low_mask(bits: usize) -> Word {
    if bits >= WORD_BITS {
        Word::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Returns the value of bit `index` of `word`, where bit 0 is the least significant.
#[inline]
pub fn bit(word: Word, index: usize) -> bool {
    (word >> index) & 1 == 1
}

/// Sets bit `index` of `word` to `value`, leaving every other bit untouched.
#[inline]
pub fn set_bit(word: &mut Word, index: usize, value: bool) {
    if value {
        *word |= 1 << index;
    } else {
        *word &= !(1 << index);
    }
}

/// Computes the dot product (mod 2) of two words.
///
/// Returns `true` if the number of positions where both words have a 1 is odd.
#[inline]
pub fn dot(lhs: Word, rhs: Word) -> bool {
    (lhs & rhs).count_ones() & 1 == 1
}

/// Packs a sequence of bits into a word, with the first bit at position 0.
///
/// Bits past [`WORD_BITS`] are ignored.
pub fn from_bits(bits: impl IntoIterator<Item = bool>) -> Word {
    bits.into_iter()
        .take(WORD_BITS)
        .enumerate()
        .fold(0, |w, (i, b)| if b { w | (1 << i) } else { w })
}

/// Unpacks the first `len` bits of `word` into 0/1 entries, bit 0 first.
pub fn to_entries(word: Word, len: usize) -> Vec<u8> {
    (0..len).map(|i| ((word >> i) & 1) as u8).collect()
}

//! Block representation helpers.

/// AES block (state, ciphertext or round key) of 16 bytes in column-major order.
pub type Block = [u8; 16];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Returns `lhs ^ rhs` byte by byte.
#[inline]
pub fn xor_blocks(lhs: &Block, rhs: &Block) -> Block {
    let mut out = *lhs;
    xor_in_place(&mut out, rhs);
    out
}

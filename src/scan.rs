//! The 8-wide compatibility scan.
//!
//! Tests eight candidate keys at once against the running usage mask and
//! returns a nibble-per-lane match mask: all four bits of lane `i`'s nibble
//! are set when `keys[i] & mask == 0`. Callers walk the result with
//! trailing-zeros extraction, which enumerates matches in ascending lane
//! order. Pure function of its inputs.

/// AVX2: broadcast the mask, AND against all eight keys, compare the lanes
/// to zero and take the byte-wise movemask.
#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
#[inline(always)]
pub fn scan8(mask: u32, keys: &[u32]) -> u32 {
    use std::arch::x86_64::*;

    debug_assert!(keys.len() >= 8);
    unsafe {
        let vmask = _mm256_set1_epi32(mask as i32);
        let vkeys = _mm256_loadu_si256(keys.as_ptr() as *const __m256i);
        let vhit = _mm256_cmpeq_epi32(_mm256_and_si256(vmask, vkeys), _mm256_setzero_si256());
        _mm256_movemask_epi8(vhit) as u32
    }
}

/// Portable fallback producing the identical nibble mask.
#[cfg(not(all(target_arch = "x86_64", target_feature = "avx2")))]
#[inline(always)]
pub fn scan8(mask: u32, keys: &[u32]) -> u32 {
    let mut hits = 0u32;
    for lane in 0..8 {
        if keys[lane] & mask == 0 {
            hits |= 0xF << (lane * 4);
        }
    }
    hits
}

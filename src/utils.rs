//! Hashing helpers for the unique table.

/// [Szudzik pairing function][szudzik-pairing], wrapping on overflow.
///
/// ```text
/// (a, b) -> if (a<b) then (b^2 + a) else (a^2 + a + b)
/// ```
///
/// Injective as long as nothing wraps, which holds for node indices well
/// below `2^32`. Past that the result is still a usable bucket hash.
///
/// [szudzik-pairing]: http://szudzik.com/ElegantPairing.pdf
pub fn pairing_szudzik(a: u64, b: u64) -> u64 {
    if a < b {
        b.wrapping_mul(b).wrapping_add(a)
    } else {
        a.wrapping_mul(a).wrapping_add(a).wrapping_add(b)
    }
}

/// Pair three values by nesting: `((a, b), c)`.
pub fn pairing3(a: u64, b: u64, c: u64) -> u64 {
    pairing_szudzik(pairing_szudzik(a, b), c)
}

/// Hash used to pick a bucket in a [`Table`][crate::table::Table].
///
/// Only the low bits survive the bucket mask, so equal values must hash
/// equally but nothing stronger is required.
pub trait MyHash {
    fn hash(&self) -> u64;
}

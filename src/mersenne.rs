use num_bigint::BigUint;
use std::cmp::max;

pub const W: usize = 32;
pub const N32: usize = 624;
pub const M32: usize = 397;
pub const A: u32 = 0x9908B0DF;
pub const R: u32 = 31;
pub const U: u32 = 11;
pub const S: u32 = 7;
pub const T: u32 = 15;
pub const L: u32 = 18;
pub const D: u32 = 0xFFFFFFFF;
pub const B: u32 = 0x9D2C5680;
pub const C: u32 = 0xEFC60000;

/// Number of unknown bits in a full MT19937 state.
pub const STATE_BITS: usize = N32 * W;

pub type MT32 = (usize, [u32; N32]);

pub fn seed_mt(seed: u32) -> MT32 {
    const F: u32 = 1812433253;
    let mut arr = [seed; N32];
    for i in 1..N32 {
        arr[i] = arr[i - 1] ^ (arr[i - 1] >> (W as u32 - 2));
        arr[i] = arr[i].wrapping_mul(F);
        arr[i] = arr[i].wrapping_add(i as u32);
    }
    (N32, arr)
}

/// Seeds from a key array. The first state word always ends up as
/// `0x80000000`. An empty key seeds like `[0]`.
pub fn seed_mt_by_array(key: &[u32]) -> MT32 {
    const F1: u32 = 1664525;
    const F2: u32 = 1566083941;
    let key = if key.is_empty() { &[0][..] } else { key };
    let (_, mut arr) = seed_mt(19650218);
    let (mut i, mut j) = (1, 0);
    for _ in 0..max(N32, key.len()) {
        let prev = arr[i - 1] ^ (arr[i - 1] >> 30);
        arr[i] = (arr[i] ^ prev.wrapping_mul(F1))
            .wrapping_add(key[j])
            .wrapping_add(j as u32);
        i += 1;
        j += 1;
        if i >= N32 {
            arr[0] = arr[N32 - 1];
            i = 1;
        }
        if j >= key.len() {
            j = 0;
        }
    }
    for _ in 1..N32 {
        let prev = arr[i - 1] ^ (arr[i - 1] >> 30);
        arr[i] = (arr[i] ^ prev.wrapping_mul(F2)).wrapping_sub(i as u32);
        i += 1;
        if i >= N32 {
            arr[0] = arr[N32 - 1];
            i = 1;
        }
    }
    arr[0] = 1 << R;
    (N32, arr)
}

/// Seeds the way an integer seed is split into 32-bit little-endian key
/// words.
pub fn seed_mt_python(seed: &BigUint) -> MT32 {
    seed_mt_by_array(&seed.to_u32_digits())
}

fn twist(arr: &mut [u32; N32]) {
    for i in 0..N32 {
        let x = (arr[i] & 1u32 << R) | (arr[(i + 1) % N32] & (1u32 << R) - 1);
        arr[i] = arr[(i + M32) % N32] ^ x >> 1;
        if x % 2 != 0 {
            arr[i] ^= A;
        }
    }
}

pub fn nxt((n, arr): &mut MT32) -> u32 {
    if *n == N32 {
        twist(arr);
        *n = 0;
    }
    let mut y = arr[*n];
    *n += 1;
    y ^= y >> U & D;
    y ^= y << S & B;
    y ^= y << T & C;
    y ^= y >> L;

    y
}

/// `k` random bits. Each 32-bit chunk takes one word, the first word
/// being least significant; a partial last chunk keeps the word's top bits.
pub fn getrandbits(state: &mut MT32, k: usize) -> BigUint {
    let mut digits = vec![];
    let mut left = k;
    while left > 0 {
        let r = nxt(state);
        if left < W {
            digits.push(r >> (W - left));
            left = 0;
        } else {
            digits.push(r);
            left -= W;
        }
    }
    BigUint::from_slice(&digits)
}

/// Float in [0, 1) with 53 bits of precision, built from two words.
pub fn random(state: &mut MT32) -> f64 {
    let a = nxt(state) >> 5;
    let b = nxt(state) >> 6;
    (a as f64 * 67108864.0 + b as f64) * (1.0 / 9007199254740992.0)
}

pub fn rand_n<const N: usize>(seed: u32) -> [u32; N] {
    let mut state = seed_mt(seed);
    let mut res = [0u32; N];
    for i in 0..N {
        res[i] = nxt(&mut state);
    }
    res
}

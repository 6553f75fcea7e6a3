use super::error::{QrError, QrResult};

// GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

const PRIMITIVE: u16 = 0x11D;

// Doubled so that log[a] + log[b] never needs a modulo
static EXP_TABLE: [u8; 510] = build_exp_table();

static LOG_TABLE: [u8; 256] = build_log_table();

const fn build_exp_table() -> [u8; 510] {
    let mut table = [0u8; 510];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 510 {
        table[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    table
}

// log[0] is never read
const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

#[inline]
pub fn exp(i: usize) -> u8 {
    EXP_TABLE[i % 255]
}

#[inline]
pub fn log(a: u8) -> QrResult<u8> {
    if a == 0 {
        return Err(QrError::InvalidArgument("log of zero"));
    }
    Ok(LOG_TABLE[a as usize])
}

/// Addition and subtraction coincide in characteristic 2.
#[inline]
pub fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    EXP_TABLE[LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize]
}

pub fn div(a: u8, b: u8) -> QrResult<u8> {
    if b == 0 {
        return Err(QrError::DivideByZero);
    }
    if a == 0 {
        return Ok(0);
    }
    Ok(EXP_TABLE[LOG_TABLE[a as usize] as usize + 255 - LOG_TABLE[b as usize] as usize])
}

pub fn pow(a: u8, n: usize) -> u8 {
    if n == 0 {
        return 1;
    }
    if a == 0 {
        return 0;
    }
    EXP_TABLE[(LOG_TABLE[a as usize] as usize * n) % 255]
}

#[cfg(test)]
mod field_tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_tables() {
        assert_eq!(EXP_TABLE[0], 1);
        assert_eq!(EXP_TABLE[8], 0x1D);
        assert_eq!(EXP_TABLE[255], 1);
        assert_eq!(EXP_TABLE[509], EXP_TABLE[254]);
        for a in 1..=255u8 {
            assert_eq!(EXP_TABLE[LOG_TABLE[a as usize] as usize], a);
        }
    }

    #[test]
    fn test_mul() {
        assert_eq!(mul(0, 7), 0);
        assert_eq!(mul(1, 7), 7);
        assert_eq!(mul(2, 0x80), 0x1D);
        assert_eq!(mul(3, 7), 9);
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(div(5, 0), Err(QrError::DivideByZero));
        assert_eq!(div(0, 5), Ok(0));
        assert!(log(0).is_err());
    }

    #[test]
    fn test_pow() {
        assert_eq!(pow(2, 8), 0x1D);
        assert_eq!(pow(0, 0), 1);
        assert_eq!(pow(0, 3), 0);
        assert_eq!(exp(300), pow(2, 300));
    }

    proptest! {
        #[test]
        fn proptest_field_laws(a in any::<u8>(), b in any::<u8>(), c in any::<u8>()) {
            prop_assert_eq!(mul(a, b), mul(b, a));
            prop_assert_eq!(add(a, a), 0);
            prop_assert_eq!(mul(a, add(b, c)), add(mul(a, b), mul(a, c)));
            prop_assert_eq!(mul(mul(a, b), c), mul(a, mul(b, c)));
            if a != 0 {
                prop_assert_eq!(mul(a, div(b, a).unwrap()), b);
                prop_assert_eq!(pow(a, 0), 1);
                prop_assert_eq!(pow(a, 255), 1);
            }
        }
    }
}

// Polynomials, coefficients highest power first
//------------------------------------------------------------------------------

/// Sum of two polynomials, aligned at the lowest order term.
pub fn poly_add(p: &[u8], q: &[u8]) -> Vec<u8> {
    let (long, short) = if p.len() >= q.len() { (p, q) } else { (q, p) };
    let offset = long.len() - short.len();
    let mut res = long.to_vec();
    for (r, &s) in res[offset..].iter_mut().zip(short) {
        *r ^= s;
    }
    res
}

pub fn poly_mul(p: &[u8], q: &[u8]) -> Vec<u8> {
    if p.is_empty() || q.is_empty() {
        return Vec::new();
    }
    let mut res = vec![0u8; p.len() + q.len() - 1];
    for (i, &a) in p.iter().enumerate() {
        for (j, &b) in q.iter().enumerate() {
            res[i + j] ^= mul(a, b);
        }
    }
    res
}

/// Synthetic division. The result holds the quotient in its first
/// `dividend.len()` entries, followed by the `divisor.len() - 1` remainder
/// entries. With a monic generator as divisor, the remainder is the block of
/// Reed-Solomon error correction codewords.
pub fn poly_div(dividend: &[u8], divisor: &[u8]) -> QrResult<Vec<u8>> {
    let lead = *divisor.first().ok_or(QrError::InvalidArgument("empty divisor"))?;
    if lead == 0 {
        return Err(QrError::DivideByZero);
    }

    let mut res = dividend.to_vec();
    res.resize(dividend.len() + divisor.len() - 1, 0);

    for i in 0..dividend.len() {
        let coef = div(res[i], lead)?;
        res[i] = coef;
        if coef == 0 {
            continue;
        }
        for (j, &d) in divisor.iter().enumerate().skip(1) {
            res[i + j] ^= mul(d, coef);
        }
    }

    Ok(res)
}

/// Remainder of `dividend` modulo `divisor`.
pub fn poly_rem(dividend: &[u8], divisor: &[u8]) -> QrResult<Vec<u8>> {
    let mut res = poly_div(dividend, divisor)?;
    Ok(res.split_off(dividend.len()))
}


// Generator polynomials
//------------------------------------------------------------------------------

/// Generator polynomial `(x - 2^0)(x - 2^1)...(x - 2^(ec - 1))` for one of the
/// error correction codeword counts used by QR code versions 1 to 40.
pub fn generator_polynomial(ec_codewords: usize) -> Option<&'static [u8]> {
    let gen: &'static [u8] = match ec_codewords {
        7 => &GENERATOR_7,
        10 => &GENERATOR_10,
        13 => &GENERATOR_13,
        15 => &GENERATOR_15,
        16 => &GENERATOR_16,
        17 => &GENERATOR_17,
        18 => &GENERATOR_18,
        20 => &GENERATOR_20,
        22 => &GENERATOR_22,
        24 => &GENERATOR_24,
        26 => &GENERATOR_26,
        28 => &GENERATOR_28,
        30 => &GENERATOR_30,
        _ => return None,
    };
    Some(gen)
}

pub const EC_CODEWORD_COUNTS: [usize; 13] = [7, 10, 13, 15, 16, 17, 18, 20, 22, 24, 26, 28, 30];


// Global constants
//------------------------------------------------------------------------------

#[rustfmt::skip]
static GENERATOR_7: [u8; 8] = [
    1, 127, 122, 154, 164, 11, 68, 117,
];

#[rustfmt::skip]
static GENERATOR_10: [u8; 11] = [
    1, 216, 194, 159, 111, 199, 94, 95, 113, 157, 193,
];

#[rustfmt::skip]
static GENERATOR_13: [u8; 14] = [
    1, 137, 73, 227, 17, 177, 17, 52, 13, 46, 43, 83, 132, 120,
];

#[rustfmt::skip]
static GENERATOR_15: [u8; 16] = [
    1, 29, 196, 111, 163, 112, 74, 10, 105, 105, 139, 132, 151, 32, 134, 26,
];

#[rustfmt::skip]
static GENERATOR_16: [u8; 17] = [
    1, 59, 13, 104, 189, 68, 209, 30, 8, 163, 65, 41, 229, 98, 50, 36, 59,
];

#[rustfmt::skip]
static GENERATOR_17: [u8; 18] = [
    1, 119, 66, 83, 120, 119, 22, 197, 83, 249, 41, 143, 134, 85, 53, 125, 99, 79,
];

#[rustfmt::skip]
static GENERATOR_18: [u8; 19] = [
    1, 239, 251, 183, 113, 149, 175, 199, 215, 240, 220, 73, 82, 173, 75, 32, 67, 217, 146,
];

#[rustfmt::skip]
static GENERATOR_20: [u8; 21] = [
    1, 152, 185, 240, 5, 111, 99, 6, 220, 112, 150, 69, 36, 187, 22, 228, 198, 121, 121, 165, 174,
];

#[rustfmt::skip]
static GENERATOR_22: [u8; 23] = [
    1, 89, 179, 131, 176, 182, 244, 19, 189, 69, 40, 28, 137, 29, 123, 67, 253, 86, 218, 230, 26,
    145, 245,
];

#[rustfmt::skip]
static GENERATOR_24: [u8; 25] = [
    1, 122, 118, 169, 70, 178, 237, 216, 102, 115, 150, 229, 73, 130, 72, 61, 43, 206, 1, 237, 247,
    127, 217, 144, 117,
];

#[rustfmt::skip]
static GENERATOR_26: [u8; 27] = [
    1, 246, 51, 183, 4, 136, 98, 199, 152, 77, 56, 206, 24, 145, 40, 209, 117, 233, 42, 135, 68, 70,
    144, 146, 77, 43, 94,
];

#[rustfmt::skip]
static GENERATOR_28: [u8; 29] = [
    1, 252, 9, 28, 13, 18, 251, 208, 150, 103, 174, 100, 41, 167, 12, 247, 56, 117, 119, 233, 127,
    181, 100, 121, 147, 176, 74, 58, 197,
];

#[rustfmt::skip]
static GENERATOR_30: [u8; 31] = [
    1, 212, 246, 77, 73, 195, 192, 75, 98, 5, 70, 103, 177, 22, 217, 138, 51, 181, 246, 72, 25, 18,
    46, 228, 74, 216, 195, 11, 106, 130, 150,
];

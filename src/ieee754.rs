//! IEEE-754 double to single precision narrowing on raw bits
//!
//! Used when the decoder is configured without native double support: the
//! eight wire bytes of a float 64 are converted field by field into the four
//! bytes of a float 32, rounding to nearest with ties to even.

const F64_EXP_MASK: u64 = 0x7ff;
const F64_FRAC_BITS: u32 = 52;
const F64_FRAC_MASK: u64 = (1 << F64_FRAC_BITS) - 1;
const F64_BIAS: i32 = 1023;

const F32_FRAC_BITS: u32 = 23;
const F32_BIAS: i32 = 127;
const F32_MAX_EXP: i32 = 0xff;
const F32_INFINITY: u32 = 0x7f80_0000;
const F32_QUIET_NAN: u32 = 0x7fc0_0000;

/// Narrow a binary64 bit pattern to binary32
///
/// Zeros keep their sign, infinities stay infinite, NaN stays a quiet NaN
/// with its sign and the top payload bits, magnitudes past `f32::MAX` round
/// to infinity and tiny magnitudes become correctly rounded subnormals or
/// signed zero.
pub const fn narrow_f64_bits(bits: u64) -> u32 {
    let sign = ((bits >> 32) as u32) & 0x8000_0000;
    let exp = ((bits >> F64_FRAC_BITS) & F64_EXP_MASK) as i32;
    let frac = bits & F64_FRAC_MASK;

    if exp == F64_EXP_MASK as i32 {
        if frac == 0 {
            return sign | F32_INFINITY;
        }
        let payload = (frac >> (F64_FRAC_BITS - F32_FRAC_BITS)) as u32;
        return sign | F32_QUIET_NAN | payload;
    }

    // binary64 subnormals are far below half the smallest binary32 subnormal
    if exp == 0 {
        return sign;
    }

    let significand = frac | (1 << F64_FRAC_BITS);
    let exp32 = exp - F64_BIAS + F32_BIAS;

    if exp32 >= F32_MAX_EXP {
        return sign | F32_INFINITY;
    }

    if exp32 <= 0 {
        let shift = (F64_FRAC_BITS - F32_FRAC_BITS) as i32 + 1 - exp32;
        if shift > F64_FRAC_BITS as i32 + 1 {
            return sign;
        }
        // A carry out of the fraction lands on the smallest normal encoding.
        return sign | round_shift(significand, shift as u32) as u32;
    }

    let rounded = round_shift(significand, F64_FRAC_BITS - F32_FRAC_BITS);
    // The implicit bit adds one to the exponent field, hence `exp32 - 1`;
    // a rounding carry bumps the exponent and may reach infinity.
    sign | ((((exp32 - 1) as u32) << F32_FRAC_BITS) + rounded as u32)
}

/// Narrow big-endian binary64 wire bytes to big-endian binary32 bytes
pub const fn double_to_float(input: [u8; 8]) -> [u8; 4] {
    narrow_f64_bits(u64::from_be_bytes(input)).to_be_bytes()
}

/// Shift right by `shift` (1..=63), rounding to nearest, ties to even
const fn round_shift(value: u64, shift: u32) -> u64 {
    let kept = value >> shift;
    let rest = value & ((1 << shift) - 1);
    let half = 1 << (shift - 1);
    if rest > half || (rest == half && kept & 1 == 1) {
        kept + 1
    } else {
        kept
    }
}

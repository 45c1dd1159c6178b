//! Bit-sliced AES S-box
//!
//! This module implements the SubBytes and InvSubBytes transformations as a
//! fixed straight-line Boolean circuit instead of the usual 256-entry lookup
//! table. A table lookup indexed by a secret byte leaks that byte through
//! the cache; the circuit below touches no memory at all beyond its
//! operands, so the substitution runs in constant time by construction.
//!
//! The gate network follows the depth-16, 115-gate circuit of Joan Boyar
//! and Rene Peralta, "A depth-16 circuit for the AES S-box"
//! (<https://eprint.iacr.org/2011/332.pdf>). Because the state is bit-sliced
//! across eight 16-bit lanes, every gate operates on a whole lane and the
//! circuit substitutes all 16 state bytes in one pass.
//!
//! Both directions have the same shape: a linear stage of XORs (with a few
//! complements on the inverse side) feeding a nonlinear middle stage, then a
//! linear output stage. The middle stage is the shared GF(2^4) inversion
//! core and is bit-for-bit identical for SubBytes and InvSubBytes; it is
//! factored into [`shared_nonlinear`] so both entry points run the exact
//! same gates. The forward direction carries the affine-map constant 0x63
//! as complements on four output lanes, the inverse direction absorbs the
//! constant into its input stage instead.

use super::aes_core::AesState;

/// Lanes produced by a linear input stage and consumed by the shared
/// nonlinear stage. The forward and inverse substitutions fill these from
/// different XOR combinations of the input slices.
struct SboxInput {
    t1: u16,
    t2: u16,
    t3: u16,
    t4: u16,
    t6: u16,
    t8: u16,
    t9: u16,
    t10: u16,
    t13: u16,
    t14: u16,
    t15: u16,
    t16: u16,
    t17: u16,
    t19: u16,
    t20: u16,
    t22: u16,
    t23: u16,
    t24: u16,
    t25: u16,
    t26: u16,
    t27: u16,
    d: u16,
}

/// The shared nonlinear middle stage of the S-box circuit.
///
/// Computes the inversion core from the linear-stage lanes using only AND,
/// OR and XOR, and returns the eighteen product lanes `m46 .. m63` consumed
/// by the linear output stages. Both substitution directions call this
/// function, which keeps the middle stage identical by construction.
fn shared_nonlinear(t: &SboxInput) -> [u16; 18] {
    let m1 = t.t13 & t.t6;
    let m6 = t.t3 & t.t16;
    let m11 = t.t1 & t.t15;
    let m13 = (t.t4 & t.t27) ^ m11;
    let m15 = (t.t2 & t.t10) ^ m11;
    let m20 = t.t14 ^ m1 ^ (t.t23 & t.t8) ^ m13;
    let m21 = (t.t19 & t.d) ^ m1 ^ t.t24 ^ m15;
    let m22 = t.t26 ^ m6 ^ (t.t22 & t.t9) ^ m13;
    let m23 = (t.t20 & t.t17) ^ m6 ^ m15 ^ t.t25;
    let m25 = m22 & m20;
    let m37 = m21 ^ ((m20 ^ m21) & (m23 ^ m25));
    let m38 = m20 ^ m25 ^ (m21 | (m20 & m23));
    let m39 = m23 ^ ((m22 ^ m23) & (m21 ^ m25));
    let m40 = m22 ^ m25 ^ (m23 | (m21 & m22));
    let m41 = m38 ^ m40;
    let m42 = m37 ^ m39;
    let m43 = m37 ^ m38;
    let m44 = m39 ^ m40;
    let m45 = m42 ^ m41;

    [
        m44 & t.t6,  // m46
        m40 & t.t8,  // m47
        m39 & t.d,   // m48
        m43 & t.t16, // m49
        m38 & t.t9,  // m50
        m37 & t.t17, // m51
        m42 & t.t15, // m52
        m45 & t.t27, // m53
        m41 & t.t10, // m54
        m44 & t.t13, // m55
        m40 & t.t23, // m56
        m39 & t.t19, // m57
        m43 & t.t3,  // m58
        m38 & t.t22, // m59
        m37 & t.t20, // m60
        m42 & t.t1,  // m61
        m45 & t.t4,  // m62
        m41 & t.t2,  // m63
    ]
}

/// Perform the SubBytes transformation on a sliced state.
///
/// Applies the AES S-box to all 16 state bytes in parallel through the
/// Boyar-Peralta circuit. The four complemented output lanes carry the XOR
/// with the affine-map constant 0x63.
pub(super) fn sub_bytes(state: &mut AesState) {
    let u0 = state.slice[7];
    let u1 = state.slice[6];
    let u2 = state.slice[5];
    let u3 = state.slice[4];
    let u4 = state.slice[3];
    let u5 = state.slice[2];
    let u6 = state.slice[1];
    let u7 = state.slice[0];

    // Linear preprocessing.
    let t1 = u0 ^ u3;
    let t2 = u0 ^ u5;
    let t3 = u0 ^ u6;
    let t4 = u3 ^ u5;
    let t5 = u4 ^ u6;
    let t6 = t1 ^ t5;
    let t7 = u1 ^ u2;
    let t8 = u7 ^ t6;
    let t9 = u7 ^ t7;
    let t10 = t6 ^ t7;
    let t11 = u1 ^ u5;
    let t12 = u2 ^ u5;
    let t13 = t3 ^ t4;
    let t14 = t6 ^ t11;
    let t15 = t5 ^ t11;
    let t16 = t5 ^ t12;
    let t17 = t9 ^ t16;
    let t18 = u3 ^ u7;
    let t19 = t7 ^ t18;
    let t20 = t1 ^ t19;
    let t21 = u6 ^ u7;
    let t22 = t7 ^ t21;
    let t23 = t2 ^ t22;
    let t24 = t2 ^ t10;
    let t25 = t20 ^ t17;
    let t26 = t3 ^ t16;
    let t27 = t1 ^ t12;
    let d = u7;

    let [m46, m47, m48, m49, m50, m51, m52, m53, m54, m55, m56, m57, m58, m59, m60, m61, m62, m63] =
        shared_nonlinear(&SboxInput {
            t1,
            t2,
            t3,
            t4,
            t6,
            t8,
            t9,
            t10,
            t13,
            t14,
            t15,
            t16,
            t17,
            t19,
            t20,
            t22,
            t23,
            t24,
            t25,
            t26,
            t27,
            d,
        });

    // Linear postprocessing.
    let l0 = m61 ^ m62;
    let l1 = m50 ^ m56;
    let l2 = m46 ^ m48;
    let l3 = m47 ^ m55;
    let l4 = m54 ^ m58;
    let l5 = m49 ^ m61;
    let l6 = m62 ^ l5;
    let l7 = m46 ^ l3;
    let l8 = m51 ^ m59;
    let l9 = m52 ^ m53;
    let l10 = m53 ^ l4;
    let l11 = m60 ^ l2;
    let l12 = m48 ^ m51;
    let l13 = m50 ^ l0;
    let l14 = m52 ^ m61;
    let l15 = m55 ^ l1;
    let l16 = m56 ^ l0;
    let l17 = m57 ^ l1;
    let l18 = m58 ^ l8;
    let l19 = m63 ^ l4;
    let l20 = l0 ^ l1;
    let l21 = l1 ^ l7;
    let l22 = l3 ^ l12;
    let l23 = l18 ^ l2;
    let l24 = l15 ^ l9;
    let l25 = l6 ^ l10;
    let l26 = l7 ^ l9;
    let l27 = l8 ^ l10;
    let l28 = l11 ^ l14;
    let l29 = l11 ^ l17;

    state.slice[7] = l6 ^ l24;
    state.slice[6] = !(l16 ^ l26);
    state.slice[5] = !(l19 ^ l28);
    state.slice[4] = l6 ^ l21;
    state.slice[3] = l20 ^ l22;
    state.slice[2] = l25 ^ l29;
    state.slice[1] = !(l13 ^ l27);
    state.slice[0] = !(l6 ^ l23);
}

/// Perform the InvSubBytes transformation on a sliced state.
///
/// Applies the inverse AES S-box to all 16 state bytes in parallel. The
/// input stage undoes the forward circuit's linear postprocessing (the
/// complements absorbing the affine constant sit here), the middle stage is
/// the same inversion core as [`sub_bytes`], and the output stage undoes
/// the forward linear preprocessing.
pub(super) fn inv_sub_bytes(state: &mut AesState) {
    let u0 = state.slice[7];
    let u1 = state.slice[6];
    let u2 = state.slice[5];
    let u3 = state.slice[4];
    let u4 = state.slice[3];
    let u5 = state.slice[2];
    let u6 = state.slice[1];
    let u7 = state.slice[0];

    // Undo linear postprocessing.
    let t23 = u0 ^ u3;
    let t22 = !(u1 ^ u3);
    let t2 = !(u0 ^ u1);
    let t1 = u3 ^ u4;
    let t24 = !(u4 ^ u7);
    let r5 = u6 ^ u7;
    let t8 = !(u1 ^ t23);
    let t19 = t22 ^ r5;
    let t9 = !(u7 ^ t1);
    let t10 = t2 ^ t24;
    let t13 = t2 ^ r5;
    let t3 = t1 ^ r5;
    let t25 = !(u2 ^ t1);
    let r13 = u1 ^ u6;
    let t17 = !(u2 ^ t19);
    let t20 = t24 ^ r13;
    let t4 = u4 ^ t8;
    let r17 = !(u2 ^ u5);
    let r18 = !(u5 ^ u6);
    let r19 = !(u2 ^ u4);
    let d = u0 ^ r17;
    let t6 = t22 ^ r17;
    let t16 = r13 ^ r19;
    let t27 = t1 ^ r18;
    let t15 = t10 ^ t27;
    let t14 = t10 ^ r18;
    let t26 = t3 ^ t16;

    let [m46, m47, m48, m49, m50, m51, m52, m53, m54, m55, m56, m57, m58, m59, m60, m61, m62, m63] =
        shared_nonlinear(&SboxInput {
            t1,
            t2,
            t3,
            t4,
            t6,
            t8,
            t9,
            t10,
            t13,
            t14,
            t15,
            t16,
            t17,
            t19,
            t20,
            t22,
            t23,
            t24,
            t25,
            t26,
            t27,
            d,
        });

    // Undo linear preprocessing.
    let p0 = m52 ^ m61;
    let p1 = m58 ^ m59;
    let p2 = m54 ^ m62;
    let p3 = m47 ^ m50;
    let p4 = m48 ^ m56;
    let p5 = m46 ^ m51;
    let p6 = m49 ^ m60;
    let p7 = p0 ^ p1;
    let p8 = m50 ^ m53;
    let p9 = m55 ^ m63;
    let p10 = m57 ^ p4;
    let p11 = p0 ^ p3;
    let p12 = m46 ^ m48;
    let p13 = m49 ^ m51;
    let p14 = m49 ^ m62;
    let p15 = m54 ^ m59;
    let p16 = m57 ^ m61;
    let p17 = m58 ^ p2;
    let p18 = m63 ^ p5;
    let p19 = p2 ^ p3;
    let p20 = p4 ^ p6;
    let p22 = p2 ^ p7;
    let p23 = p7 ^ p8;
    let p24 = p5 ^ p7;
    let p25 = p6 ^ p10;
    let p26 = p9 ^ p11;
    let p27 = p10 ^ p18;
    let p28 = p11 ^ p25;
    let p29 = p15 ^ p20;

    state.slice[7] = p13 ^ p22;
    state.slice[6] = p26 ^ p29;
    state.slice[5] = p17 ^ p28;
    state.slice[4] = p12 ^ p22;
    state.slice[3] = p23 ^ p27;
    state.slice[2] = p19 ^ p24;
    state.slice[1] = p14 ^ p23;
    state.slice[0] = p9 ^ p16;
}

/// Apply the forward S-box to each byte of a 32-bit key schedule word.
///
/// The word is sliced into the low four bit positions of each lane, run
/// through the same gate circuit as a full state, and read back out. Routing
/// SubWord through the circuit keeps the key schedule constant time along
/// with the block path.
pub(super) fn sub_word(word: u32) -> u32 {
    let mut state = AesState::default();

    let mut x = word;
    for lane in state.slice.iter_mut() {
        *lane = ((x & 1) | ((x >> 7) & 2) | ((x >> 14) & 4) | ((x >> 21) & 8)) as u16;
        x >>= 1;
    }

    sub_bytes(&mut state);

    let mut out = 0u32;
    for (b, lane) in state.slice.iter().enumerate() {
        let t = u32::from(*lane);
        out |= ((t & 1) | ((t & 2) << 7) | ((t & 4) << 14) | ((t & 8) << 21)) << b;
    }
    out
}

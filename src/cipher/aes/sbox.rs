//! The S-box as a Boolean circuit over the sliced state.
//!
//! SubBytes is the one non-linear step in AES: each byte is inverted in
//! GF(2⁸) and then pushed through a fixed affine map. Done with a lookup
//! table, it is also the one step that is hard to make constant-time. Here
//! it is evaluated as the Boyar–Peralta depth-16 circuit instead: since the
//! state keeps bit *i* of every byte in slice word *i*, evaluating the
//! circuit once over the eight words substitutes all sixteen bytes
//! simultaneously, with no memory access at all.
//!
//! The circuit has three phases. A linear top computes 27 XOR combinations
//! of the input bits; a non-linear middle ([`gf256_inv`], the only place in
//! the whole cipher with AND gates) computes shares of the field inverse via
//! the tower-field construction; a linear bottom recombines those shares
//! into the output bits, complementing four of them for the affine
//! constant.
//!
//! The inverse S-box is the same circuit with different linear phases. Its
//! input first passes through the inverse affine map, so its top is the
//! forward top composed with that map, where the affine constant surfaces
//! as seven complemented terms. Its output is the field inverse itself, so its
//! bottom is the forward bottom composed with the inverse affine map, under
//! which the constants cancel and only XORs remain. The middle is shared
//! verbatim: both directions call the one [`gf256_inv`].

use {super::state::State, docext::docext};

/// The non-linear core of the S-box circuit.
///
/// Takes the 22 signals produced by a linear top phase (`t1`, `t2`, `t3`,
/// `t4`, `t6`, `t8`, `t9`, `t10`, `t13`, `t14`, `t15`, `t16`, `t17`, `t19`,
/// `t20`, `t22`, `t23`, `t24`, `t25`, `t26`, `t27`, `d`, in that order) and
/// returns the 18 shares `m46..m63` of the $GF(2^8)$ inverse, computed
/// through the $GF(2^4)$ tower. Both S-box directions feed this same
/// function; only their surrounding linear phases differ.
#[docext]
fn gf256_inv(t: [u16; 22]) -> [u16; 18] {
    let [t1, t2, t3, t4, t6, t8, t9, t10, t13, t14, t15, t16, t17, t19, t20, t22, t23, t24, t25, t26, t27, d] =
        t;
    let m1 = t13 & t6;
    let m6 = t3 & t16;
    let m11 = t1 & t15;
    let m13 = (t4 & t27) ^ m11;
    let m15 = (t2 & t10) ^ m11;
    let m20 = t14 ^ m1 ^ (t23 & t8) ^ m13;
    let m21 = (t19 & d) ^ m1 ^ t24 ^ m15;
    let m22 = t26 ^ m6 ^ (t22 & t9) ^ m13;
    let m23 = (t20 & t17) ^ m6 ^ t25 ^ m15;
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
        m44 & t6,
        m40 & t8,
        m39 & d,
        m43 & t16,
        m38 & t9,
        m37 & t17,
        m42 & t15,
        m45 & t27,
        m41 & t10,
        m44 & t13,
        m40 & t23,
        m39 & t19,
        m43 & t3,
        m38 & t22,
        m37 & t20,
        m42 & t1,
        m45 & t4,
        m41 & t2,
    ]
}

impl State {
    /// SubBytes: substitute all sixteen state bytes through the S-box.
    pub(crate) fn sub_bytes(&mut self) {
        // u0 is the most significant bit-plane, matching the circuit's
        // input numbering.
        let [s0, s1, s2, s3, s4, s5, s6, s7] = self.slice;
        let (u0, u1, u2, u3, u4, u5, u6, u7) = (s7, s6, s5, s4, s3, s2, s1, s0);

        // Linear top.
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
            gf256_inv([
                t1, t2, t3, t4, t6, t8, t9, t10, t13, t14, t15, t16, t17, t19, t20, t22, t23,
                t24, t25, t26, t27, d,
            ]);

        // Linear bottom, with the affine constant as four complements.
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

        self.slice = [
            !(l6 ^ l23),
            !(l13 ^ l27),
            l25 ^ l29,
            l20 ^ l22,
            l6 ^ l21,
            !(l19 ^ l28),
            !(l16 ^ l26),
            l6 ^ l24,
        ];
    }

    /// InvSubBytes: substitute all sixteen state bytes through the inverse
    /// S-box.
    pub(crate) fn inv_sub_bytes(&mut self) {
        let [s0, s1, s2, s3, s4, s5, s6, s7] = self.slice;
        let (u0, u1, u2, u3, u4, u5, u6, u7) = (s7, s6, s5, s4, s3, s2, s1, s0);

        // Linear top: the forward top composed with the inverse affine map.
        // The complements carry the affine constant.
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
            gf256_inv([
                t1, t2, t3, t4, t6, t8, t9, t10, t13, t14, t15, t16, t17, t19, t20, t22, t23,
                t24, t25, t26, t27, d,
            ]);

        // Linear bottom: the forward bottom composed with the inverse
        // affine map. The affine constants cancel, so no complements here.
        let p0 = m52 ^ m61;
        let p1 = m58 ^ p0;
        let p2 = m59 ^ p1;
        let p3 = m62 ^ p2;
        let p4 = m49 ^ m50;
        let p5 = m47 ^ m54;
        let p6 = m48 ^ m56;
        let p7 = m55 ^ m63;
        let p8 = m46 ^ m50;
        let p9 = m51 ^ p3;
        let p10 = m57 ^ p6;
        let p11 = m60 ^ p4;
        let p12 = p11 ^ p5;

        self.slice = [
            m57 ^ m61 ^ p7,
            m53 ^ p3 ^ p4,
            p5 ^ p8 ^ p9,
            m51 ^ m53 ^ m63 ^ p10 ^ p2 ^ p8,
            m46 ^ m48 ^ m54 ^ p3,
            m62 ^ p1 ^ p10 ^ p12,
            m59 ^ p0 ^ p12 ^ p6 ^ p7,
            m49 ^ m54 ^ p9,
        ];
    }
}

//! bcrypt: `$2b$` and `$2y$` directly, `$2a$` and `$2x$` by substitution
//!
//! The `$2a$` and `$2x$` variants keep bugs of early OpenBSD and
//! crypt_blowfish implementations that no reference hasher reproduces. They
//! are derived from the `$2b$` hash of the same phrase and salt: outputs
//! known to differ under the quirk are replaced from a table, everything
//! else passes through unchanged.

use super::{Shim, ShimContext};
use crate::case::TestCase;
use crate::error::{KatError, KatResult};
use crate::registry::{MethodId, Params};
use once_cell::sync::Lazy;
use pwhash::bcrypt::{self, BcryptSetup, BcryptVariant};
use std::collections::HashMap;

/// Length of the encoded hash that follows the salt.
pub const OUTPUT_LEN: usize = 31;

/// `$2b$` outputs that come out differently under `$2a$`'s wraparound bug.
const TWO_A_SUBSTITUTIONS: &[(&[u8], &[u8])] = &[
    (b"HdhhdUXVgLADnbTYf12kvsasO1gS51C", b"5jlqAXzFdq.3//pJFBa432Pepsclbdu"),
    (b"caGU5ROXj4M8Tgsx3s/D5BQIuhazIWa", b"7N5c8AaH.dbqz7.2o.V2mRkUDV0TZnO"),
    (b"8jdeg8QqT4CX3ERA9vZPFZAkxZRpxJW", b"D8jTC5oJeIumVOhMVpz79BzoGVhCjrW"),
    (b"9f4sA9SRA0scUKcRyC5kce8dao2.GKe", b"E8Lpo1/qkGPTBDBxEsJjeEzh9nkZ9uW"),
    (b"MOaOTHB4gEm.rriBjXNwBNh.Oc4mKGG", b"ZQhQBRpiYJCaQFgyHlB.t/F01cqLCIu"),
    (b"Qjdj3GXX7D0sFE9jji6wxSTWIhqI3US", b"euRNRfAA6e0fjpTfQPPAMU1PCOf9IHq"),
    (b"PIeeyENZVZmrKLAq5lwBUU9fMRVfV2m", b"h87NWu/js59XXaIj1hDyHxnjw7MJ5K6"),
    (b"VmFQpoXeVuKTzkg2ZRsAf.8PZJZg142", b"vrukkCtLqHBLoBDsz6QoBtSwzI9Qxiq"),
];

/// `$2b$` outputs that come out differently under `$2x$`'s sign-extension
/// bug. The right-hand side has repeats: the bug makes distinct phrases
/// collide.
const TWO_X_SUBSTITUTIONS: &[(&[u8], &[u8])] = &[
    (b"xGPMyJSPyyeICKolPQ2gecm8rOgHwz.", b".sDifhVkUxvjPx6U4yeM2tC411Wuc.W"),
    (b"SRMKxjeMqVSDMhSLhOnvtEZ/p5KhUbq", b"1Z0zKnHbUU3q/kk//Pknlv19a4/T8.K"),
    (b"PQInhDOdCKnXeUE.n/L.kQmTKM9ldK2", b"25hhqa/GOJGmXui3avNI5MN8lOI2bCW"),
    (b"7UwHe/ywPmdp.nr.ZLQSxd8hqn7qURW", b"2E0h7UFL/4fALemA5ApWrCWllQXSPTu"),
    (b"FZEYKXyyMgG13MK0uV8dwNotWf4Wm6e", b"2M7Vc.sF98e8DDmnxFjRfAmrudbv6y."),
    (b"ZHZAnvydiPNiYH2VjRNhEAD6BEiyaWS", b"3kVpkKaj1q2TAXm.ptIi98Nj3zVV8A2"),
    (b"I7vjUzDOKf8XqcK8VSCm9b0bwoSm1Qm", b"6He0iAS8JsdM.iB4OQ4fbsKMXPagLhy"),
    (b"tLCLEXAt3RUjOgs.yvfWSni4j1JX/JS", b"7bLwFi3rlVcl.xfhc7LxjqwOExfxki2"),
    (b"zQPVIDk6wF8XmESji30KDHFabTlu0WK", b"8gGm3RkYFflDX50UQs.tJ8InKNy.HGO"),
    (b"KBv1eBM2he2T/QheS8zPHMejn5fMNRe", b"8jdeg8QqT4CX3ERA9vZPFZAkxZRpxJW"),
    (b"XEhidoDX1kz.RFnwWIzMJvtW2aP/k4e", b"8jdeg8QqT4CX3ERA9vZPFZAkxZRpxJW"),
    (b"UIzecIiCguM2sPh1F7L9IS3zOtmg5Im", b"9f4sA9SRA0scUKcRyC5kce8dao2.GKe"),
    (b"Xl2V4mQ7s0zX0b4XXH/b9UkRRCWpq3e", b"9f4sA9SRA0scUKcRyC5kce8dao2.GKe"),
    (b"tHwehGUs3q0b/Ejn42MsoM4Yv/iA1rq", b"9iflVP0Ezo/iaxO0XS74wFglLNeryTS"),
    (b"K2KXzhsMefB8v6hJJG3bOyKV.XRf6Qe", b"C3nvb4DotHdnRYgOPcdiK0C4q.DkIDO"),
    (b"EuEnx.TyCLYgkTV/uhWL5xJTHV7ZMjG", b"HdhhdUXVgLADnbTYf12kvsasO1gS51C"),
    (b"oaE0x.b2rUEITWgPdg.GEcU4ePHLh6m", b"IZEWKJgp.b.KG29zgOadgd2rUt5iV1e"),
    (b"3cFqlEl7Y0HWaVLHpyyCqG8dBNk1DSm", b"IvJ5WHgSbYKj7g9hhdVsAjyzcnVT/.m"),
    (b"gI4g/1M6K/Sz2bsgu9VDeEl6reszuXa", b"J6Y/kPTV/aHj7iJKuDfD5OPjVTvT2BK"),
    (b"rz1efvzeJjL4mQ813hrZNg3p1.ivOii", b"MOaOTHB4gEm.rriBjXNwBNh.Oc4mKGG"),
    (b"Tp1b9XCEV16BcrQ.0k4xf7V/OGPZLnK", b"N5E4WSTo/R5henexIN1o8xkGwe2V86W"),
    (b"CARhc7ugFdgoPjDb7LUG.yQF2lboK6e", b"NjlOVoE5aHHQGtU9zc25wu0VykHnD1G"),
    (b"nCdKcLO57oLlc6J6sNnGyfT9FrIawiW", b"PIeeyENZVZmrKLAq5lwBUU9fMRVfV2m"),
    (b"DQjlTXDA5PBQ97.qBJY/vsHPQhLJDMe", b"PMOS6ygjFMSbDo.iJJam/G63inGIOBO"),
    (b"1qOUgfpg30XDHLx/zrbWiMRcWyFhwye", b"QZ7A0p9q1Ag9Utfnfl/xif8NiDtVhO."),
    (b"h0JFRyDXfP0duxAkVxWGr8nMDEDvPca", b"QiT.KUY9PXgIzL2aECMKb0EvVl0Pzw6"),
    (b"BvtRGGx3p8o0C5C36uS442Qqnrwofrq", b"Qjdj3GXX7D0sFE9jji6wxSTWIhqI3US"),
    (b"UTFLPGm29p.YVzcY6pqejGEql1x8Ccq", b"TYqa73Yp3leHe3D6.ysuJtNLwOma87C"),
    (b"YdPam5/ypFIyDUQMyCCEIwzVsTi0Sa6", b"TmFuGBy/Zgc6JVAr667oHeCvGQGyS1q"),
    (b"gbhoNOH4mWxoEhRrQNdeI.rpk9XeuZS", b"UPPO3QqmgMIXGHvbOLe2IkNzHLAToY2"),
    (b"ZkQGqjbMpqQ9oCsxNZjN8LQJaHFqPMC", b"VTMVcF7YBLV2/O6V1PNcQw0BD3hTN6a"),
    (b"RbKkfW2ph8bd8B5yul5E97DxgDw9cT.", b"VmFQpoXeVuKTzkg2ZRsAf.8PZJZg142"),
    (b"WI7ZNXFtzCd9mN1mWoNMQRHEmkDsZnm", b"VmFQpoXeVuKTzkg2ZRsAf.8PZJZg142"),
    (b"2WegkGS5Xr/qYNkfEi6JmnR16WVSwcW", b"Xv3TUB0NdnMpyn4cfg4g48oZxRSIrNC"),
    (b"LN/CEHXLfFeYdOOxbdxKu8ZqSIKgqAu", b"YdqUOXeMKw7X6zbqBXP6c1xqIKun7Oq"),
    (b"VAQY6kySmwStlNY.sut9Y87njVr0mm.", b"Ysbn1VpHCTzInfW/z/8Q3k676rxfmSW"),
    (b"qJn4AY9ch/WAR5JXeeJtVGeovjQrhd2", b"ZH9vItRapPbkFKo0iQqU4v71o0e19Mm"),
    (b"4QrucGf30zIbQA.sO0d1QrU63xBrEYq", b"bqJMLkbvnTFj0OYMu9tPnQXstRzX/e6"),
    (b"HD8RnTmGEavoR3LFVfdHvh3xA0QPka2", b"cYbtH8J2lfpMIiBKfF3pKpMno7JlLui"),
    (b"6WgD2zYQDPgxR2sXlUeEeGKknxt95W.", b"caGU5ROXj4M8Tgsx3s/D5BQIuhazIWa"),
    (b"rPSVExmrZ2WB1xntSbqZ/DRQRlKtVw.", b"caGU5ROXj4M8Tgsx3s/D5BQIuhazIWa"),
    (b"PYLCOpTKZmhFn1CoBM2XNbWgqMX4Jk2", b"cxMAJfIx3T.Fv3O0KjL9VdM/oSSUVRK"),
    (b"w8RVl3rh7sNazq544l0944qGq4GUFUq", b"fOj7giyJz5k22FHTKGVo8o1o5zGzPsq"),
    (b"KHsCqMFVxOAGJObHwEBR3JaEdKVu1.m", b"fRmxM11/x97bxCrhecMENdkPm7YpRbe"),
    (b"3wn02pxRJPnFwvlGt75DURDbt4g7om.", b"fY4v5x6.8txtKUKDP86z1xjlXG/GgZO"),
    (b"k9Hv17Gha84losGKAq61csCZokj5pyy", b"gLfxf5sydYesf658mrFYb51nLrn/4Sm"),
    (b"uTNb9MEHVGI7kd6UnQjYxgRNiKJM01S", b"h.z2vLHB/tYSU5fPXkrYB7TxLHGJnI6"),
    (b"heAts1y/8kcTTP0/vD3yeuMX1ihF8dO", b"j72N2Fi2j3pGalOZvTqtyH3bYGotuju"),
    (b"SqNATdQiNEckAKLsqgsKbAM5.hZoMCq", b"mjGosqV8OkKEcduYTNz5PKN2scswFya"),
    (b"k786rdsOdUP4cRi.dLa3dsYueMj5UnS", b"nQF1kDoMDjBBwXy2wwMni2gJLKqA0ta"),
    (b"G6PeIXKiqeNUPUbqFkMJvvI7G9hd51W", b"oBvt6zJCTP5OED1esTYUYPn31cWqwsa"),
    (b"TszY8.avBpwJ6xbNjwws3SKBbK6kj6S", b"odAvHZH9azlhi1x4pBLF25.hj08RMFi"),
    (b"z4QFggBRTVUeHRGL/CQxlAYHraYPcpa", b"ojiyBkc.4HZ2y5Yh0LxBbI6ZkLiRg0C"),
    (b"PPtdI0NcxZ4Txyv/Y5ORfcP1XFriKT2", b"pjce7u/YRnectNa8DXjsSGzRdyH2PSG"),
    (b"uIZ1Lgb.jHRDU/Z/LVXfpQCK72fTEHq", b"q5NMeQZ0UTyP/bILj02wdQ.Si5KHU1K"),
    (b"51cV.PJOQVwmiao4t4lXsb9Cc3Jnuem", b"rB3dV.fJGdSihNlP0vo5PemoaZRp6LS"),
    (b"s6h1E6A2RzVn2KxXLQXsKosQeRo8bLa", b"sND7G4.cx6Dzn6TqbXfK99bElU0a7P."),
    (b"A96emG/jBf0K1K6vCG.eZGdLkSridom", b"tlD3cmtHgs/TwWAvy5E3F.freZS1bau"),
    (b"hWYb0x3Q3zM0aBkB2G1arbzmWxRQS/i", b"whpbcVuyGrJbgveSSM3XQKa8G5alyRm"),
    (b"AqM0XavJxJXeVlJ3Te3umGJaPOCYmZi", b"xP2lldc1.10LvZDjJZXNBKLzWqnkbOa"),
    (b"UPBzTBMwJb5mKWflQ.5Rid4481RrxVy", b"xSD.pz8Zg3vt0Jiovghl5Dqrs8aw8ni"),
    (b"yM59Cq5iVZDB3u45gTNhRSnOgrY1tdG", b"yED5tIjzyeH90te88BUWvTrMFHsWgCi"),
    (b"k.qekGiJym3QgfeFCwNhPHg0Zk99KSa", b"yphVralDu2JlxYbCqwwGli/H6wBgBtC"),
    (b"iYbzuFNFwSfCgqTGNsUFtSDh8PJAqSe", b"zAUUWh4XGsBGYs6yyUJTSfEgzoLXO6G"),
];

type SubstitutionTable = HashMap<&'static [u8], &'static [u8]>;

static TWO_A_TABLE: Lazy<SubstitutionTable> =
    Lazy::new(|| TWO_A_SUBSTITUTIONS.iter().copied().collect());

static TWO_X_TABLE: Lazy<SubstitutionTable> =
    Lazy::new(|| TWO_X_SUBSTITUTIONS.iter().copied().collect());

fn bcrypt_hash(method: MethodId, phrase: &[u8], params: &Params) -> KatResult<Vec<u8>> {
    let variant = match method {
        MethodId::BcryptY => BcryptVariant::V2y,
        _ => BcryptVariant::V2b,
    };
    let setup = BcryptSetup {
        salt: Some(params.salt),
        cost: Some(params.rounds),
        variant: Some(variant),
    };
    bcrypt::hash_with(setup, phrase)
        .map(String::into_bytes)
        .map_err(|e| KatError::reference(method, e))
}

fn split_output(method: MethodId, hash: &[u8]) -> KatResult<(&[u8], &[u8])> {
    if hash.len() <= OUTPUT_LEN {
        return Err(KatError::reference(method, "bcrypt hash too short"));
    }
    Ok(hash.split_at(hash.len() - OUTPUT_LEN))
}

/// bcrypt with a variant the reference hasher implements: `$2b$` for
/// [`MethodId::Bcrypt`], `$2y$` for [`MethodId::BcryptY`].
pub struct Bcrypt {
    method: MethodId,
}

impl Bcrypt {
    pub fn new(method: MethodId) -> Self {
        Self { method }
    }
}

impl Shim for Bcrypt {
    fn generate(
        &self,
        phrase: &[u8],
        params: &Params,
        _ctx: &mut ShimContext<'_>,
    ) -> KatResult<Vec<TestCase>> {
        let expected = bcrypt_hash(self.method, phrase, params)?;
        let setting = split_output(self.method, &expected)?.0.to_vec();
        Ok(vec![TestCase::new(phrase, setting, expected)])
    }
}

/// bcrypt variant derived from `$2b$` through a substitution table.
pub struct BcryptQuirk {
    method: MethodId,
    tag: &'static [u8],
    table: &'static Lazy<SubstitutionTable>,
}

impl BcryptQuirk {
    /// `$2a$`: wraps the phrase length at 256 bytes.
    pub fn two_a() -> Self {
        Self {
            method: MethodId::BcryptA,
            tag: b"$2a$",
            table: &TWO_A_TABLE,
        }
    }

    /// `$2x$`: sign-extends bytes with the 8th bit set.
    pub fn two_x() -> Self {
        Self {
            method: MethodId::BcryptX,
            tag: b"$2x$",
            table: &TWO_X_TABLE,
        }
    }

    /// Output under this variant for a given `$2b$` output.
    pub fn substitute<'a>(&self, output: &'a [u8]) -> &'a [u8] {
        self.table.get(output).copied().unwrap_or(output)
    }
}

impl Shim for BcryptQuirk {
    fn generate(
        &self,
        phrase: &[u8],
        params: &Params,
        _ctx: &mut ShimContext<'_>,
    ) -> KatResult<Vec<TestCase>> {
        let base = bcrypt_hash(self.method, phrase, params)?;
        let (base_setting, base_output) = split_output(self.method, &base)?;

        let mut setting = self.tag.to_vec();
        setting.extend_from_slice(&base_setting[self.tag.len()..]);
        let mut expected = setting.clone();
        expected.extend_from_slice(self.substitute(base_output));
        Ok(vec![TestCase::new(phrase, setting, expected)])
    }
}

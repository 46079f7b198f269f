//! MD5-based methods: FreeBSD md5crypt and Sun MD5
//!
//! Sun MD5 has no reference implementation in the crate ecosystem, so it is
//! written out here from the published algorithm: an MD5 of phrase and
//! setting, then `4096 + rounds` further MD5 iterations, each of which mixes
//! in a fixed quotation when a digest-driven coin toss comes up heads.

use super::{setting_of, Shim, ShimContext};
use crate::case::TestCase;
use crate::error::{KatError, KatResult};
use crate::hash64;
use crate::registry::{MethodId, Params};
use pwhash::{md5_crypt, HashSetup};

/// Iterations performed before the per-setting extra rounds.
const BASIC_ROUND_COUNT: u32 = 4096;

/// Phrases with a length in this range are skipped. Sun MD5 is by far the
/// slowest method in the table and feeds the phrase to MD5 only once, so
/// the very short and very long phrases cover it.
const SKIPPED_LENGTHS: std::ops::RangeInclusive<usize> = 6..=128;

/// Output byte order: five three-byte groups and a final single byte.
const OUTPUT_ORDER: [usize; 16] = [12, 6, 0, 13, 7, 1, 14, 8, 2, 15, 9, 3, 5, 10, 4, 11];

/// Mixed into the digest on coin-toss rounds, trailing NUL included.
const HAMLET: &[u8] = b"To be, or not to be,--that is the question:--\n\
    Whether 'tis nobler in the mind to suffer\n\
    The slings and arrows of outrageous fortune\n\
    Or to take arms against a sea of troubles,\n\
    And by opposing end them?--To die,--to sleep,--\n\
    No more; and by a sleep to say we end\n\
    The heartache, and the thousand natural shocks\n\
    That flesh is heir to,--'tis a consummation\n\
    Devoutly to be wish'd. To die,--to sleep;--\n\
    To sleep! perchance to dream:--ay, there's the rub;\n\
    For in that sleep of death what dreams may come,\n\
    When we have shuffled off this mortal coil,\n\
    Must give us pause: there's the respect\n\
    That makes calamity of so long life;\n\
    For who would bear the whips and scorns of time,\n\
    The oppressor's wrong, the proud man's contumely,\n\
    The pangs of despis'd love, the law's delay,\n\
    The insolence of office, and the spurns\n\
    That patient merit of the unworthy takes,\n\
    When he himself might his quietus make\n\
    With a bare bodkin? who would these fardels bear,\n\
    To grunt and sweat under a weary life,\n\
    But that the dread of something after death,--\n\
    The undiscover'd country, from whose bourn\n\
    No traveller returns,--puzzles the will,\n\
    And makes us rather bear those ills we have\n\
    Than fly to others that we know not of?\n\
    Thus conscience does make cowards of us all;\n\
    And thus the native hue of resolution\n\
    Is sicklied o'er with the pale cast of thought;\n\
    And enterprises of great pith and moment,\n\
    With this regard, their currents turn awry,\n\
    And lose the name of action.--Soft you now!\n\
    The fair Ophelia!--Nymph, in thy orisons\n\
    Be all my sins remember'd.\n\0";

/// FreeBSD MD5 crypt, `$1$`.
pub struct Md5crypt;

impl Shim for Md5crypt {
    fn generate(
        &self,
        phrase: &[u8],
        params: &Params,
        _ctx: &mut ShimContext<'_>,
    ) -> KatResult<Vec<TestCase>> {
        let setup = HashSetup {
            salt: Some(params.salt),
            rounds: None,
        };
        #[allow(deprecated)]
        let hashed = md5_crypt::hash_with(setup, phrase);
        let expected = hashed
            .map_err(|e| KatError::reference(MethodId::Md5crypt, e))?
            .into_bytes();
        let setting = setting_of(&expected).to_vec();
        Ok(vec![TestCase::new(phrase, setting, expected)])
    }
}

fn digest_bit(digest: &[u8; 16], n: u32) -> u32 {
    let n = n % 128;
    u32::from((digest[(n / 8) as usize] >> (n % 8)) & 1)
}

/// Whether round `round` mixes in the quotation.
fn coin_toss(digest: &[u8; 16], round: u32) -> bool {
    let mut indirect_7 = [0u8; 16];
    for (i, slot) in indirect_7.iter_mut().enumerate() {
        let j = (i + 3) % 16;
        let shift_4 = digest[j] % 5;
        let shift_7 = (digest[j] >> (digest[i] % 8)) & 1;
        let indirect_4 = (digest[i] >> shift_4) & 0x0f;
        *slot = (digest[indirect_4 as usize] >> shift_7) & 0x7f;
    }

    let mut a = 0u32;
    let mut b = 0u32;
    for i in 0..8 {
        a |= digest_bit(digest, u32::from(indirect_7[i])) << i;
        b |= digest_bit(digest, u32::from(indirect_7[i + 8])) << i;
    }
    let a = (a >> digest_bit(digest, round)) & 0x7f;
    let b = (b >> digest_bit(digest, round.wrapping_add(64))) & 0x7f;

    digest_bit(digest, a) ^ digest_bit(digest, b) == 1
}

/// The 22-character checksum Sun MD5 computes for `phrase` under `setting`,
/// with `rounds` extra iterations.
///
/// `setting` is mixed in verbatim, so `$md5$salt` and `$md5$salt$` give
/// different checksums.
pub fn sunmd5_checksum(phrase: &[u8], setting: &[u8], rounds: u32) -> Vec<u8> {
    let mut ctx = reference_md5::Context::new();
    ctx.consume(phrase);
    ctx.consume(setting);
    let mut digest = ctx.compute().0;

    for round in 0..BASIC_ROUND_COUNT + rounds {
        let mut ctx = reference_md5::Context::new();
        ctx.consume(digest);
        if coin_toss(&digest, round) {
            ctx.consume(HAMLET);
        }
        ctx.consume(round.to_string());
        digest = ctx.compute().0;
    }

    hash64::encode_transposed(&digest, &OUTPUT_ORDER)
}

/// Sun MD5, `$md5$` or `$md5,rounds=N$`.
///
/// Each phrase yields four cases exercising the parser quirk every
/// compatible implementation has to keep: a setting ending in `$x` hashes
/// like the bare setting, and one ending in `$$` like the setting with a
/// single trailing `$`.
pub struct Sunmd5;

impl Shim for Sunmd5 {
    fn generate(
        &self,
        phrase: &[u8],
        params: &Params,
        _ctx: &mut ShimContext<'_>,
    ) -> KatResult<Vec<TestCase>> {
        if SKIPPED_LENGTHS.contains(&phrase.len()) {
            return Ok(Vec::new());
        }

        let bare = if params.rounds == 0 {
            format!("$md5${}", params.salt)
        } else {
            format!("$md5,rounds={}${}", params.rounds, params.salt)
        };
        let suffixed = format!("{}$", bare);

        let mut bare_expected = format!("{}$", bare).into_bytes();
        bare_expected.extend(sunmd5_checksum(phrase, bare.as_bytes(), params.rounds));
        let mut suffixed_expected = format!("{}$", suffixed).into_bytes();
        suffixed_expected.extend(sunmd5_checksum(phrase, suffixed.as_bytes(), params.rounds));

        Ok(vec![
            TestCase::new(phrase, bare.clone(), bare_expected.clone()),
            TestCase::new(phrase, format!("{}$x", bare), bare_expected),
            TestCase::new(phrase, suffixed.clone(), suffixed_expected.clone()),
            TestCase::new(phrase, format!("{}$", suffixed), suffixed_expected),
        ])
    }
}

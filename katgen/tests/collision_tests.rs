use katgen::corpus::Assembler;
use katgen::library::CryptScratch;
use katgen::shim::ShimContext;
use katgen::{
    buggy_expand_bf_key, collision_expected, explain_collision, sign_extension_collision,
    strneq_7bit, MethodId, Params, Quirk, Registry, TestCase,
};
use proptest::prelude::*;

const BCRYPT_SALT: &str = "CCCCCCCCCCCCCCCCCCCCC.";

fn expected_of(method: MethodId, phrase: &[u8], rounds: u32, salt: &'static str) -> Vec<Vec<u8>> {
    let registry = Registry::with_methods(&[method]);
    let mut scratch = CryptScratch::new();
    let mut ctx = ShimContext::new(None, &mut scratch);
    registry.methods()[0]
        .generate(phrase, &Params { rounds, salt }, &mut ctx)
        .unwrap()
        .into_iter()
        .map(|case| case.expected.unwrap())
        .collect()
}

#[test]
fn test_des_truncation_accepted() {
    assert_eq!(
        explain_collision(b"U*U*U*U*ignored", b"CC", b"U*U*U*U*", b"CC"),
        Some(Quirk::DesTruncation)
    );
    assert_eq!(
        expected_of(MethodId::Descrypt, b"U*U*U*U*ignored", 0, "CC"),
        expected_of(MethodId::Descrypt, b"U*U*U*U*", 0, "CC")
    );
}

#[test]
fn test_des_phrases_never_collide_under_sha_crypt() {
    for method in [MethodId::Sha256crypt, MethodId::Sha512crypt] {
        let long = expected_of(method, b"U*U*U*U*ignored", 1000, "saltstring");
        let short = expected_of(method, b"U*U*U*U*", 1000, "saltstring");
        assert_ne!(long, short);
    }
    assert!(!collision_expected(
        b"U*U*U*U*ignored",
        b"$5$rounds=1000$saltstring",
        b"U*U*U*U*",
        b"$5$rounds=1000$saltstring"
    ));
}

#[test]
fn test_des_high_bit_ignored() {
    assert!(collision_expected(
        b"U*U***U*",
        b"CC",
        b"\xd5\xaa\xd5\xaa\xaa\xaa\xd5\xaa",
        b"CC"
    ));
    assert!(!collision_expected(b"U*U***U", b"CC", b"U*U***U*", b"CC"));
}

#[test]
fn test_bigcrypt_rules() {
    let bigcrypt = b"CC..............";
    assert_eq!(
        explain_collision(b"abc", b"CC", b"abc", bigcrypt),
        Some(Quirk::BigcryptSingleSegment)
    );
    // The phrase behind the bigcrypt setting spans two segments
    assert_eq!(explain_collision(b"abcdefgh", b"CC", b"abcdefghi", bigcrypt), None);

    let mut long = b"THE YEAR 1866 was marked by a bizarre development, an unexplained and \
                     downright inexplicable phenomenon that surely no one has f"
        .to_vec();
    assert_eq!(long.len(), 128);
    let prefix = long.clone();
    long.extend_from_slice(b"orgotten.");
    assert_eq!(
        explain_collision(&prefix, bigcrypt, &long, bigcrypt),
        Some(Quirk::BigcryptTruncation)
    );
}

#[test]
fn test_bsdicrypt_ignores_only_the_high_bit() {
    let setting = b"_J9..XXXX";
    assert_eq!(
        explain_collision(
            b"*U*U*U*U*U*U*U*U*",
            setting,
            b"\xaa\xd5\xaa\xd5\xaa\xd5\xaa\xd5\xaa\xd5\xaa\xd5\xaa\xd5\xaa\xd5\xaa",
            setting
        ),
        Some(Quirk::BsdiHighBit)
    );
    // No truncation
    assert!(!collision_expected(b"*U*U*U*U*U*U*U*U", setting, b"*U*U*U*U*U*U*U*U*", setting));
}

#[test]
fn test_bcrypt_truncation_for_every_tag() {
    let short = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut long = short.to_vec();
    long.extend_from_slice(b"chars after 72 are ignored");
    for tag in ["$2a$05$", "$2b$05$", "$2x$05$", "$2y$05$"] {
        let setting = format!("{}{}", tag, BCRYPT_SALT);
        assert_eq!(
            explain_collision(short, setting.as_bytes(), &long, setting.as_bytes()),
            Some(Quirk::BcryptTruncation)
        );
    }
    assert_eq!(
        expected_of(MethodId::Bcrypt, short, 4, BCRYPT_SALT),
        expected_of(MethodId::Bcrypt, &long, 4, BCRYPT_SALT)
    );
}

#[test]
fn test_sign_extension_only_for_2x() {
    let pairs: [(&[u8], &[u8]); 2] = [
        (b"\xa3", b"\xff\xff\xa3"),
        (b"1\xa3345", b"\xff\xa3345"),
    ];
    for (p1, p2) in pairs {
        assert!(sign_extension_collision(p1, p2));

        let setting = format!("$2x$05${}", BCRYPT_SALT);
        assert_eq!(
            explain_collision(p1, setting.as_bytes(), p2, setting.as_bytes()),
            Some(Quirk::BcryptSignExtension)
        );
        for tag in ["$2a$05$", "$2b$05$", "$2y$05$"] {
            let setting = format!("{}{}", tag, BCRYPT_SALT);
            assert!(!collision_expected(p1, setting.as_bytes(), p2, setting.as_bytes()));
        }
    }
}

#[test]
fn test_nt_settings_equivalent_for_same_phrase() {
    for phrase in [&b""[..], b"abc", b"\xc3\xa9tude"] {
        let outputs = expected_of(MethodId::Nt, phrase, 0, "");
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0], outputs[1]);
        assert_eq!(
            explain_collision(phrase, b"$3$", phrase, b"$3$__not_used__0123456789abcdef"),
            Some(Quirk::NtIgnoresSalt)
        );
    }
    assert!(!collision_expected(
        b"abc",
        b"$3$",
        b"abd",
        b"$3$__not_used__0123456789abcdef"
    ));
}

#[test]
fn test_sunmd5_equivalent_settings() {
    assert_eq!(
        explain_collision(b"", b"$md5,rounds=12$1xMeE.at", b"", b"$md5,rounds=12$1xMeE.at$x"),
        Some(Quirk::SunMd5EquivalentSettings)
    );
    assert!(collision_expected(b"", b"$md5$1xMeE.at$$", b"", b"$md5$1xMeE.at$"));
    assert!(!collision_expected(b"", b"$md5$1xMeE.at$", b"", b"$md5$1xMeE.at"));
    assert!(!collision_expected(b"a", b"$md5$1xMeE.at", b"", b"$md5$1xMeE.at$x"));
}

#[test]
fn test_different_settings_never_collide_otherwise() {
    assert!(!collision_expected(b"abc", b"$1$abcdefgh", b"abc", b"$1$CCCCCCCC"));
    assert!(!collision_expected(b"abc", b"CC", b"abc", b"ab"));
    assert!(!collision_expected(b"abc", b"_J9..CCCC", b"abc", b"_J9..abcd"));
}

#[test]
fn test_missed_collision_is_not_reported() {
    // Two phrases that would be an acceptable DES collision, but whose
    // outputs differ. Only actual duplicates are checked, so nothing flags
    // the missing collision.
    let mut assembler = Assembler::new();
    assembler.add(
        MethodId::Descrypt,
        TestCase::new(b"U*U*U*U*", b"CC".to_vec(), b"CCNf8Sbh3HDfQ".to_vec()),
    );
    assembler.add(
        MethodId::Descrypt,
        TestCase::new(b"U*U*U*U*ignored", b"CC".to_vec(), b"CCdifferent..".to_vec()),
    );
    let assembly = assembler.finish();
    assert!(assembly.collisions.is_empty());
    assert_eq!(assembly.accepted_duplicates, 0);
}

#[test]
fn test_every_collision_is_reported() {
    let mut assembler = Assembler::new();
    for phrase in [&b"a"[..], b"b", b"c"] {
        assembler.add(
            MethodId::Md5crypt,
            TestCase::new(phrase, b"$1$x".to_vec(), b"$1$x$same".to_vec()),
        );
    }
    let assembly = assembler.finish();
    assert_eq!(assembly.collisions.len(), 2);
    // Each is reported against the first case with that output
    assert!(assembly.collisions.iter().all(|c| c.first.0 == b"a"));
    assert!(assembly.collisions[0].to_string().starts_with("UNEXPECTED HASH COLLISION:\n"));
}

proptest! {
    #[test]
    fn prop_strneq_reflexive(p in proptest::collection::vec(any::<u8>(), 0..40), limit in 0usize..64) {
        prop_assert!(strneq_7bit(&p, &p, limit));
    }

    #[test]
    fn prop_strneq_symmetric(
        p1 in proptest::collection::vec(any::<u8>(), 0..20),
        p2 in proptest::collection::vec(any::<u8>(), 0..20),
        limit in 0usize..32,
    ) {
        prop_assert_eq!(strneq_7bit(&p1, &p2, limit), strneq_7bit(&p2, &p1, limit));
    }

    #[test]
    fn prop_strneq_is_equality_on_ascii(
        p1 in proptest::collection::vec(0u8..0x80, 0..12),
        p2 in proptest::collection::vec(0u8..0x80, 0..12),
    ) {
        let limit = p1.len().max(p2.len()) + 1;
        prop_assert_eq!(strneq_7bit(&p1, &p2, limit), p1 == p2);
    }

    #[test]
    fn prop_strneq_ignores_high_bit(p in proptest::collection::vec(any::<u8>(), 0..20)) {
        let flipped: Vec<u8> = p.iter().map(|b| b ^ 0x80).collect();
        prop_assert!(strneq_7bit(&p, &flipped, p.len()));
    }

    #[test]
    fn prop_expansion_reads_only_72_bytes(
        prefix in proptest::collection::vec(any::<u8>(), 72),
        s1 in proptest::collection::vec(any::<u8>(), 0..40),
        s2 in proptest::collection::vec(any::<u8>(), 0..40),
    ) {
        let a: Vec<u8> = prefix.iter().chain(&s1).copied().collect();
        let b: Vec<u8> = prefix.iter().chain(&s2).copied().collect();
        prop_assert_eq!(buggy_expand_bf_key(&a), buggy_expand_bf_key(&b));
    }

    #[test]
    fn prop_expansion_of_ascii_is_cyclic_copy(p in proptest::collection::vec(1u8..0x80, 1..100)) {
        // Without high bits nothing is sign-extended: the words are the
        // phrase and its NUL repeated, packed big-endian
        let stream: Vec<u8> = p.iter().copied().chain([0]).cycle().take(4 * 18).collect();
        let expected: Vec<u32> = stream
            .chunks(4)
            .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        prop_assert_eq!(buggy_expand_bf_key(&p).to_vec(), expected);
    }
}

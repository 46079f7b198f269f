//! Passphrase corpus
//!
//! Phrases are raw byte strings, not text. Several of them are not valid in
//! any character encoding: they exist to trip the 8th-bit stripping of the
//! DES-based methods and the sign-extension bug preserved by bcrypt `$2x$`.
//!
//! Order matters. The assembler reports the first phrase that produced a
//! given hash, so reordering this list changes which side of a collision is
//! called "first" in diagnostics and the order of rows in the table.

/// Every phrase fed to every method.
pub const PHRASES: &[&[u8]] = &[
    // All ASCII printable, various lengths
    b"",
    b" ",
    b"a",
    b"ab",
    b"abc",
    b"U*U",
    b"U*U*",
    b"U*U*U",
    b".....",
    b"dragon",
    b"dRaGoN",
    b"DrAgOn",
    b"PAROLX",
    b"U*U***U",
    b"abcdefg",
    b"01234567",
    b"726 even",
    b"zyxwvuts",
    b"ab1234567",
    b"alexander",
    b"beautiful",
    b"challenge",
    b"chocolate",
    b"cr1234567",
    b"katherine",
    b"stephanie",
    b"sunflower",
    b"basketball",
    b"porsche911",
    b"|_337T`/p3",
    b"thunderbird",
    b"Hello world!",
    b"pleaseletmein",
    b"a short string",
    b"zxyDPWgydbQjgq",
    b"photojournalism",
    b"ecclesiastically",
    b"congregationalism",
    b"dihydrosphingosine",
    b"semianthropological",
    b"palaeogeographically",
    b"electromyographically",
    b"noninterchangeableness",
    b"abcdefghijklmnopqrstuvwxyz",
    b"electroencephalographically",
    b"antidisestablishmentarianism",
    b"cyclotrimethylenetrinitramine",
    b"dichlorodiphenyltrichloroethane",
    b"multiple words seperated by spaces",
    b"supercalifragilisticexpialidocious",
    b"we have a short salt string but not a short password",
    b"multiple word$ $eperated by $pace$ and $pecial character$",
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
    b"1234567890123456789012345678901234567890\
      1234567890123456789012345678901234567890",
    b"a very much longer text to encrypt.  This one even stretches over more\
      than one line.",
    // ASCII printables with their high bits flipped; DES-based hashes
    // collide with the plain counterparts above.
    b"\xd0\xc1\xd2\xcf\xcc\xd8",             // PAROLX
    b"\xd5\xaa\xd5\xaa\xaa\xaa\xd5\xaa",     // U*U***U*
    b"\xe1\xec\xe5\xf8\xe1\xee\xe4\xe5\xf2", // alexander
    b"\xf3\xf4\xe5\xf0\xe8\xe1\xee\xe9\xe5", // stephanie
    b"\xaa\xd5\xaa\xd5\xaa\xd5\xaa\xd5\xaa\xd5\xaa\xd5\xaa\xd5\xaa\xd5\xaa", // *U*U*U*U*U*U*U*U*
    // UTF-8 text and the 7-bit strings it collapses to under DES
    b"\xC3\xA9tude",
    b"C)tude",
    b"Chl\xC3\xB6e",
    b"ChlC6e",
    b"\xC3\x85ngstr\xC3\xB6m",
    b"C\x05ngstrC6m",
    // Upstream lists this one without a trailing comma, joining it to the next phrase
    b"C\x05ngstrC",
    // descrypt truncates to 8 bytes
    b"U*U***U*",
    b"U*U***U*ignored",
    b"U*U*U*U*",
    b"U*U*U*U*ignored",
    b"*U*U*U*U",
    b"*U*U*U*U*",
    b"*U*U*U*U*U*U*U*U",
    b"*U*U*U*U*U*U*U*U*",
    // bcrypt $2x$ sign-extension bug
    b"\xa3",
    b"\xa3a",
    b"\xd1\x91",
    b"\xa3ab",
    b"\xff\xff\xa3",
    b"1\xa3345",
    b"\xff\xa3345",
    b"\xff\xa334\xff\xff\xff\xa3345",
    b"\x55\xaa\xff\x55\xaa\xff\x55\xaa\xff\x55\xaa\xff\
      \x55\xaa\xff\x55\xaa\xff\x55\xaa\xff\x55\xaa\xff\
      \x55\xaa\xff\x55\xaa\xff\x55\xaa\xff\x55\xaa\xff\
      \x55\xaa\xff\x55\xaa\xff\x55\xaa\xff\x55\xaa\xff\
      \x55\xaa\xff\x55\xaa\xff\x55\xaa\xff\x55\xaa\xff\
      \x55\xaa\xff\x55\xaa\xff\x55\xaa\xff\x55\xaa\xff",
    b"\xaa\x55\xaa\x55\xaa\x55\xaa\x55\xaa\x55\xaa\x55\
      \xaa\x55\xaa\x55\xaa\x55\xaa\x55\xaa\x55\xaa\x55\
      \xaa\x55\xaa\x55\xaa\x55\xaa\x55\xaa\x55\xaa\x55\
      \xaa\x55\xaa\x55\xaa\x55\xaa\x55\xaa\x55\xaa\x55\
      \xaa\x55\xaa\x55\xaa\x55\xaa\x55\xaa\x55\xaa\x55\
      \xaa\x55\xaa\x55\xaa\x55\xaa\x55\xaa\x55\xaa\x55",
    // bcrypt truncates to 72 bytes
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ\
      0123456789",
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ\
      0123456789chars after 72 are ignored",
    b"\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
      \xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
      \xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
      \xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
      \xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
      \xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa",
    b"\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
      \xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
      \xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
      \xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
      \xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
      \xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
      chars after 72 are ignored as usual",
    // bigcrypt truncates to 128 bytes
    // (first sentence of _Twenty Thousand Leagues Under The Sea_)
    b"THE YEAR 1866 was marked by a bizarre development, an unexplained and \
      downright inexplicable phenomenon that surely no one has forgotten.",
    // ...and its 8 (descrypt), 72 (bcrypt) and 128 (bigcrypt) byte prefixes
    b"THE YEAR",
    b"THE YEAR 1866 was marked by a bizarre development, an unexplained and do",
    b"THE YEAR 1866 was marked by a bizarre development, an unexplained and \
      downright inexplicable phenomenon that surely no one has f",
];

use katgen::collision::quote_bytes;
use katgen::{explain_collision, print_box};

fn explain(p1: &[u8], s1: &[u8], p2: &[u8], s2: &[u8]) {
    println!("p1 = {}  s1 = {}", quote_bytes(p1), String::from_utf8_lossy(s1));
    println!("p2 = {}  s2 = {}", quote_bytes(p2), String::from_utf8_lossy(s2));
    match explain_collision(p1, s1, p2, s2) {
        Some(quirk) => println!("  ✓ expected: {}\n", quirk),
        None => println!("  ✗ a shared output would be a bug\n"),
    }
}

fn main() {
    print_box("Known Hash Collisions");

    explain(b"U*U*U*U*", b"CC", b"U*U*U*U*ignored", b"CC");
    explain(b"U*U*U*U*", b"CC", b"U*U*U*U*", b"CC..............");
    explain(b"1\xa3345", b"$2x$05$CCCCCCCCCCCCCCCCCCCCC.", b"\xff\xa3345", b"$2x$05$CCCCCCCCCCCCCCCCCCCCC.");
    explain(b"1\xa3345", b"$2b$05$CCCCCCCCCCCCCCCCCCCCC.", b"\xff\xa3345", b"$2b$05$CCCCCCCCCCCCCCCCCCCCC.");
    explain(b"abc", b"$3$", b"abc", b"$3$__not_used__0123456789abcdef");
    explain(b"", b"$md5,rounds=12$1xMeE.at$", b"", b"$md5,rounds=12$1xMeE.at$$");
    explain(b"U*U*U*U*", b"$5$saltstring", b"U*U*U*U*ignored", b"$5$saltstring");
}

use katgen::corpus::Assembler;
use katgen::serialize::{render_case, TABLE_HEADER};
use katgen::{c_escape, render_table, MethodId, TestCase};

#[cfg(test)]
mod serialize_tests {
    use super::*;

    fn table_of(cases: Vec<(MethodId, TestCase)>) -> String {
        let mut assembler = Assembler::new();
        for (method, case) in cases {
            assembler.add(method, case);
        }
        render_table(&assembler.finish().corpus)
    }

    #[test]
    fn test_empty_corpus_is_just_the_header() {
        assert_eq!(table_of(Vec::new()), TABLE_HEADER);
    }

    #[test]
    fn test_guarded_blocks() {
        let table = table_of(vec![
            (
                MethodId::Descrypt,
                TestCase::new(b"abc", b"CC".to_vec(), b"CCxyz".to_vec()),
            ),
            (
                MethodId::Descrypt,
                TestCase::new(b"abd", b"CC".to_vec(), b"CCxyw".to_vec()),
            ),
            (
                MethodId::Yescrypt,
                TestCase::settings_only(b"abc", b"$y$j75$.......".to_vec()),
            ),
        ]);

        let body = table.strip_prefix(TABLE_HEADER).unwrap();
        assert_eq!(
            body,
            "#if INCLUDE_descrypt && defined TEST_descrypt\n\
             \x20 { \"CC\", \"CCxyz\", \"abc\" },\n\
             \x20 { \"CC\", \"CCxyw\", \"abd\" },\n\
             #endif // descrypt\n\
             \n\
             #if INCLUDE_yescrypt && defined TEST_yescrypt\n\
             \x20 { \"$y$j75$.......\", 0, \"abc\" },\n\
             #endif // yescrypt\n"
        );
    }

    #[test]
    fn test_every_guard_is_closed() {
        let table = table_of(vec![
            (MethodId::Nt, TestCase::new(b"a", b"$3$".to_vec(), b"$3$$1".to_vec())),
            (MethodId::Md5crypt, TestCase::new(b"a", b"$1$x".to_vec(), b"$1$x$1".to_vec())),
            (MethodId::Bcrypt, TestCase::new(b"a", b"$2b$05$x".to_vec(), b"$2b$05$x1".to_vec())),
        ]);
        let opens = table.lines().filter(|l| l.starts_with("#if ")).count();
        let closes = table.lines().filter(|l| l.starts_with("#endif // ")).count();
        assert_eq!(opens, 3);
        assert_eq!(closes, 3);
        assert!(table.ends_with("#endif // bcrypt\n"));
    }

    #[test]
    fn test_rows_escape_phrase_bytes() {
        let case = TestCase::new(b"1\xa3345", b"$2x$05$CC".to_vec(), b"$2x$05$CCh".to_vec());
        assert_eq!(
            render_case(&case),
            "  { \"$2x$05$CC\", \"$2x$05$CCh\", \"1\\xa3\"\"345\" },\n"
        );

        let case = TestCase::new(b"back\\slash \"quoted\"", b"CC".to_vec(), b"CCh".to_vec());
        assert_eq!(
            render_case(&case),
            "  { \"CC\", \"CCh\", \"back\\\\slash \\\"quoted\\\"\" },\n"
        );
    }

    #[test]
    fn test_escaped_output_is_ascii() {
        let all: Vec<u8> = (0..=255u8).collect();
        let escaped = c_escape(&all);
        assert!(escaped.bytes().all(|b| (0x20..0x7f).contains(&b)));
    }

    #[test]
    fn test_header_marks_generated_file() {
        assert!(TABLE_HEADER.starts_with("/* "));
        assert!(TABLE_HEADER.contains("Automatically generated"));
        assert!(TABLE_HEADER.ends_with("*/\n\n"));
    }
}

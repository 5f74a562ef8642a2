//! Purpose: Lock parser contract expectations with corpus + differential coverage.
//! Exports: Integration tests only (no runtime exports).
//! Role: Catch semantic drift between the simd-json and serde_json document backends.
//! Invariants: Documents built by either backend compare equal node-for-node.
//! Invariants: Nesting limits are enforced before decoding and apply to both backends alike.
//! Notes: Duplicate-key behavior is asserted as current parser parity (last value wins).

use plandom::api::{DocumentTree, ErrorKind, NodeTag, ParseOptions, ParserBackend};

fn parse(input: &str, backend: ParserBackend) -> Result<DocumentTree, ErrorKind> {
    let options = ParseOptions::new().with_backend(backend);
    DocumentTree::parse_with(input, &options).map_err(|err| err.kind())
}

fn assert_differential_parity(input: &str) {
    let simd = parse(input, ParserBackend::Simd);
    let serde = parse(input, ParserBackend::Serde);
    match (simd, serde) {
        (Ok(a), Ok(b)) => assert_eq!(a, b, "document mismatch for {input}"),
        (Err(a), Err(b)) => assert_eq!(a, b, "error kind mismatch for {input}"),
        (left, right) => panic!("parser outcome mismatch: simd={left:?}, serde={right:?}"),
    }
}

#[test]
fn corpus_valid_payloads_match_serde() {
    let corpus = [
        r#"{"a":1,"b":"ok"}"#,
        r#"[1,2,3,{"x":true}]"#,
        r#"{"nested":{"arr":[{"k":"v"}]}}"#,
        r#"{"unicode":"☃"}"#,
        r#"{"ints":[2147483647,2147483648,-2147483649],"f":[0.5,1e2,-0.0]}"#,
        "null",
    ];

    for case in corpus {
        assert_differential_parity(case);
    }
}

#[test]
fn corpus_malformed_payloads_fail_on_both() {
    let corpus = [r#"{"a": }"#, "[1,", "", r#"{"a" 1}"#];
    for case in corpus {
        assert_differential_parity(case);
        assert_eq!(parse(case, ParserBackend::Simd).unwrap_err(), ErrorKind::Parse);
    }
}

#[test]
fn corpus_duplicate_keys_matches_current_behavior() {
    let input = r#"{"a":1,"a":2}"#;
    assert_differential_parity(input);
    let doc = parse(input, ParserBackend::Serde).expect("parse");
    assert_eq!(doc.root().value_for_key("a").unwrap().as_i32().unwrap(), 2);
    assert_eq!(doc.root().keys().unwrap().count(), 1);
}

#[test]
fn corpus_deep_nesting_rejected_by_both() {
    let depth = 256usize;
    let payload = format!("{}0{}", "[".repeat(depth), "]".repeat(depth));
    assert_differential_parity(&payload);
    assert_eq!(
        parse(&payload, ParserBackend::Simd).unwrap_err(),
        ErrorKind::Parse
    );

    let shallow = format!("{}0{}", "[".repeat(32), "]".repeat(32));
    assert_differential_parity(&shallow);
    assert!(parse(&shallow, ParserBackend::Simd).is_ok());
}

#[test]
fn pathological_nesting_fails_without_recursing() {
    let depth = 100_000usize;
    let arrays = format!("{}0{}", "[".repeat(depth), "]".repeat(depth));
    let objects = format!("{}0{}", r#"{"a":"#.repeat(depth), "}".repeat(depth));
    let unclosed = "[".repeat(depth);
    for payload in [&arrays, &objects, &unclosed] {
        for backend in [ParserBackend::Simd, ParserBackend::Serde] {
            let options = ParseOptions::new().with_backend(backend);
            let err = DocumentTree::parse_with(payload, &options).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "backend {backend}");
            assert_eq!(
                err.hint(),
                Some("parse category: depth-limit; context: document.parse"),
                "backend {backend}"
            );
        }
    }
}

#[test]
fn brackets_inside_strings_do_not_count_toward_depth() {
    let payload = format!(r#"[{{"s":"{}\"{}"}}]"#, "[".repeat(500), "{".repeat(500));
    let options = ParseOptions::new().with_max_depth(2);
    for backend in [ParserBackend::Simd, ParserBackend::Serde] {
        let doc = DocumentTree::parse_with(&payload, &options.with_backend(backend))
            .expect("strings are opaque to the nesting scan");
        let text = doc
            .root()
            .value_at_index(0)
            .unwrap()
            .value_for_key("s")
            .unwrap()
            .as_string()
            .unwrap();
        assert_eq!(text.len(), 1001);
    }
}

#[test]
fn corpus_large_number_edges() {
    let max_u64 = r#"{"n":18446744073709551615}"#;
    assert_differential_parity(max_u64);
    let doc = parse(max_u64, ParserBackend::Simd).expect("parse");
    let n = doc.root().value_for_key("n").unwrap();
    assert_eq!(n.tag(), NodeTag::Double);
    assert_eq!(n.as_f64().unwrap(), u64::MAX as f64);
    assert_eq!(n.as_i64().unwrap_err().kind(), ErrorKind::TypeMismatch);

    let above_u64 = r#"{"n":18446744073709551616}"#;
    assert!(
        parse(above_u64, ParserBackend::Simd).is_err(),
        "simd-json current runtime path unexpectedly accepted u64+1 integer"
    );
    let doc = parse(above_u64, ParserBackend::Serde).expect("serde accepts u64+1 as a float");
    assert_eq!(
        doc.root().value_for_key("n").unwrap().tag(),
        NodeTag::Double
    );

    let non_finite = r#"{"n":1e309}"#;
    assert_differential_parity(non_finite);
}

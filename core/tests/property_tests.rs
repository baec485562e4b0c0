use proptest::prelude::*;

use matlex::errors::ScanErrorKind;
use matlex::keywords::{Coef, PerfectHashFinder, SearchConfig};
use matlex::lexer::Lexer;
use matlex::lexer::meta_stack::Delimiter;
use matlex::{Token, TokenKind};

const VARIABLES: [&str; 2] = ["X", "U"];
const FUNCTIONS: [&str; 2] = ["sin", "cos"];

fn lexer(source: &str) -> Lexer {
    let mut lexer = Lexer::new("prop", source);
    for name in VARIABLES {
        lexer.register_variable(name).unwrap();
    }
    for name in FUNCTIONS {
        lexer.register_function(name).unwrap();
    }
    lexer
}

/// Well-formed expressions over the registered names, without whitespace.
fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[0-9]{1,3}(\\.[0-9]{1,2})?(e-?[0-9])?i?",
        Just("X".to_string()),
        Just("U".to_string()),
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), "[-+*/^:]", inner.clone()).prop_map(|(a, op, b)| format!("{a}{op}{b}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.clone().prop_map(|e| format!("X({e})")),
            (prop::sample::select(FUNCTIONS.to_vec()), inner.clone())
                .prop_map(|(f, e)| format!("{f}({e})")),
            prop::collection::vec(inner, 1..4).prop_map(|rows| format!("[{}]", rows.join(";"))),
        ]
    })
}

fn nesting() -> impl Strategy<Value = Vec<Delimiter>> {
    prop::collection::vec(
        prop::sample::select(vec![
            Delimiter::Group,
            Delimiter::Index,
            Delimiter::Function,
            Delimiter::Matrix,
        ]),
        1..12,
    )
}

fn opener(delimiter: Delimiter) -> &'static str {
    match delimiter {
        Delimiter::Group => "(",
        Delimiter::Index => "X(",
        Delimiter::Function => "sin(",
        Delimiter::Matrix => "[",
    }
}

fn closer(delimiter: Delimiter) -> &'static str {
    match delimiter {
        Delimiter::Matrix => "]",
        _ => ")",
    }
}

fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{2,6}", 1..6).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn well_formed_input_ends_in_one_eof(source in expression()) {
        let tokens: Vec<Token> = lexer(&source).scanner().collect();
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert_eq!(tokens.iter().filter(|t| t.is_terminal()).count(), 1);
    }

    #[test]
    fn concatenated_text_reproduces_input(source in expression()) {
        let rebuilt: String = lexer(&source)
            .scanner()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| t.text)
            .collect();
        prop_assert_eq!(rebuilt, source);
    }

    #[test]
    fn balanced_groups_close_and_one_extra_fails(depth in 1usize..20) {
        let balanced = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        let closed = lexer(&balanced);
        let mut scanner = closed.scanner();
        prop_assert_eq!(scanner.by_ref().last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert_eq!(scanner.open_depth(), 0);

        let unbalanced = format!("{balanced})");
        let extra = lexer(&unbalanced);
        let mut scanner = extra.scanner();
        prop_assert_eq!(scanner.by_ref().last().map(|t| t.kind), Some(TokenKind::Error));
        prop_assert_eq!(
            scanner.take_error().map(|e| e.kind),
            Some(ScanErrorKind::MismatchedDelimiter { closing: Delimiter::Group, open: None })
        );
    }

    #[test]
    fn mixed_nestings_close_in_reverse_order(open in nesting(), extra_matrix in any::<bool>()) {
        let openers: String = open.iter().map(|d| opener(*d)).collect();
        let closers: String = open.iter().rev().map(|d| closer(*d)).collect();
        let balanced = format!("{openers}1{closers}");

        let closed = lexer(&balanced);
        let mut scanner = closed.scanner();
        let tokens: Vec<Token> = scanner.by_ref().collect();
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert_eq!(scanner.open_depth(), 0);

        let close_kinds: Vec<TokenKind> = tokens
            .iter()
            .map(|t| t.kind)
            .filter(|k| {
                matches!(
                    k,
                    TokenKind::RightGroup
                        | TokenKind::RightIdxMeta
                        | TokenKind::RightFuncMeta
                        | TokenKind::RightMatMeta
                )
            })
            .collect();
        let expected: Vec<TokenKind> = open.iter().rev().map(|d| d.close_kind()).collect();
        prop_assert_eq!(close_kinds, expected);

        let extra = if extra_matrix { Delimiter::Matrix } else { Delimiter::Group };
        let unbalanced = format!("{balanced}{}", closer(extra));
        let overclosed = lexer(&unbalanced);
        let mut scanner = overclosed.scanner();
        prop_assert_eq!(scanner.by_ref().last().map(|t| t.kind), Some(TokenKind::Error));
        prop_assert_eq!(
            scanner.take_error().map(|e| e.kind),
            Some(ScanErrorKind::MismatchedDelimiter { closing: extra, open: None })
        );
    }

    #[test]
    fn one_unregistered_name_halts_with_one_error(
        prefix in expression(),
        name in "[a-z]{4,8}",
    ) {
        prop_assume!(!FUNCTIONS.contains(&name.as_str()));
        let source = format!("{prefix}+{name}+X");
        let tokens: Vec<Token> = lexer(&source).scanner().collect();
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Error).count(), 1);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Error));
    }

    #[test]
    fn found_hashes_never_collide(keywords in words(), probe in "[a-z]{1,8}") {
        let keywords: Vec<&str> = keywords.iter().map(String::as_str).collect();
        let mut finder = PerfectHashFinder::new(SearchConfig { table_bits: 8, default_max_coef: 16 });
        let mut coefs = vec![Coef::at(0), Coef::at(-1), Coef::at(1), Coef::at(0)];
        if finder.search(&mut coefs, &keywords).is_ok() {
            let layout = finder.solution(&coefs).layout(&keywords);
            prop_assert!(layout.is_ok());
            let layout = layout.unwrap();
            if !keywords.contains(&probe.as_str()) {
                let slot = finder.apply(&coefs, &probe);
                prop_assert_ne!(layout[slot], Some(probe.as_str()));
            }
        }
    }
}

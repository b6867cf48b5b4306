use rvcc::error::LexError;
use rvcc::lexer::tokenize;
use rvcc::token::TokenKind;

#[test]
fn tokenizes_a_full_program() {
    let toks = tokenize("a = 1; if (a == 1) { return a; }").unwrap();
    assert!(toks.iter().any(|t| t.kind == TokenKind::Keyword && t.lexeme == "if"));
    assert!(toks.iter().any(|t| t.kind == TokenKind::Keyword && t.lexeme == "return"));
    assert_eq!(toks.last().unwrap().kind, TokenKind::Eof);
}

#[test]
fn negative_looking_numbers_are_two_tokens() {
    // the lexer has no unary-minus-on-number rule; `-5` is `-` then `5`,
    // and the parser is responsible for the `0 - x` desugaring.
    let toks = tokenize("-5").unwrap();
    assert_eq!(toks[0].lexeme, "-");
    assert_eq!(toks[1].lexeme, "5");
}

#[test]
fn unrecognized_character_reports_the_remaining_source() {
    let err = tokenize("a = 1 % 2;").unwrap_err();
    assert_eq!(
        err,
        LexError::Unrecognized {
            rest: "% 2;".to_string()
        }
    );
}

use rvcc::ast::{BinOp, Node};
use rvcc::lexer::{tokenize, TokenStream};
use rvcc::parser::Parser;

fn parse(src: &str) -> Vec<Node> {
    let stream = TokenStream::new(tokenize(src).unwrap());
    Parser::new(stream).parse().unwrap()
}

#[test]
fn same_identifier_keeps_the_same_offset_across_statements() {
    let program = parse("a = 1; a = a + 1;");
    let Node::Assign { lhs, .. } = &program[0] else { panic!() };
    let Node::LVar { offset: first } = lhs.as_ref() else { panic!() };

    let Node::Assign { lhs, .. } = &program[1] else { panic!() };
    let Node::LVar { offset: second } = lhs.as_ref() else { panic!() };

    assert_eq!(first, second);
}

#[test]
fn greater_than_is_rewritten_as_swapped_less_than() {
    let program = parse("a > b;");
    let Node::Binary { op, lhs, rhs } = &program[0] else { panic!() };
    assert_eq!(*op, BinOp::Lt);
    // a > b becomes Lt(b, a): lhs should be b's offset (8), rhs a's (4)
    let Node::LVar { offset: lhs_offset } = lhs.as_ref() else { panic!() };
    let Node::LVar { offset: rhs_offset } = rhs.as_ref() else { panic!() };
    assert_eq!(*lhs_offset, 8);
    assert_eq!(*rhs_offset, 4);
}

#[test]
fn assignment_is_right_associative() {
    let program = parse("a = b = 1;");
    let Node::Assign { rhs, .. } = &program[0] else { panic!() };
    assert!(matches!(rhs.as_ref(), Node::Assign { .. }));
}

#[test]
fn while_and_for_produce_the_same_node_shape() {
    let while_program = parse("while (1) a = 1;");
    let for_program = parse("for (;1;) a = 1;");
    let Node::For { init: wi, inc: wn, .. } = &while_program[0] else { panic!() };
    let Node::For { init: fi, inc: fn_, .. } = &for_program[0] else { panic!() };
    assert!(wi.is_none() && wn.is_none());
    assert!(fi.is_none() && fn_.is_none());
}

#[test]
fn deeply_parenthesized_expression_matches_unparenthesized_precedence() {
    let plain = parse("1+2*3;");
    let nested = parse("((((1+2*3))));");
    assert_eq!(plain, nested);
}

#[test]
fn nested_if_gets_a_distinct_label_index_from_the_outer_if() {
    let program = parse("if (1) if (2) a = 1;");
    let Node::If { end_label: outer_end, then, .. } = &program[0] else { panic!() };
    let Node::If { end_label: inner_end, .. } = then.as_ref() else { panic!() };
    assert_ne!(outer_end, inner_end);
}

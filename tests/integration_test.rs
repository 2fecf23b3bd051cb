// End-to-end tests for the Jack front end

use jackfront::errors::{CompileError, LexError, ParseError};
use jackfront::parser::{Element, Event, EventRecorder, Node, NonTerminal, TreeBuilder};
use jackfront::pipeline::Batch;
use jackfront::tokenizer::{tokenize, Token, TokenKind};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

const SQUARE_GAME: &str = r#"
/** Implements a square game. */
class SquareGame {
    field Square square; // the square of this game
    field int direction;

    constructor SquareGame new() {
        let square = Square.new(0, 0, 30);
        let direction = 0;
        return this;
    }

    method void moveSquare() {
        if (direction = 1) { do square.moveUp(); }
        if (direction = 2) { do square.moveDown(); } else { do Sys.wait(5); }
        return;
    }

    method void run() {
        var char key;
        var boolean exit;
        let exit = false;
        while (~exit) {
            let key = Keyboard.keyPressed();
            let exit = (key = 81) | (key = 140);
            let a[key - 1] = -key;
            do moveSquare();
        }
        return;
    }
}
"#;

const SQUARE: &str = r#"
class Square {
    field int x, y, size;

    constructor Square new(int ax, int ay, int asize) {
        let x = ax; let y = ay; let size = asize;
        return this;
    }

    method void moveUp() { return; }
    method void moveDown() { return; }
}
"#;

#[test]
fn test_square_game_batch() {
    init_tracing();

    let batch = Batch::new([("SquareGame", SQUARE_GAME), ("Square", SQUARE)]).unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.context().class_names(), vec!["Square", "SquareGame"]);

    let recorders = batch.parse_all(|_| EventRecorder::new()).unwrap();
    for recorder in &recorders {
        assert!(recorder.is_well_nested());
        assert_eq!(recorder.events.first(), Some(&Event::Begin(NonTerminal::Class)));
        assert_eq!(recorder.events.last(), Some(&Event::End(NonTerminal::Class)));
    }
}

#[test]
fn test_terminals_reproduce_token_stream() {
    let tokens = tokenize(SQUARE_GAME).unwrap();
    let batch = Batch::new([("SquareGame", SQUARE_GAME)]).unwrap();
    let recorder = batch.parse_unit(0, EventRecorder::new()).unwrap();

    let terminals: Vec<Token> = recorder.terminals().into_iter().cloned().collect();
    assert_eq!(terminals, tokens);
}

#[test]
fn test_call_qualifiers_follow_batch_classes() {
    let batch = Batch::new([("SquareGame", SQUARE_GAME), ("Square", SQUARE)]).unwrap();
    let tree = batch
        .parse_unit(0, TreeBuilder::new())
        .unwrap()
        .finish()
        .unwrap();

    let mut qualifiers = Vec::new();
    collect_qualifiers(&tree, &mut qualifiers);
    assert_eq!(
        qualifiers,
        vec![
            ("Square".to_string(), NonTerminal::ClassName),
            ("square".to_string(), NonTerminal::VarName),
            ("square".to_string(), NonTerminal::VarName),
            // not declared in this batch
            ("Sys".to_string(), NonTerminal::VarName),
            ("Keyboard".to_string(), NonTerminal::VarName),
        ]
    );
}

fn collect_qualifiers(node: &Node, out: &mut Vec<(String, NonTerminal)>) {
    if node.kind == NonTerminal::SubroutineCall {
        // unqualified calls start with the subroutine name itself
        if let Some(Element::Node(first)) = node.children.first() {
            let name = first.tokens()[0].text().to_string();
            out.push((name, first.kind));
        }
    }
    for child in node.nodes() {
        collect_qualifiers(child, out);
    }
}

#[test]
fn test_unit_order_does_not_matter() {
    let caller = "class A { function void f() { do B.g(); return; } }";
    let callee = "class B { function void g() { return; } }";

    for batch in [
        Batch::new([("A", caller), ("B", callee)]).unwrap(),
        Batch::new([("B", callee), ("A", caller)]).unwrap(),
    ] {
        let index = batch.units().iter().position(|u| u.name == "A").unwrap();
        let tree = batch
            .parse_unit(index, TreeBuilder::new())
            .unwrap()
            .finish()
            .unwrap();
        let call = tree.find(NonTerminal::SubroutineCall).unwrap();
        assert_eq!(call.nodes().next().unwrap().kind, NonTerminal::ClassName);
    }
}

#[test]
fn test_comment_spanning_lines() {
    let source = "class A { /* one\n two\n three */ field int x; }";
    let tokens = tokenize(source).unwrap();
    assert_eq!(tokens.len(), 8);
    assert!(tokens.iter().all(|t| !t.is(TokenKind::Whitespace)));
}

#[test]
fn test_unterminated_string_reports_unit_and_line() {
    let err = Batch::new([("A", "class A {\n  let s = \"open;\n}")]).unwrap_err();
    assert_eq!(
        err,
        CompileError::Lex {
            unit: "A".to_string(),
            source: LexError::UnterminatedString { line: 2 },
        }
    );
    assert_eq!(err.to_string(), "A: unterminated string constant on line 2");
}

#[test]
fn test_no_extractor_for_unknown_character() {
    let err = tokenize("class A { # }").unwrap_err();
    assert_eq!(err, LexError::NoExtractor { lookahead: '#', line: 1 });
}

#[test]
fn test_parse_error_names_unit() {
    let source = "class Broken { method void f() { let = 1; } }";
    let batch = Batch::new([("Broken", source)]).unwrap();
    let err = batch.parse_unit(0, EventRecorder::new()).unwrap_err();
    assert_eq!(err.unit(), Some("Broken"));
    assert_eq!(
        err,
        CompileError::Parse {
            unit: "Broken".to_string(),
            source: ParseError::UnexpectedToken {
                expected: "identifier".to_string(),
                found: Token::symbol('='),
            },
        }
    );
}

#[test]
fn test_visitor_by_reference() {
    let batch = Batch::new([("A", "class A { }")]).unwrap();
    let mut recorder = EventRecorder::new();
    batch.parse_unit(0, &mut recorder).unwrap();
    assert_eq!(recorder.events.len(), 8);
}

#[test]
fn test_known_and_unknown_qualifiers() {
    let batch = Batch::new([
        ("A", "class A { function void f ( ) { } }"),
        ("B", "class B { method void g ( ) { do A . f ( ) ; do C . f ( ) ; } }"),
    ])
    .unwrap();

    let tree = batch
        .parse_unit(1, TreeBuilder::new())
        .unwrap()
        .finish()
        .unwrap();
    let mut qualifiers = Vec::new();
    collect_qualifiers(&tree, &mut qualifiers);
    assert_eq!(
        qualifiers,
        vec![
            ("A".to_string(), NonTerminal::ClassName),
            ("C".to_string(), NonTerminal::VarName),
        ]
    );
}

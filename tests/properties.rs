// Property tests for the stream, preprocessor and tokenizer

use jackfront::parser::EventRecorder;
use jackfront::pipeline::Batch;
use jackfront::stream::LookAheadStream;
use jackfront::tokenizer::{tokenize, Preprocessor, Token, TokenKind};
use proptest::prelude::*;

proptest! {
    #[test]
    fn pushback_restores_extracted_item(items in prop::collection::vec(any::<u8>(), 1..32)) {
        let mut stream = LookAheadStream::new(items.clone());
        let len = stream.len();

        let first = stream.extract().unwrap();
        stream.pushback(first);

        prop_assert_eq!(stream.len(), len);
        prop_assert_eq!(stream.peek(), Some(&items[0]));
        prop_assert_eq!(stream.collect::<Vec<_>>(), items);
    }

    #[test]
    fn lines_without_comment_markers_are_unchanged(line in "[a-zA-Z0-9 ;(){}=+*-]{0,40}") {
        let mut preprocessor = Preprocessor::new();
        prop_assert_eq!(preprocessor.preprocess(&line), line);
        prop_assert!(!preprocessor.in_comment());
    }

    #[test]
    fn integer_constants_round_trip(value in any::<u32>()) {
        let tokens = tokenize(&value.to_string()).unwrap();
        prop_assert_eq!(tokens, vec![Token::integer(value)]);
    }

    #[test]
    fn identifiers_are_single_tokens(name in "[a-zA-Z_][a-zA-Z0-9_]{0,15}") {
        let tokens = tokenize(&name).unwrap();
        prop_assert_eq!(tokens.len(), 1);
        let expected = if tokens[0].is(TokenKind::Keyword) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        prop_assert_eq!(tokens[0].kind(), expected);
        prop_assert_eq!(tokens[0].text(), name.as_str());
    }

    #[test]
    fn string_constants_keep_their_content(content in "[a-zA-Z0-9 .,;:!?+*-]{0,30}") {
        let tokens = tokenize(&format!("\"{}\"", content)).unwrap();
        prop_assert_eq!(tokens, vec![Token::string(&content)]);
    }

    #[test]
    fn parsed_units_are_well_nested(fields in prop::collection::vec("[a-z][a-z0-9]{0,6}", 1..6)) {
        let body: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(i, name)| format!("field int f{}{};", i, name))
            .collect();
        let source = format!("class C {{ {} }}", body.join(" "));

        let batch = Batch::new([("C", source)]).unwrap();
        let recorder = batch.parse_unit(0, EventRecorder::new()).unwrap();
        prop_assert!(recorder.is_well_nested());
    }
}

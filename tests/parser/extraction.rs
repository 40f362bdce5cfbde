//! Integration tests for keyword extraction

use delve_foundation::{CommandKind, ErrorKind};
use delve_parser::extract_command;
use proptest::prelude::*;

#[test]
fn every_keyword_is_recognised() {
    for command in CommandKind::PRIORITY {
        let parsed = extract_command(&format!("{} something", command.keyword())).unwrap();
        assert_eq!(parsed.command, command);
        assert_eq!(parsed.remainder, "something");
    }
}

#[test]
fn earlier_keyword_wins_regardless_of_position() {
    // "look" precedes "attack" in priority even though it appears later.
    let parsed = extract_command("attack and look around").unwrap();
    assert_eq!(parsed.command, CommandKind::Look);
    assert_eq!(parsed.remainder, "around");
}

#[test]
fn xyzzy_is_unknown() {
    let err = extract_command("xyzzy").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownCommand(ref s) if s == "xyzzy"));
}

#[test]
fn keyword_prefix_of_longer_word_is_not_a_command() {
    assert!(extract_command("mover").is_err());
    assert!(extract_command("dropped").is_err());
}

proptest! {
    #[test]
    fn sentences_without_keywords_are_unknown(sentence in "[b-k ]{0,30}") {
        // No keyword can be spelled from these letters.
        let err = extract_command(&sentence).unwrap_err();
        prop_assert!(err.is_resolution());
    }

    #[test]
    fn case_and_padding_do_not_matter(
        command in prop::sample::select(CommandKind::PRIORITY.to_vec()),
        upper in any::<bool>(),
        pad in 0usize..4,
    ) {
        let keyword = if upper {
            command.keyword().to_uppercase()
        } else {
            command.keyword().to_string()
        };
        let sentence = format!("{}{keyword} the thing{}", " ".repeat(pad), " ".repeat(pad));
        let parsed = extract_command(&sentence).unwrap();
        prop_assert_eq!(parsed.command, command);
        prop_assert_eq!(parsed.remainder, "the thing");
    }
}

//! Protocol tests - wire text for every message kind

use tetrecs::core::HighScore;
use tetrecs::net::{parse_message, ClientMessage, ProtocolError, ServerMessage};

#[test]
fn test_outbound_wire_text() {
    let cases = [
        (ClientMessage::List, "LIST"),
        (ClientMessage::Create("den".into()), "CREATE den"),
        (ClientMessage::Join("den".into()), "JOIN den"),
        (ClientMessage::Part, "PART"),
        (ClientMessage::Nick("zed".into()), "NICK zed"),
        (ClientMessage::Users, "USERS"),
        (ClientMessage::Start, "START"),
        (ClientMessage::Piece, "PIECE"),
        (ClientMessage::Board(vec![1, 0]), "BOARD 1 0 "),
        (ClientMessage::Scores, "SCORES"),
        (ClientMessage::Score(90), "SCORE 90"),
        (ClientMessage::Lives(0), "LIVES 0"),
        (ClientMessage::Die, "DIE"),
        (ClientMessage::HiScores, "HISCORES"),
        (ClientMessage::HiScore(HighScore::new("zed", 700)), "HISCORE zed:700"),
        (ClientMessage::Msg("hi all".into()), "MSG hi all"),
    ];
    for (message, text) in cases {
        assert_eq!(message.to_string(), text);
    }
}

#[test]
fn test_inbound_simple_keywords() {
    assert_eq!(parse_message("HOST").unwrap(), ServerMessage::Host);
    assert_eq!(parse_message("PARTED").unwrap(), ServerMessage::Parted);
    assert_eq!(parse_message("START\n").unwrap(), ServerMessage::Start);
    assert_eq!(
        parse_message("ERROR Channel exists").unwrap(),
        ServerMessage::Error("Channel exists".into())
    );
    assert!(matches!(parse_message("BOARD 1 2 3").unwrap(), ServerMessage::Board(_)));
}

#[test]
fn test_inbound_hiscores() {
    let msg = parse_message("HISCORES amy:900\nbo:800\n").unwrap();
    assert_eq!(
        msg,
        ServerMessage::HiScores(vec![HighScore::new("amy", 900), HighScore::new("bo", 800)])
    );
    assert!(matches!(
        parse_message("HISCORES amy"),
        Err(ProtocolError::MalformedEntry { keyword: "HISCORES", .. })
    ));
}

#[test]
fn test_inbound_errors() {
    assert_eq!(parse_message("   "), Err(ProtocolError::Empty));
    assert_eq!(parse_message("JOIN"), Err(ProtocolError::MissingPayload("JOIN")));
    assert!(matches!(
        parse_message("SCORES ann:x:1"),
        Err(ProtocolError::MalformedEntry { keyword: "SCORES", .. })
    ));
    assert!(matches!(
        parse_message("MSG no sender"),
        Err(ProtocolError::MalformedEntry { keyword: "MSG", .. })
    ));
    assert!(matches!(parse_message("ping"), Err(ProtocolError::UnknownKeyword(_))));
}

//! Decode a buffer shaped like one backend response burst: several message
//! kinds multiplexed over one stream.
use std::io::IsTerminal;

use protocol::{decode, DebugMessage, VariableKind};
use tracing_subscriber::EnvFilter;

// test suite "constructor"
#[ctor::ctor]
fn init() {
    let in_ci = std::env::var("CI")
        .map(|val| val == "true")
        .unwrap_or(false);

    if std::io::stderr().is_terminal() || in_ci {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .json()
            .try_init();
    }
}

#[test]
fn mixed_burst_decodes_in_wire_order() {
    let buffer = concat!(
        "MSG_LISTING;src/order.p;;;;1;27;14;3\0",
        "MSG_PARAMETERS;INPUT;pOrderNum;INTEGER;0;0;1042\0",
        "MSG_VARIABLES;cTotal;DECIMAL;?;0;0;0;99.95\n",
        "hOrder;x;Acme.Order;0;0;0;obj:7\0",
        "MSG_ARRAY;2;1;r;Jan;2;r;Feb\0",
        "MSG_INFO;ready\0",
    )
    .as_bytes();

    let messages = decode(buffer);
    assert_eq!(messages.len(), 5);

    let codes: Vec<&str> = messages
        .iter()
        .map(|msg| msg.as_ref().expect("decoding frame").code())
        .collect();
    assert_eq!(
        codes,
        vec![
            "MSG_LISTING",
            "MSG_PARAMETERS",
            "MSG_VARIABLES",
            "MSG_ARRAY",
            "MSG_INFO",
        ]
    );

    let DebugMessage::Listing(listing) = messages[0].as_ref().unwrap() else {
        panic!("expected listing");
    };
    assert_eq!(listing.file, "src/order.p");
    assert_eq!(listing.stopped_at_line, 27);
    assert_eq!(listing.breakpoints.len(), listing.breakpoint_count);

    let DebugMessage::Parameters(params) = messages[1].as_ref().unwrap() else {
        panic!("expected parameters");
    };
    assert_eq!(params.parameters[0].name, "\u{2192}pOrderNum");

    let DebugMessage::Variables(vars) = messages[2].as_ref().unwrap() else {
        panic!("expected variables");
    };
    assert_eq!(vars.variables[0].kind, VariableKind::Variable);
    assert_eq!(vars.variables[1].kind, VariableKind::Class);
    assert!(vars.variables.iter().all(|v| v.children.is_empty()));

    let DebugMessage::Array(array) = messages[3].as_ref().unwrap() else {
        panic!("expected array");
    };
    assert_eq!(array.values, vec!["Jan", "Feb"]);
}

// decoded messages get persisted by front ends; they must survive a
// serde round trip unchanged
#[test]
fn messages_round_trip_through_serde() {
    let buffer = b"MSG_CLASSINFO;c1;c2;c3;Y;Acme.Base;P;counter;INTEGER;m1;RW;12\0";
    let msg = decode(buffer)
        .pop()
        .expect("one frame")
        .expect("a well-formed frame");

    let json = serde_json::to_string(&msg).expect("serializing message");
    let back: DebugMessage = serde_json::from_str(&json).expect("deserializing message");
    assert_eq!(back, msg);
}

#[test]
fn malformed_frame_is_reported_not_fatal() {
    let buffer = b"MSG_VARIABLES;too;short\0MSG_LISTING;file.p;;;;0;8\0";
    let messages = decode(buffer);
    assert_eq!(messages.len(), 2);
    assert!(messages[0].is_err());

    let DebugMessage::Listing(listing) = messages[1].as_ref().unwrap() else {
        panic!("expected listing");
    };
    assert_eq!(listing.stopped_at_line, 8);
}

use fortuna_core::*;
use serde_json::{self as json, Value};

fn parse(json_str: &str) -> Value {
    json::from_str(json_str).expect("valid json")
}

fn sample_stream() -> Stream {
    Stream {
        id: "7d1c2f5e-3b8a-4c1e-9f0a-1b2c3d4e5f60".to_string(),
        title: "Giveaway del venerdì".to_string(),
        status: StreamStatus::Running,
        participants: vec!["65f0a1b2c3d4e5f601234567".to_string()],
        created_at: "2025-11-02T10:00:00Z".to_string(),
    }
}

/*
    Obiettivo: lo stream arricchito viene appiattito, cioè `joined` sta accanto agli altri campi
    e i campi sono in camelCase.
*/
#[test]
fn running_stream_is_flattened_with_joined_flag() {
    let rs = RunningStream::for_user(sample_stream(), "65F0A1B2C3D4E5F601234567");
    let v = parse(&json::to_string(&rs).expect("serialize"));

    assert_eq!(v["id"], "7d1c2f5e-3b8a-4c1e-9f0a-1b2c3d4e5f60");
    assert_eq!(v["status"], "running");
    assert_eq!(v["createdAt"], "2025-11-02T10:00:00Z");
    assert_eq!(v["participants"][0], "65f0a1b2c3d4e5f601234567");
    assert_eq!(v["joined"], true);
    assert!(v.get("version").is_none());
}

#[test]
fn running_streams_response_shape() {
    let resp = RunningStreamsResponse {
        success: true,
        streams: vec![RunningStream::for_user(sample_stream(), "someone-else")],
    };
    let v = parse(&json::to_string(&resp).expect("serialize"));
    assert_eq!(v["success"], true);
    assert_eq!(v["streams"][0]["joined"], false);

    let back: RunningStreamsResponse = json::from_str(&v.to_string()).expect("deserialize");
    assert_eq!(back, resp);
}

/*
    La risposta dei partecipanti deve essere leggibile anche se il server omette l'array.
*/
#[test]
fn participants_response_defaults_missing_roster() {
    let raw = serde_json::json!({
        "success": true,
        "stream": { "id": "s1", "title": "t", "status": "ended" }
    });
    let resp: ParticipantsResponse = json::from_value(raw).expect("deserialize");
    assert!(resp.stream.participants.is_empty());
    assert_eq!(resp.stream.status, StreamStatus::Ended);
}

#[test]
fn stream_user_uses_camel_case() {
    let u = StreamUser {
        id: "u1".to_string(),
        name: "anna".to_string(),
        upi: "anna@okbank".to_string(),
        joined_at: "2025-11-02T10:20:30Z".to_string(),
    };
    let v = parse(&json::to_string(&u).expect("serialize"));
    assert_eq!(v["joinedAt"], "2025-11-02T10:20:30Z");
    assert_eq!(v["upi"], "anna@okbank");
}

#[test]
fn participants_request_body() {
    let v = parse(&json::to_string(&ParticipantsRequest { id: "s1".into() }).unwrap());
    assert_eq!(v, serde_json::json!({ "id": "s1" }));
}

#[test]
fn error_body_is_unsuccessful() {
    let v = parse(&json::to_string(&ErrorBody::new("Invalid token")).unwrap());
    assert_eq!(v, serde_json::json!({ "success": false, "message": "Invalid token" }));
}

#[test]
fn unknown_status_is_rejected() {
    let err = json::from_str::<StreamStatus>("\"paused\"");
    assert!(err.is_err());
    assert_eq!(StreamStatus::parse("paused"), None);
    assert_eq!(StreamStatus::parse(StreamStatus::Upcoming.as_str()), Some(StreamStatus::Upcoming));
}

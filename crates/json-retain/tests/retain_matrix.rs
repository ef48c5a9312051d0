//! Decode/encode matrix for partial-schema retention: round-trip fidelity,
//! mutation overlay, idempotence, and error reporting.

use json_retain::{DecodeError, EncodeError, Retain, UnknownFieldStore};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Geo {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Article {
    title: String,
    slug: String,
    views: u64,
    location: Option<Geo>,
    tags: Vec<String>,
    extra: UnknownFieldStore,
}

json_retain::retain! {
    Article {
        store: extra,
        fields: {
            "title" => title,
            "slug" => slug,
            "views" => views,
            "location" => location,
            "tags" => tags,
        },
    }
}

fn roundtrip(payload: Value) -> Value {
    let mut article: Article = json_retain::from_value(payload).expect("decode must succeed");
    article.encode_json_value().expect("encode must succeed")
}

// ---------------------------------------------------------------------------
// round-trip fidelity
// ---------------------------------------------------------------------------

#[test]
fn roundtrip_known_fields_only() {
    let payload = json!({
        "title": "T",
        "slug": "t",
        "views": 12,
        "location": {"lat": 0.5, "lon": 1.5},
        "tags": ["a"],
    });
    assert_eq!(roundtrip(payload.clone()), payload);
}

#[test]
fn roundtrip_unknown_fields_only() {
    let payload = json!({"author":"kim","published":true,"revision":3});
    let out = roundtrip(payload);
    // Unknown keys are verbatim; bound keys appear with current (default)
    // field values since encode writes every binding into the store.
    assert_eq!(out["author"], json!("kim"));
    assert_eq!(out["published"], json!(true));
    assert_eq!(out["revision"], json!(3));
    assert_eq!(out["title"], json!(""));
    assert_eq!(out["tags"], json!([]));
}

#[test]
fn roundtrip_mixed_payload() {
    let payload = json!({
        "title": "Contact Us",
        "slug": "contact",
        "views": 881,
        "location": {"lat": 59.91, "lon": 10.75},
        "tags": ["help", "forms"],
        "icon": "email",
        "sidebar": {"widgets": [{"kind": "search"}, {"kind": "tags"}]},
    });
    assert_eq!(roundtrip(payload.clone()), payload);
}

#[test]
fn roundtrip_via_bytes() {
    let text = r#"{"title":"T","legacy_id":"a9f"}"#;
    let mut article: Article = json_retain::from_str(text).unwrap();
    let bytes = article.encode_json().unwrap();
    let reparsed: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(reparsed["title"], json!("T"));
    assert_eq!(reparsed["legacy_id"], json!("a9f"));
}

// ---------------------------------------------------------------------------
// mutation overlay
// ---------------------------------------------------------------------------

#[test]
fn mutated_field_shows_up_at_its_wire_key() {
    let mut article: Article =
        json_retain::from_str(r#"{"title":"Contact Us","slug":"contact","icon":"email"}"#)
            .unwrap();
    article.slug = "contact-us".to_string();

    let out = article.encode_json_value().unwrap();
    // Payload keys plus the remaining bound keys (views, location, tags).
    assert_eq!(out.as_object().unwrap().len(), 6);
    assert_eq!(out["title"], json!("Contact Us"));
    assert_eq!(out["slug"], json!("contact-us"));
    assert_eq!(out["icon"], json!("email"));
}

#[test]
fn scenario_title_slug_icon_with_exact_schema() {
    // The schema types exactly the payload's known keys, so the output key
    // set matches the input key set.
    #[derive(Debug, Default)]
    struct MenuItem {
        title: String,
        slug: String,
        rest: UnknownFieldStore,
    }

    json_retain::retain! {
        MenuItem {
            store: rest,
            fields: {
                "title" => title,
                "slug" => slug,
            },
        }
    }

    let mut item: MenuItem =
        json_retain::from_str(r#"{"title":"Contact Us","slug":"contact","icon":"email"}"#)
            .unwrap();
    assert_eq!(item.title, "Contact Us");
    assert_eq!(item.slug, "contact");

    item.slug = "contact-us".to_string();
    let out = item.encode_json_value().unwrap();
    assert_eq!(
        out,
        json!({"title":"Contact Us","slug":"contact-us","icon":"email"})
    );
}

#[test]
fn mutating_nested_typed_field_overlays_whole_value() {
    let mut article: Article = json_retain::from_str(
        r#"{"location":{"lat":1.0,"lon":2.0},"timezone":"UTC"}"#,
    )
    .unwrap();
    article.location = Some(Geo { lat: 3.5, lon: 4.5 });
    let out = article.encode_json_value().unwrap();
    assert_eq!(out["location"], json!({"lat":3.5,"lon":4.5}));
    assert_eq!(out["timezone"], json!("UTC"));
}

// ---------------------------------------------------------------------------
// idempotence
// ---------------------------------------------------------------------------

#[test]
fn decode_encode_decode_yields_identical_state() {
    let text = r#"{"title":"T","slug":"t","views":4,"flags":{"beta":true}}"#;
    let mut first: Article = json_retain::from_str(text).unwrap();
    let encoded = first.encode_json().unwrap();
    let second: Article = json_retain::from_slice(&encoded).unwrap();
    assert_eq!(first, second);
}

#[test]
fn repeated_encode_is_stable() {
    let mut article: Article =
        json_retain::from_str(r#"{"title":"T","x":[1,2]}"#).unwrap();
    let a = article.encode_json_value().unwrap();
    let b = article.encode_json_value().unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// decode errors
// ---------------------------------------------------------------------------

#[test]
fn top_level_array_is_rejected() {
    let err = json_retain::from_str::<Article>(r#"[{"title":"T"}]"#).unwrap_err();
    assert!(matches!(err, DecodeError::NotAnObject(_)));
}

#[test]
fn top_level_scalar_is_rejected() {
    for text in [r#""hello""#, "true", "null", "3.2"] {
        let err = json_retain::from_str::<Article>(text).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject(_)), "input: {text}");
    }
}

#[test]
fn malformed_payload_is_rejected() {
    let err = json_retain::from_str::<Article>(r#"{"title": }"#).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)));
}

#[test]
fn field_error_names_the_offending_key() {
    let err = json_retain::from_str::<Article>(r#"{"tags":"not-a-list"}"#).unwrap_err();
    match &err {
        DecodeError::Field { key, .. } => assert_eq!(*key, "tags"),
        other => panic!("expected field error, got {other:?}"),
    }
    assert!(err.to_string().contains("tags"));
}

#[test]
fn null_into_optional_field_is_fine_but_not_into_required() {
    let article: Article = json_retain::from_str(r#"{"location":null}"#).unwrap();
    assert_eq!(article.location, None);

    let err = json_retain::from_str::<Article>(r#"{"title":null}"#).unwrap_err();
    assert!(matches!(err, DecodeError::Field { key: "title", .. }));
}

// ---------------------------------------------------------------------------
// encode errors
// ---------------------------------------------------------------------------

#[test]
fn unrepresentable_field_fails_encode_with_key_context() {
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct Odd {
        // Non-string map keys cannot travel as a JSON object.
        index: HashMap<Vec<u8>, u32>,
        rest: UnknownFieldStore,
    }

    json_retain::retain! {
        Odd {
            store: rest,
            fields: {
                "index" => index,
            },
        }
    }

    let mut odd = Odd::default();
    odd.index.insert(vec![1, 2], 3);
    let err = odd.encode_json().unwrap_err();
    assert!(matches!(err, EncodeError::Field { key: "index", .. }));
}

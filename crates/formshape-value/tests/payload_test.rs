use formshape_value::date::parse_date_only;
use formshape_value::number::{format_js_number, parse_js_number};
use formshape_value::{DisplayValue, FileLike, FormPayload, TypedValue, WireValue};

#[test]
fn test_payload_from_pairs_keeps_order() {
    let payload: FormPayload = [
        ("email", WireValue::from("a@example.com")),
        ("avatar", WireValue::from(FileLike::new("me.png").with_size(512))),
        ("nickname", WireValue::Null),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        payload.names().collect::<Vec<_>>(),
        vec!["email", "avatar", "nickname"]
    );
    assert!(payload.get("avatar").is_file());
    assert!(!payload.get("nickname").is_present());
    assert!(!payload.contains("missing"));
}

#[test]
fn test_number_display_round_trip() {
    for value in [0.0, 1.0, -3.0, 0.5, 1234.5678, 1e-7, 2e21] {
        let text = format_js_number(value);
        assert_eq!(parse_js_number(&text), value, "round trip of {text}");
    }
}

#[test]
fn test_date_display_round_trip() {
    let date = parse_date_only("1999-01-09").unwrap();
    let display = DisplayValue::Text(date.to_form_string().unwrap());
    let wire = display.to_wire();
    assert_eq!(parse_date_only(wire.as_text().unwrap()), Some(date));
    assert_eq!(TypedValue::Date(date).to_display_string(), "1999-01-09");
}

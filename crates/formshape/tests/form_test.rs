mod common;

use chrono::NaiveDate;
use formshape::{
    AssembleError, DisplayValue, ErrorTree, FieldPath, FlatError, FormOptions, FormPayload,
    FormState, SelectOption, ShapeCache, ShapeInfo, Submission, TypeKind, TypedValue, WireValue,
    assemble, build_error_tree, coerce_to_form, coerce_value,
};
use serde_json::json;

use common::{init_tracing, profile_schema};

fn all_shapes(kind: TypeKind) -> Vec<ShapeInfo> {
    let base = ShapeInfo::of(kind);
    vec![
        base.clone(),
        base.clone().optional(),
        base.clone().nullable(),
        base.optional().nullable(),
    ]
}

#[test]
fn test_round_trip_valid_values() {
    let cases = [
        (TypeKind::Boolean, TypedValue::Bool(true)),
        (TypeKind::Boolean, TypedValue::Bool(false)),
        (TypeKind::Number, TypedValue::Number(0.0)),
        (TypeKind::Number, TypedValue::Number(-12.75)),
        (TypeKind::Number, TypedValue::Number(1e21)),
        (
            TypeKind::Date,
            TypedValue::from(NaiveDate::from_ymd_opt(2001, 12, 31).unwrap()),
        ),
        (
            TypeKind::Date,
            TypedValue::from(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()),
        ),
        (TypeKind::String, TypedValue::from("hello")),
        (TypeKind::Enum, TypedValue::from("editor")),
    ];
    for (kind, value) in cases {
        for shape in all_shapes(kind) {
            // Nullable booleans read an unchecked box back as null.
            if value == TypedValue::Bool(false) && shape.nullable {
                continue;
            }
            let wire = coerce_to_form(&value, &shape).to_wire();
            assert_eq!(
                coerce_value(&wire, &shape),
                value,
                "round trip of {value:?} through {shape:?}"
            );
        }
    }
}

#[test]
fn test_presence_law() {
    let absent = [
        WireValue::Missing,
        WireValue::Null,
        WireValue::from(""),
        WireValue::List(Vec::new()),
    ];
    for kind in [
        TypeKind::String,
        TypeKind::Enum,
        TypeKind::Number,
        TypeKind::Boolean,
        TypeKind::Date,
    ] {
        for shape in all_shapes(kind) {
            for raw in &absent {
                let expected = match kind {
                    TypeKind::Date => TypedValue::Null,
                    _ if shape.nullable => TypedValue::Null,
                    TypeKind::Boolean => TypedValue::Bool(false),
                    _ if shape.optional => TypedValue::Undefined,
                    TypeKind::Number => TypedValue::Null,
                    _ => TypedValue::from(""),
                };
                assert_eq!(coerce_value(raw, &shape), expected, "{raw:?} as {shape:?}");
            }
        }
    }
}

#[test]
fn test_coercion_edge_cases() {
    let number = ShapeInfo::of(TypeKind::Number);
    assert_eq!(coerce_value(&WireValue::from(""), &number), TypedValue::Null);
    assert!(coerce_value(&WireValue::from("not-a-number"), &number).is_nan());

    let date = ShapeInfo::of(TypeKind::Date);
    let coerced = coerce_value(&WireValue::from("2001-12-31"), &date);
    assert_eq!(
        coerced,
        TypedValue::from(NaiveDate::from_ymd_opt(2001, 12, 31).unwrap())
    );
    assert_eq!(
        coerce_to_form(&coerced, &date),
        DisplayValue::Text("2001-12-31".into())
    );
    assert!(coerce_value(&WireValue::from("2001-02-30"), &date).is_invalid_date());
}

#[test]
fn test_error_nesting_keeps_array_root_apart() {
    let errors = vec![
        FlatError::new(FieldPath::key("items"), "At least one item"),
        FlatError::new(
            FieldPath(vec!["items".into(), 0.into(), "name".into()]),
            "Required",
        ),
    ];
    let known = ["items.0", "items.1"].into_iter().collect();
    let tree = build_error_tree(errors, &known);
    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        json!({
            "items": {
                "root": { "messages": ["At least one item"] },
                "0": { "name": { "messages": ["Required"] } }
            }
        })
    );
}

#[test]
fn test_hidden_field_errors_are_promoted() {
    init_tracing();
    let mut builder = formshape::SchemaBuilder::new();
    let visible = builder.string();
    let secret = builder.string();
    let root = builder.object([("visible", visible), ("secret", secret)]);
    let schema = builder.finish(root);

    let state = FormState::new().with_live_errors(build_error_tree(
        [FlatError::at("secret", "Missing")],
        &Default::default(),
    ));
    let options = FormOptions::new().hidden("secret").label("secret", "Secret");
    let view = assemble(&schema, &state, &options, &mut ShapeCache::new()).unwrap();

    assert_eq!(view.global_errors, ["Secret: Missing"]);
    let secret = view.field("secret").unwrap();
    assert!(secret.hidden);
    assert_eq!(secret.errors, None);
    assert!(!secret.auto_focus);
    assert_eq!(view.autofocus, None);
}

#[test]
fn test_hidden_field_nested_errors_are_promoted() {
    let mut builder = formshape::SchemaBuilder::new();
    let name = builder.string();
    let city = builder.string();
    let zip = builder.string();
    let address = builder.object([("city", city), ("zip", zip)]);
    let root = builder.object([("name", name), ("address", address)]);
    let schema = builder.finish(root);

    let mut state = FormState::new();
    state.submitted_errors = Some(build_error_tree(
        [
            FlatError::at("address.city", "Required"),
            FlatError::at("address[zip]", "Invalid zip"),
        ],
        &Default::default(),
    ));
    let options = FormOptions::new().hidden("address");
    let view = assemble(&schema, &state, &options, &mut ShapeCache::new()).unwrap();

    assert_eq!(view.global_errors, ["Address: Required", "Address: Invalid zip"]);
    assert_eq!(view.field("address").unwrap().errors, None);
    assert_eq!(view.autofocus, None);
}

#[test]
fn test_requested_autofocus() {
    let schema = profile_schema();
    let options = FormOptions::new().autofocus("bio").hidden("csrfToken");
    let view = assemble(&schema, &FormState::new(), &options, &mut ShapeCache::new()).unwrap();
    assert_eq!(view.autofocus.as_deref(), Some("bio"));
    assert!(view.field("bio").unwrap().auto_focus);

    let options = FormOptions::new().autofocus("csrfToken").hidden("csrfToken");
    let view = assemble(&schema, &FormState::new(), &options, &mut ShapeCache::new()).unwrap();
    assert_eq!(view.autofocus, None);
    assert!(view.fields.iter().all(|field| !field.auto_focus));

    let options = FormOptions::new().autofocus("nickname");
    assert_eq!(
        assemble(&schema, &FormState::new(), &options, &mut ShapeCache::new()),
        Err(AssembleError::UnknownAutofocusField {
            key: "nickname".into()
        })
    );
}

#[test]
fn test_descriptors_for_profile() {
    let schema = profile_schema();
    let options: FormOptions = serde_json::from_value(json!({
        "labels": { "csrfToken": "Token" },
        "hiddenFields": ["csrfToken"],
        "multilineFields": ["bio"],
        "placeholders": { "bio": "Tell us about yourself" }
    }))
    .unwrap();
    let view = assemble(&schema, &FormState::new(), &options, &mut ShapeCache::new()).unwrap();

    let keys: Vec<&str> = view.fields.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(
        keys,
        ["name", "age", "birthday", "newsletter", "role", "bio", "contacts", "csrfToken"]
    );

    let age = view.field("age").unwrap();
    assert_eq!(age.type_kind, TypeKind::Number);
    assert!(!age.required);

    let newsletter = view.field("newsletter").unwrap();
    assert!(newsletter.required);
    assert_eq!(newsletter.value, DisplayValue::Checked(true));

    let role = view.field("role").unwrap();
    assert_eq!(
        role.options.as_deref().map(<[SelectOption]>::len),
        Some(3),
        "required enums have no empty option"
    );
    assert_eq!(role.options.as_ref().unwrap()[0], SelectOption::new("Admin", "admin"));

    let bio = view.field("bio").unwrap();
    assert!(bio.multiline);
    assert_eq!(bio.placeholder.as_deref(), Some("Tell us about yourself"));

    assert_eq!(view.field("birthday").unwrap().value, DisplayValue::Absent);
    assert_eq!(view.field("contacts").unwrap().type_kind, TypeKind::Unknown);
    assert_eq!(view.field("csrfToken").unwrap().label, "Token");
}

#[test]
fn test_rejected_submission_renders_again() {
    init_tracing();
    let schema = profile_schema();
    let payload = FormPayload::from_urlencoded(
        "name=Ada&age=forty&birthday=1815-12-10&role=editor\
         &contacts%5B0%5D%5Bemail%5D=ada%40example.com&contacts%5B1%5D%5Bemail%5D=nope",
    );
    let failure = Submission::evaluate(&schema, &payload, |values| {
        let mut errors = Vec::new();
        if values["age"].is_nan() {
            errors.push(FlatError::at("age", "Age must be a number"));
        }
        if values["contacts.1.email"] == TypedValue::from("nope") {
            errors.push(FlatError::at("contacts[1][email]", "Invalid email"));
        }
        errors.push(FlatError::at("contacts", "Only one contact allowed"));
        errors.push(FlatError::global("Please fix the errors below"));
        errors
    })
    .unwrap_err();

    assert_eq!(failure.values["newsletter"], TypedValue::Bool(false));
    assert_eq!(
        failure.values["birthday"],
        TypedValue::from(NaiveDate::from_ymd_opt(1815, 12, 10).unwrap())
    );
    assert_eq!(
        serde_json::to_value(&failure.errors).unwrap(),
        json!({
            "_global": ["Please fix the errors below"],
            "age": { "messages": ["Age must be a number"] },
            "contacts": {
                "1": { "email": { "messages": ["Invalid email"] } },
                "root": { "messages": ["Only one contact allowed"] }
            }
        })
    );

    let state = FormState::from_failure(failure);
    let view = assemble(&schema, &state, &FormOptions::new(), &mut ShapeCache::new()).unwrap();
    assert_eq!(view.global_errors, ["Please fix the errors below"]);
    assert_eq!(view.autofocus.as_deref(), Some("age"));
    assert_eq!(view.field("name").unwrap().value, DisplayValue::Text("Ada".into()));
    assert_eq!(view.field("age").unwrap().value, DisplayValue::Text("NaN".into()));
    assert_eq!(
        view.field("birthday").unwrap().value,
        DisplayValue::Text("1815-12-10".into())
    );
    assert_eq!(
        view.field("contacts").unwrap().errors,
        Some(vec!["Only one contact allowed".to_string()])
    );
    assert_eq!(view.field("newsletter").unwrap().value, DisplayValue::Checked(false));
}

#[test]
fn test_empty_state_has_no_errors() {
    let view = assemble(
        &profile_schema(),
        &FormState::new().with_live_errors(ErrorTree::new()),
        &FormOptions::new(),
        &mut ShapeCache::new(),
    )
    .unwrap();
    assert!(view.global_errors.is_empty());
    assert!(view.fields.iter().all(|field| field.errors.is_none()));
}

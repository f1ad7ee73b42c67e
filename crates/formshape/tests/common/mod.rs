use formshape::{DefaultValue, SchemaBuilder, SchemaDocument};

/// Show `tracing` output of the code under test with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A profile form exercising every field kind.
pub fn profile_schema() -> SchemaDocument {
    let mut builder = SchemaBuilder::new();
    let name = builder.string();
    let age = builder.number();
    let age = builder.nullable(age);
    let birthday = builder.date();
    let birthday = builder.optional(birthday);
    let newsletter = builder.boolean();
    let newsletter = builder.with_default(newsletter, DefaultValue::constant(true));
    let role = builder.enumeration(["admin", "editor", "viewer"]);
    let bio = builder.string();
    let bio = builder.optional(bio);
    let token = builder.string();
    let email = builder.string();
    let contact = builder.object([("email", email)]);
    let contacts = builder.array(contact);
    let root = builder.object([
        ("name", name),
        ("age", age),
        ("birthday", birthday),
        ("newsletter", newsletter),
        ("role", role),
        ("bio", bio),
        ("contacts", contacts),
        ("csrfToken", token),
    ]);
    builder.finish(root)
}

use super::SchemaTranslator;

/// V1 user account fields.
pub static USER: SchemaTranslator = SchemaTranslator::new(
    "user",
    &[
        ("id", "id"),
        ("uuid", "uuid"),
        ("username", "username"),
        ("first_name", "first_name"),
        ("last_name", "last_name"),
        ("trainer", "trainer"),
    ],
    &[],
    &["id", "uuid", "trainer"],
    &["id", "uuid", "trainer"],
);

use super::SchemaTranslator;

/// V1 social connection fields.
pub static SOCIAL_CONNECTION: SchemaTranslator = SchemaTranslator::new(
    "social connection",
    &[
        ("user", "user"),
        ("provider", "provider"),
        ("uid", "uid"),
        ("extra_data", "extra_data"),
        ("trainer", "trainer"),
    ],
    &[],
    &["user", "provider", "uid", "trainer"],
    &["trainer"],
);

use proptest::prelude::*;

/// Class identifiers shaped like `Acme.Web.ContextName`
pub fn class_identifier_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Z][a-zA-Z0-9]{0,12}", 1..4).prop_map(|parts| parts.join("."))
}

/// Ordered class lists, duplicates allowed
pub fn class_list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(class_identifier_strategy(), 0..8)
}

/// Short lowercase aliases
pub fn alias_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,10}"
}

/// Suffixes appended by generated argument resolvers
pub fn suffix_list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,4}", 0..6)
}

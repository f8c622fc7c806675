//! Profile and schema helpers against the JSON files in `tests/fixtures/`.

use rest_core::json_utils::{
    get_profile_from_json, get_value_of_key_from_json, load_json, load_map_from_resource,
    remove_key_from_json, validate_json_schema,
};
use rest_core::{ErrorKind, FixtureDir};

fn fixtures() -> FixtureDir {
    FixtureDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

#[test]
fn profiles_are_selected_by_name() {
    let profile = get_profile_from_json(&fixtures(), "members.json", "valid_member").unwrap();
    assert_eq!(
        profile,
        r#"{"email":"mail@example.com","first_name":"Ann","age":31,"newsletter":true}"#
    );
    assert_eq!(
        get_value_of_key_from_json("first_name", &profile).unwrap().as_deref(),
        Some("Ann")
    );
}

#[test]
fn profile_map_is_flat_strings() {
    let map = load_map_from_resource(&fixtures(), "/members.json", "invalid_email").unwrap();
    assert_eq!(map.len(), 4);
    assert_eq!(map["email"], "not-an-email");
    assert_eq!(map["age"], "45");
    assert_eq!(map["newsletter"], "false");

    assert!(load_map_from_resource(&fixtures(), "members.json", "with_address").is_err());
}

#[test]
fn profiles_validate_against_schema() {
    let schema = load_json(&fixtures(), "/schemas/member.json").unwrap();
    let valid = get_profile_from_json(&fixtures(), "members.json", "valid_member").unwrap();
    let invalid = get_profile_from_json(&fixtures(), "members.json", "invalid_email").unwrap();

    assert!(validate_json_schema(&valid, &schema).unwrap());
    assert!(!validate_json_schema(&invalid, &schema).unwrap());

    let without_age = remove_key_from_json("age", &valid).unwrap();
    assert!(!validate_json_schema(&without_age, &schema).unwrap());
}

#[test]
fn missing_fixture_is_a_resource_error() {
    let err = load_json(&fixtures(), "schemas/absent.json").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resource);
}

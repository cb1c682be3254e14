//! Tests for the user model and update payload.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn user() -> User {
    User {
        userid: Some("u-1".to_owned()),
        username: "demo@example.com".to_owned(),
        full_name: "Mary Smith".to_owned(),
        patient: None,
    }
}

#[rstest]
fn apply_merges_present_fields_only(user: User) {
    let merged = user.apply(&UserPatch::full_name("Mary J. Smith"));
    assert_eq!(merged.full_name, "Mary J. Smith");
    assert_eq!(merged.username, user.username);
}

#[rstest]
fn update_omits_unchanged_username(user: User) {
    let patch = UserPatch {
        username: Some(user.username.clone()),
        full_name: Some("Mary J. Smith".to_owned()),
        ..UserPatch::default()
    };
    let merged = user.apply(&patch);
    let update = UserUpdate::from_merged(&user, &merged, &patch);

    let body = serde_json::to_value(&update).expect("payload serialises");
    assert_eq!(body, json!({ "fullName": "Mary J. Smith" }));
}

#[rstest]
fn update_keeps_changed_username_and_password(user: User) {
    let patch = UserPatch::username("new@example.com").with_password("hunter2hunter2");
    let merged = user.apply(&patch);
    let update = UserUpdate::from_merged(&user, &merged, &patch);

    let body = serde_json::to_value(&update).expect("payload serialises");
    assert_eq!(
        body,
        json!({
            "username": "new@example.com",
            "fullName": "Mary Smith",
            "password": "hunter2hunter2"
        })
    );
}

#[rstest]
fn ownership_compares_patient_ids(user: User) {
    let patient_id = PatientId::new("abc123").expect("valid id");
    let owner = user.with_patient(patient_id.clone());
    let patient = Patient::fixture(patient_id);

    assert!(owner.owns_patient(&patient));
    assert!(!user.owns_patient(&patient));
}

#[rstest]
fn deserialises_server_payload() {
    let user: User = serde_json::from_value(json!({
        "userid": "u-9",
        "username": "carer@example.com",
        "fullName": "Care Giver",
        "patient": { "id": "p-1" }
    }))
    .expect("payload decodes");
    assert_eq!(user.patient_id().map(AsRef::as_ref), Some("p-1"));
}

#[rstest]
#[case(UserPatch::full_name(" "), &["fullName"])]
#[case(UserPatch::default().with_password("short"), &["password"])]
#[case(UserPatch::username(""), &["username"])]
fn validation_flags_bad_fields(
    user: User,
    #[case] patch: UserPatch,
    #[case] expected: &[&str],
) {
    let errors = validate_user(&user.apply(&patch), &patch).expect_err("must fail");
    assert_eq!(errors.fields().collect::<Vec<_>>(), expected);
}

#[rstest]
fn validation_requires_matching_confirmation(user: User) {
    let mut patch = UserPatch::default().with_password("long enough pw");
    patch.password_confirmation = Some(Zeroizing::new("something else".to_owned()));
    let errors = validate_user(&user.apply(&patch), &patch).expect_err("must fail");
    assert_eq!(errors.get("passwordConfirmation"), Some("Passwords don't match."));
}

#[rstest]
fn validation_accepts_good_edit(user: User) {
    let patch = UserPatch::full_name("Mary Jane").with_password("long enough pw");
    assert!(validate_user(&user.apply(&patch), &patch).is_ok());
}

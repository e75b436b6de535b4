//! Tests for the user value types.

use super::*;
use rstest::rstest;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[rstest]
fn user_id_round_trips_through_text() {
    let id = UserId::new(VALID_ID).expect("valid id");
    assert_eq!(id.as_ref(), VALID_ID);
    assert_eq!(id.as_uuid().to_string(), VALID_ID);
    assert_eq!(String::from(id), VALID_ID);
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_bad_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_deserialises_through_validation() {
    let parsed: Result<UserId, _> = serde_json::from_str("\"nope\"");
    assert!(parsed.is_err());
}

#[rstest]
fn user_name_is_trimmed() {
    let name = UserName::new("  Ada Lovelace ").expect("valid name");
    assert_eq!(name.as_ref(), "Ada Lovelace");
}

#[rstest]
#[case("")]
#[case("   ")]
fn user_name_rejects_blank(#[case] raw: &str) {
    assert_eq!(UserName::new(raw), Err(UserValidationError::EmptyName));
}

#[rstest]
fn user_name_length_is_bounded() {
    assert!(UserName::new("a".repeat(USER_NAME_MAX)).is_ok());
    assert_eq!(
        UserName::new("a".repeat(USER_NAME_MAX + 1)),
        Err(UserValidationError::NameTooLong { max: USER_NAME_MAX })
    );
}

#[rstest]
#[case("ada@example.com")]
#[case("Ada@Example.com")]
#[case("  ADA@EXAMPLE.COM\t")]
fn case_variants_of_one_email_are_equal(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email, EmailAddress::new("ada@example.com").expect("valid email"));
    assert_eq!(email.as_ref(), "ada@example.com");
}

#[rstest]
#[case("ada")]
#[case("ada@example")]
#[case("ada@@example.com")]
#[case("a da@example.com")]
#[case("@example.com")]
fn malformed_emails_are_rejected(#[case] raw: &str) {
    assert_eq!(EmailAddress::new(raw), Err(UserValidationError::InvalidEmail));
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_emails_are_rejected(#[case] raw: &str) {
    assert_eq!(EmailAddress::new(raw), Err(UserValidationError::EmptyEmail));
}

#[rstest]
fn email_length_is_bounded() {
    let local = "a".repeat(EMAIL_MAX);
    assert_eq!(
        EmailAddress::new(format!("{local}@example.com")),
        Err(UserValidationError::EmailTooLong { max: EMAIL_MAX })
    );
}

#[rstest]
#[case("")]
#[case("  ")]
fn session_token_rejects_blank(#[case] raw: &str) {
    assert!(matches!(
        SessionToken::new(raw),
        Err(UserValidationError::EmptySessionToken)
    ));
}

#[rstest]
fn session_token_keeps_exact_value_and_hides_it_in_debug() {
    let token = SessionToken::new(" opaque ").expect("non-blank token");
    assert_eq!(token.as_str(), " opaque ");
    assert_eq!(format!("{token:?}"), "SessionToken(..)");
}

#[rstest]
fn generated_tokens_are_distinct() {
    assert_ne!(SessionToken::generate(), SessionToken::generate());
}

#[rstest]
fn registered_user_exposes_its_context() {
    let name = UserName::new("Ada").expect("valid name");
    let user = User::register(
        NewUser {
            name: name.clone(),
            email: EmailAddress::new("ada@example.com").expect("valid email"),
        },
        SessionToken::generate(),
    );

    let context = user.context();

    assert_eq!(context.user_id(), user.id());
    assert_eq!(context.name(), &name);
    assert!(user.session_token().is_some());
}

use super::*;

// =============================================================
// Email shape
// =============================================================

#[test]
fn email_shape_accepts_common_addresses() {
    assert!(looks_like_email("a@b.com"));
    assert!(looks_like_email("first.last@sub.example.org"));
}

#[test]
fn email_shape_rejects_malformed_addresses() {
    for bad in ["", "plain", "@b.com", "a@b", "a@.com", "a@b.", "a @b.com", "a@ b.com"] {
        assert!(!looks_like_email(bad), "{bad} should be rejected");
    }
}

// =============================================================
// Login / register
// =============================================================

#[test]
fn login_requires_email_and_password() {
    let errors = validate_login("", "");
    assert_eq!(errors.get("email"), Some("Email is required"));
    assert_eq!(errors.get("password"), Some("Password is required"));
}

#[test]
fn login_accepts_well_formed_input() {
    assert!(validate_login("a@b.com", "secret").is_empty());
}

#[test]
fn register_reports_first_failing_rule_per_field() {
    let form = RegisterForm {
        email: "nope".to_owned(),
        username: "al".to_owned(),
        password: "123".to_owned(),
        confirm_password: "1234".to_owned(),
    };
    let errors = validate_register(&form);
    assert_eq!(errors.get("email"), Some("Email is invalid"));
    assert_eq!(errors.get("username"), Some("Username must be at least 3 characters"));
    assert_eq!(errors.get("password"), Some("Password must be at least 6 characters"));
    assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
}

#[test]
fn register_rejects_overlong_password() {
    let form = RegisterForm {
        email: "a@b.com".to_owned(),
        username: "alice".to_owned(),
        password: "x".repeat(51),
        confirm_password: "x".repeat(51),
    };
    assert_eq!(validate_register(&form).get("password"), Some("Password must be at most 50 characters"));
}

#[test]
fn register_accepts_valid_form() {
    let form = RegisterForm {
        email: "a@b.com".to_owned(),
        username: "alice".to_owned(),
        password: "secret".to_owned(),
        confirm_password: "secret".to_owned(),
    };
    assert!(validate_register(&form).is_empty());
}

// =============================================================
// Deck form
// =============================================================

#[test]
fn deck_title_is_required_after_trimming() {
    let form = DeckForm { title: "   ".to_owned(), ..DeckForm::default() };
    assert_eq!(form.validate().get("title"), Some("Title is required"));
}

#[test]
fn deck_description_is_capped() {
    let form = DeckForm { title: "Verbs".to_owned(), description: "x".repeat(501), ..DeckForm::default() };
    assert_eq!(form.validate().get("description"), Some("Description must be at most 500 characters"));
}

#[test]
fn tags_are_trimmed_and_empties_dropped() {
    assert_eq!(parse_tags(" es, verbs ,, ,grammar"), vec!["es", "verbs", "grammar"]);
    assert!(parse_tags("  ").is_empty());
}

#[test]
fn create_request_omits_blank_description_and_tags() {
    let form = DeckForm { title: "  Verbs ".to_owned(), description: "  ".to_owned(), tags: String::new(), is_public: true };
    let req = form.to_create_request();
    assert_eq!(req.title, "Verbs");
    assert!(req.description.is_none());
    assert!(req.tags.is_none());
    assert_eq!(req.is_public, Some(true));
}

#[test]
fn update_request_clears_tags_when_input_is_empty() {
    let form = DeckForm { title: "Verbs".to_owned(), ..DeckForm::default() };
    let req = form.to_update_request();
    assert_eq!(req.tags, Some(Some(Vec::new())));
    assert_eq!(req.description.as_deref(), Some(""));
}

#[test]
fn editor_prefill_round_trips_tags_through_the_input() {
    let deck: crate::net::types::DeckResponse = serde_json::from_str(
        r#"{"id":"d1","title":"Verbs","description":null,"tags":["es","verbs"],"isPublic":true,"cardCount":0,
            "owner":{"id":"u1","username":"alice"},"createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    let form = DeckForm::from_deck(&deck);

    assert_eq!(form.tags, "es, verbs");
    assert_eq!(form.description, "");
    assert!(form.is_public);
    assert_eq!(form.to_update_request().tags, Some(Some(vec!["es".to_owned(), "verbs".to_owned()])));
}

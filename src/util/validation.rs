//! Client-side form checks run before anything is sent.
//!
//! Each validator reports at most one message per field, first failing rule
//! wins. The server re-validates; these only save a round trip.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use crate::net::types::{DeckRequest, DeckResponse, UpdateDeckRequest};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 100;
const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 50;
const TITLE_MAX: usize = 255;
const DESCRIPTION_MAX: usize = 500;

/// Field name to message, in the order fields were checked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.iter().find(|(name, _)| *name == field).map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Non-space run, `@`, non-space run containing a `.` with non-space on both sides.
pub fn looks_like_email(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    chars.iter().enumerate().any(|(at, c)| {
        if *c != '@' || at == 0 || chars[at - 1].is_whitespace() {
            return false;
        }
        let domain: Vec<char> = chars[at + 1..].iter().copied().take_while(|c| !c.is_whitespace()).collect();
        domain.iter().enumerate().any(|(i, c)| *c == '.' && i >= 1 && i + 1 < domain.len())
    })
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !looks_like_email(email) {
        errors.add("email", "Email is invalid");
    }
}

pub fn validate_login(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();
    check_email(&mut errors, email);
    if password.is_empty() {
        errors.add("password", "Password is required");
    }
    errors
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

pub fn validate_register(form: &RegisterForm) -> FieldErrors {
    let mut errors = FieldErrors::default();
    check_email(&mut errors, &form.email);

    let username_len = form.username.chars().count();
    if form.username.is_empty() {
        errors.add("username", "Username is required");
    } else if username_len < USERNAME_MIN {
        errors.add("username", format!("Username must be at least {USERNAME_MIN} characters"));
    } else if username_len > USERNAME_MAX {
        errors.add("username", format!("Username must be at most {USERNAME_MAX} characters"));
    }

    let password_len = form.password.chars().count();
    if form.password.is_empty() {
        errors.add("password", "Password is required");
    } else if password_len < PASSWORD_MIN {
        errors.add("password", format!("Password must be at least {PASSWORD_MIN} characters"));
    } else if password_len > PASSWORD_MAX {
        errors.add("password", format!("Password must be at most {PASSWORD_MAX} characters"));
    }

    if form.confirm_password.is_empty() {
        errors.add("confirm_password", "Confirm your password");
    } else if form.confirm_password != form.password {
        errors.add("confirm_password", "Passwords do not match");
    }
    errors
}

/// Deck editor contents; `tags` is the raw comma-separated input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeckForm {
    pub title: String,
    pub description: String,
    pub tags: String,
    pub is_public: bool,
}

impl DeckForm {
    /// Prefill the editor from an existing deck.
    pub fn from_deck(deck: &DeckResponse) -> Self {
        Self {
            title: deck.title.clone(),
            description: deck.description.clone().unwrap_or_default(),
            tags: deck.tags.join(", "),
            is_public: deck.is_public,
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        if self.title.trim().is_empty() {
            errors.add("title", "Title is required");
        } else if self.title.chars().count() > TITLE_MAX {
            errors.add("title", format!("Title must be at most {TITLE_MAX} characters"));
        }
        if self.description.chars().count() > DESCRIPTION_MAX {
            errors.add("description", format!("Description must be at most {DESCRIPTION_MAX} characters"));
        }
        errors
    }

    pub fn to_create_request(&self) -> DeckRequest {
        let tags = parse_tags(&self.tags);
        let description = self.description.trim();
        DeckRequest {
            title: self.title.trim().to_owned(),
            description: (!description.is_empty()).then(|| description.to_owned()),
            tags: (!tags.is_empty()).then_some(tags),
            is_public: Some(self.is_public),
        }
    }

    /// Full replacement of the editable fields; an empty tag input clears tags.
    pub fn to_update_request(&self) -> UpdateDeckRequest {
        UpdateDeckRequest {
            title: Some(self.title.trim().to_owned()),
            description: Some(self.description.trim().to_owned()),
            tags: Some(Some(parse_tags(&self.tags))),
            is_public: Some(self.is_public),
        }
    }
}

/// Split a comma-separated tag input, trimming and dropping empties.
pub fn parse_tags(input: &str) -> Vec<String> {
    input.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_owned).collect()
}

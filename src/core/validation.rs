//! Client-side form validation
//!
//! Field-level checks run before anything is sent. A failed check blocks
//! submission and is shown next to the offending field.

/// Minimum password length accepted by the register and reset forms
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Form field a validation error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Title,
    Content,
}

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty
    Required(Field),
    /// Email is missing `@` or a dot
    InvalidEmail,
    /// Password shorter than the minimum
    PasswordTooShort { min: usize },
    /// Confirmation does not match the password
    PasswordMismatch,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Required(field) => {
                let label = match field {
                    Field::Name => "Name",
                    Field::Email => "Email",
                    Field::Password => "Password",
                    Field::ConfirmPassword => "Password confirmation",
                    Field::Title => "Title",
                    Field::Content => "Content",
                };
                write!(f, "{} is required", label)
            }
            ValidationError::InvalidEmail => write!(f, "Please enter a valid email"),
            ValidationError::PasswordTooShort { min } => {
                write!(f, "Password must be at least {} characters", min)
            }
            ValidationError::PasswordMismatch => write!(f, "Passwords do not match"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validation result keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<(Field, ValidationError)>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record the outcome of a single field check
    pub fn check(&mut self, field: Field, outcome: Result<(), ValidationError>) {
        if let Err(error) = outcome {
            self.errors.push((field, error));
        }
    }

    /// First error for `field`, rendered for display
    pub fn message_for(&self, field: Field) -> Option<String> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, e)| e.to_string())
    }

    pub fn first_message(&self) -> Option<String> {
        self.errors.first().map(|(_, e)| e.to_string())
    }

    /// Convert to Result, keeping every error
    pub fn into_result(self) -> Result<(), ValidationResult> {
        if self.is_valid() { Ok(()) } else { Err(self) }
    }
}

pub fn validate_required(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    validate_required(Field::Email, value)?;
    let value = value.trim();
    if !value.contains('@') || !value.contains('.') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Password rules for new passwords (register and reset)
pub fn validate_new_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required(Field::Password));
    }
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_confirmation(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if confirmation.is_empty() {
        return Err(ValidationError::Required(Field::ConfirmPassword));
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Login form: both fields required, email well-formed
pub fn validate_login(email: &str, password: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.check(Field::Email, validate_email(email));
    if password.is_empty() {
        result.check(Field::Password, Err(ValidationError::Required(Field::Password)));
    }
    result
}

/// Forgot-password form: a well-formed email
pub fn validate_forgot_password(email: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.check(Field::Email, validate_email(email));
    result
}

pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirmation: &str,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.check(Field::Name, validate_required(Field::Name, name));
    result.check(Field::Email, validate_email(email));
    result.check(Field::Password, validate_new_password(password));
    result.check(
        Field::ConfirmPassword,
        validate_confirmation(password, confirmation),
    );
    result
}

pub fn validate_password_reset(password: &str, confirmation: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.check(Field::Password, validate_new_password(password));
    result.check(
        Field::ConfirmPassword,
        validate_confirmation(password, confirmation),
    );
    result
}

/// Article form: title and content must not be blank
pub fn validate_article(title: &str, content: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.check(Field::Title, validate_required(Field::Title, title));
    result.check(Field::Content, validate_required(Field::Content, content));
    result
}

/// Whether the article submit control is enabled
pub fn can_submit_article(title: &str, content: &str, busy: bool) -> bool {
    !busy && validate_article(title, content).is_valid()
}

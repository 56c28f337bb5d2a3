use secrecy::{ExposeSecret, Secret};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    CurrentPassword,
    NewPassword,
    NewPasswordCheck,
}

/// Transient input state of the change-password form. Mutated on every
/// keystroke; reset to all-empty only after a successful submission.
#[derive(Default)]
pub struct ChangePasswordForm {
    pub current_password: Option<Secret<String>>,
    pub new_password: Option<Secret<String>>,
    pub new_password_check: Option<Secret<String>>,
}

impl ChangePasswordForm {
    pub fn set(&mut self, field: FormField, value: String) {
        let value = if value.is_empty() {
            None
        } else {
            Some(Secret::new(value))
        };
        match field {
            FormField::CurrentPassword => self.current_password = value,
            FormField::NewPassword => self.new_password = value,
            FormField::NewPasswordCheck => self.new_password_check = value,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_password.is_some()
            && self.new_password.is_some()
            && self.new_password_check.is_some()
    }

    /// `Some(true)` if both new-password fields are present and equal,
    /// `Some(false)` if present and unequal, `None` if either is missing.
    pub fn new_passwords_match(&self) -> Option<bool> {
        match (&self.new_password, &self.new_password_check) {
            (Some(new), Some(check)) => Some(new.expose_secret() == check.expose_secret()),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

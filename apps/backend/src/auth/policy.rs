//! Password strength policy applied at signup.

/// Minimum length plus required character classes. Carried on
/// `SecurityConfig` so the pipeline never hard-codes a policy.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }
}

impl PasswordPolicy {
    /// Check a candidate password, returning the field message on failure.
    pub fn check(&self, password: &str) -> Result<(), String> {
        let long_enough = password.chars().count() >= self.min_length;
        let has_uppercase = !self.require_uppercase || password.chars().any(|c| c.is_uppercase());
        let has_lowercase = !self.require_lowercase || password.chars().any(|c| c.is_lowercase());
        let has_digit = !self.require_digit || password.chars().any(|c| c.is_ascii_digit());
        let has_special =
            !self.require_special || password.chars().any(|c| !c.is_alphanumeric());

        if long_enough && has_uppercase && has_lowercase && has_digit && has_special {
            Ok(())
        } else {
            Err(self.describe())
        }
    }

    /// Human-readable statement of the policy, used as the validation message.
    fn describe(&self) -> String {
        let mut classes = Vec::new();
        if self.require_uppercase {
            classes.push("an uppercase letter");
        }
        if self.require_lowercase {
            classes.push("a lowercase letter");
        }
        if self.require_digit {
            classes.push("a digit");
        }
        if self.require_special {
            classes.push("a special character");
        }

        if classes.is_empty() {
            format!("Password must be at least {} characters long", self.min_length)
        } else {
            format!(
                "Password must be at least {} characters long and contain {}",
                self.min_length,
                classes.join(", ")
            )
        }
    }
}

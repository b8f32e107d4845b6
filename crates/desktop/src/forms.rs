//! Text-field state for the feedback and account forms. Neither form talks
//! to a backend; submissions are only logged.

pub const FEEDBACK_THANKS: &str = "Thank you for your feedback!";

#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    pub email: String,
    pub message: String,
    thanked: bool,
}

impl FeedbackForm {
    pub fn set_email(&mut self, email: String) {
        self.email = email;
        self.thanked = false;
    }

    pub fn set_message(&mut self, message: String) {
        self.message = message;
        self.thanked = false;
    }

    /// Both fields are required.
    pub fn can_submit(&self) -> bool {
        !self.email.trim().is_empty() && !self.message.trim().is_empty()
    }

    /// Clear the fields and show the thank-you line. Returns false, leaving
    /// everything as it was, when a field is blank.
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        log::info!(
            "Feedback submitted by {} ({} chars)",
            self.email.trim(),
            self.message.trim().chars().count()
        );
        self.email.clear();
        self.message.clear();
        self.thanked = true;
        true
    }

    pub fn thanks(&self) -> Option<&'static str> {
        self.thanked.then_some(FEEDBACK_THANKS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialProvider {
    Facebook,
    Google,
}

impl SocialProvider {
    pub const ALL: [SocialProvider; 2] = [SocialProvider::Facebook, SocialProvider::Google];

    pub fn label(self) -> &'static str {
        match self {
            SocialProvider::Facebook => "Login with Facebook",
            SocialProvider::Google => "Login with Google",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordField {
    Password,
    Confirm,
}

/// Login and signup share one form; signup adds the confirmation field.
#[derive(Debug, Clone, Default)]
pub struct AccountForm {
    pub signup: bool,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub show_password: bool,
    pub show_confirm: bool,
}

impl AccountForm {
    pub fn toggle_mode(&mut self) {
        self.signup = !self.signup;
        self.confirm.clear();
        self.show_confirm = false;
    }

    pub fn toggle_visible(&mut self, field: PasswordField) {
        match field {
            PasswordField::Password => self.show_password = !self.show_password,
            PasswordField::Confirm => self.show_confirm = !self.show_confirm,
        }
    }

    pub fn heading(&self) -> &'static str {
        if self.signup {
            "Signup"
        } else {
            "Login"
        }
    }

    pub fn password_placeholder(&self) -> &'static str {
        if self.signup {
            "Create password"
        } else {
            "Password"
        }
    }

    /// The prompt and link text under the submit button.
    pub fn switch_prompt(&self) -> (&'static str, &'static str) {
        if self.signup {
            ("Already have an account? ", "Login")
        } else {
            ("Don't have an account? ", "Signup")
        }
    }

    pub fn submit(&self) {
        log::debug!("{} requested for {}", self.heading(), self.email.trim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_feedback_submit_clears_and_thanks() {
        let mut form = FeedbackForm::default();
        form.set_email("a@b.c".into());
        form.set_message("Great tool".into());
        assert!(form.submit());
        assert!(form.email.is_empty());
        assert!(form.message.is_empty());
        assert_eq!(form.thanks(), Some("Thank you for your feedback!"));
    }

    #[rstest]
    #[case("", "hello")]
    #[case("a@b.c", "   ")]
    fn test_feedback_requires_both_fields(#[case] email: &str, #[case] message: &str) {
        let mut form = FeedbackForm::default();
        form.set_email(email.into());
        form.set_message(message.into());
        assert!(!form.submit());
        assert_eq!(form.email, email);
        assert_eq!(form.thanks(), None);
    }

    #[test]
    fn test_typing_hides_thanks() {
        let mut form = FeedbackForm::default();
        form.set_email("a@b.c".into());
        form.set_message("hi".into());
        form.submit();
        form.set_email("x".into());
        assert_eq!(form.thanks(), None);
    }

    #[test]
    fn test_account_toggle_mode() {
        let mut form = AccountForm::default();
        assert_eq!(form.heading(), "Login");
        assert_eq!(form.password_placeholder(), "Password");
        assert_eq!(form.switch_prompt(), ("Don't have an account? ", "Signup"));

        form.confirm = "secret".into();
        form.show_confirm = true;
        form.toggle_mode();
        assert_eq!(form.heading(), "Signup");
        assert_eq!(form.password_placeholder(), "Create password");
        assert_eq!(form.switch_prompt(), ("Already have an account? ", "Login"));
        assert!(form.confirm.is_empty());
        assert!(!form.show_confirm);
    }

    #[test]
    fn test_password_visibility_is_per_field() {
        let mut form = AccountForm::default();
        form.toggle_visible(PasswordField::Password);
        assert!(form.show_password);
        assert!(!form.show_confirm);
        form.toggle_visible(PasswordField::Confirm);
        form.toggle_visible(PasswordField::Password);
        assert!(!form.show_password);
        assert!(form.show_confirm);
    }
}

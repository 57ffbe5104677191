//! Structural validation for the Parameters-tab admin forms.

use std::sync::LazyLock;

use regex::Regex;

/// Standard `local@domain.tld` shape, same pattern the login backend expects.
/// Compiled once; the pattern is a constant.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// New-user form: credentials plus the set of tabs the account may see.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewUserForm {
    pub site: String,
    pub email: String,
    pub password: String,
    pub show_display: bool,
    pub show_create_update: bool,
    pub show_send_file: bool,
    pub show_jobnumbers_management: bool,
    pub show_parameters: bool,
}

impl NewUserForm {
    pub fn any_tab_selected(&self) -> bool {
        self.show_display
            || self.show_create_update
            || self.show_send_file
            || self.show_jobnumbers_management
            || self.show_parameters
    }

    /// Valid iff at least one tab flag is set, a site is selected, the email
    /// is well-formed, and the password is non-empty.
    pub fn is_valid(&self) -> bool {
        self.any_tab_selected()
            && !self.site.is_empty()
            && EMAIL_RE.is_match(&self.email)
            && !self.password.is_empty()
    }
}

/// New-site form: 3-letter code, free-text label, 2-letter prefix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSiteForm {
    pub code: String,
    pub label: String,
    pub prefix: String,
}

impl NewSiteForm {
    pub fn is_valid(&self) -> bool {
        self.code.chars().count() == 3
            && !self.label.trim().is_empty()
            && self.prefix.chars().count() == 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_user() -> NewUserForm {
        NewUserForm {
            site: "NYC".into(),
            email: "eric@example.org".into(),
            password: "secret".into(),
            show_display: true,
            ..NewUserForm::default()
        }
    }

    #[test]
    fn valid_user_passes() {
        assert!(valid_user().is_valid());
    }

    #[test]
    fn user_requires_at_least_one_tab_flag() {
        let form = NewUserForm {
            show_display: false,
            ..valid_user()
        };
        assert!(!form.is_valid());
    }

    #[test]
    fn user_requires_site_email_and_password() {
        assert!(!NewUserForm { site: String::new(), ..valid_user() }.is_valid());
        assert!(!NewUserForm { password: String::new(), ..valid_user() }.is_valid());
        for bad_email in ["", "plainaddress", "a@b", "a b@c.org", "a@b c.org"] {
            let form = NewUserForm {
                email: bad_email.into(),
                ..valid_user()
            };
            assert!(!form.is_valid(), "accepted {bad_email:?}");
        }
    }

    #[test]
    fn site_code_and_prefix_lengths_are_exact() {
        let form = NewSiteForm {
            code: "NYC".into(),
            label: "New York".into(),
            prefix: "NY".into(),
        };
        assert!(form.is_valid());

        assert!(!NewSiteForm { code: "NY".into(), ..form.clone() }.is_valid());
        assert!(!NewSiteForm { code: "NYCX".into(), ..form.clone() }.is_valid());
        assert!(!NewSiteForm { prefix: "N".into(), ..form.clone() }.is_valid());
        assert!(!NewSiteForm { label: "  ".into(), ..form }.is_valid());
    }
}

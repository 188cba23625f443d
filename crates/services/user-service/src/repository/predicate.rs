//! Contact predicates for the hand-written existence and credential statements.

use sea_orm::Value;

/// How an account is located by its contact details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPredicate<'a> {
    /// `phone_number = $n`
    Phone(&'a str),
    /// `phone_number = $n AND email = $n+1`, the admin creation guard
    PhoneAndEmail { phone_number: &'a str, email: &'a str },
    /// `phone_number = $n OR email = $n+1`, the admin password reset path
    PhoneOrEmail { phone_number: &'a str, email: &'a str },
}

impl<'a> ContactPredicate<'a> {
    /// Render the predicate with placeholders numbered from `first`.
    ///
    /// The result is parenthesised so it can be joined with further conditions.
    pub fn render(&self, first: usize) -> (String, Vec<Value>) {
        match *self {
            ContactPredicate::Phone(phone_number) => (
                format!("(phone_number = ${})", first),
                vec![phone_number.into()],
            ),
            ContactPredicate::PhoneAndEmail {
                phone_number,
                email,
            } => (
                format!("(phone_number = ${} AND email = ${})", first, first + 1),
                vec![phone_number.into(), email.into()],
            ),
            ContactPredicate::PhoneOrEmail {
                phone_number,
                email,
            } => (
                format!("(phone_number = ${} OR email = ${})", first, first + 1),
                vec![phone_number.into(), email.into()],
            ),
        }
    }
}

//! Chat access rule.

use super::Session;

/// Outcome of trying to open the chat view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAccess {
    Granted(Session),
    /// No session: send the user to sign in instead.
    RedirectToSignIn,
}

/// Session present -> chat; absent -> sign-in.
pub fn chat_access(session: Option<Session>) -> ChatAccess {
    match session {
        Some(session) => ChatAccess::Granted(session),
        None => ChatAccess::RedirectToSignIn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;

    #[test]
    fn test_gate() {
        assert_eq!(chat_access(None), ChatAccess::RedirectToSignIn);

        let session = Session {
            user_id: "u1".to_string(),
            email: "asha@example.com".to_string(),
            full_name: None,
            preferred_language: Locale::Hi,
        };
        assert_eq!(chat_access(Some(session.clone())), ChatAccess::Granted(session));
    }
}

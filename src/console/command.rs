//! Console command parsing.

use crate::i18n::Locale;
use crate::utils::split_first_word;

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Home,
    Features,
    Chat,
    /// `None` shows the initial listing.
    Hospitals(Option<String>),
    /// `None` shows the current language.
    Lang(Option<String>),
    Login {
        email: String,
        password: String,
    },
    Signup {
        email: String,
        password: String,
        language: Option<Locale>,
        full_name: Option<String>,
    },
    Logout,
    Quit,
    /// Free text for the assistant.
    Say(String),
    /// Known command with missing arguments; carries the usage key.
    Usage(&'static str),
    Unknown(String),
}

impl Command {
    /// Parse a line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if !line.starts_with('/') {
            return Some(Self::Say(line.to_string()));
        }

        let (name, args) = split_first_word(line);
        let command = match name.to_lowercase().as_str() {
            "/help" | "/start" => Self::Help,
            "/home" => Self::Home,
            "/features" => Self::Features,
            "/chat" => Self::Chat,
            "/hospitals" => Self::Hospitals(non_empty(args)),
            "/lang" => Self::Lang(non_empty(args)),
            "/login" => parse_login(args),
            "/signup" => parse_signup(args),
            "/logout" => Self::Logout,
            "/quit" | "/exit" => Self::Quit,
            _ => Self::Unknown(name.to_string()),
        };
        Some(command)
    }
}

fn non_empty(args: &str) -> Option<String> {
    (!args.is_empty()).then(|| args.to_string())
}

fn parse_login(args: &str) -> Command {
    let (email, rest) = split_first_word(args);
    let (password, _) = split_first_word(rest);
    if email.is_empty() || password.is_empty() {
        return Command::Usage("console.usage.login");
    }
    Command::Login {
        email: email.to_string(),
        password: password.to_string(),
    }
}

/// `<email> <password> [language] [full name..]`. The third word is taken
/// as a language only if it is a supported code.
fn parse_signup(args: &str) -> Command {
    let (email, rest) = split_first_word(args);
    let (password, rest) = split_first_word(rest);
    if email.is_empty() || password.is_empty() {
        return Command::Usage("console.usage.signup");
    }

    let (maybe_code, after_code) = split_first_word(rest);
    let (language, name) = match Locale::from_code(maybe_code) {
        Some(locale) => (Some(locale), after_code),
        None => (None, rest),
    };

    Command::Signup {
        email: email.to_string(),
        password: password.to_string(),
        language,
        full_name: non_empty(name),
    }
}

//! Static screens rendered from the catalog.

use std::fmt::Write as _;

use crate::chat::{Message, Role};
use crate::i18n::{Locale, LocaleStore};

/// Feature cards, in display order.
const FEATURES: [&str; 6] = [
    "multilingual",
    "verified",
    "myths",
    "preventive",
    "alerts",
    "hospital",
];

/// Landing screen: hero text, entry points and the disclaimer.
pub fn home(locale: &LocaleStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} - {}", locale.t("hero.title"), locale.t("hero.subtitle"));
    let _ = writeln!(out, "{}", locale.t("hero.description"));
    let _ = writeln!(out, "  /chat       {}", locale.t("hero.cta.chat"));
    let _ = writeln!(out, "  /hospitals  {}", locale.t("hero.cta.hospital"));
    let _ = writeln!(out);
    out.push_str(&disclaimer(locale));
    out
}

pub fn features(locale: &LocaleStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", locale.t("features.title"));
    let _ = writeln!(out, "{}", locale.t("features.subtitle"));
    for feature in FEATURES {
        let title = format!("features.{feature}.title");
        let desc = format!("features.{feature}.desc");
        let _ = writeln!(out, "* {}: {}", locale.t(&title), locale.t(&desc));
    }
    out
}

pub fn disclaimer(locale: &LocaleStore) -> String {
    format!("{}: {}\n", locale.t("disclaimer.title"), locale.t("disclaimer.text"))
}

/// Current language plus every choice.
pub fn languages(locale: &LocaleStore) -> String {
    let active = locale.get_active();
    let mut out = format!(
        "{} {} ({})\n",
        locale.t("console.lang.current"),
        active.native_name(),
        active.code()
    );
    for choice in Locale::ALL {
        let marker = if choice == active { '*' } else { ' ' };
        let _ = writeln!(
            out,
            " {} {}  {} / {}",
            marker,
            choice.code(),
            choice.native_name(),
            choice.name()
        );
    }
    out
}

/// One chat turn as a console line.
pub fn message(msg: &Message, locale: &LocaleStore) -> String {
    let speaker = match msg.role {
        Role::Assistant => "MediBot",
        Role::User => locale.t("console.you"),
    };
    format!("[{}] {}: {}\n", msg.created_at.format("%H:%M"), speaker, msg.content)
}

/// One-line alert for a failed collaborator call.
pub fn alert(locale: &LocaleStore, error: &dyn std::fmt::Display) -> String {
    format!("{}: {}\n", locale.t("common.error"), error)
}

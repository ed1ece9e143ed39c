//! Text rendering of a hospital entry.

use std::fmt::Write as _;

use super::Hospital;
use crate::i18n::LocaleStore;

/// Services listed before the overflow marker.
const SERVICES_SHOWN: usize = 3;

/// Render `hospital` as a multi-line card in the active locale.
pub fn render_card(hospital: &Hospital, locale: &LocaleStore) -> String {
    let mut card = String::new();

    card.push_str(&hospital.name);
    if hospital.has_emergency() {
        let _ = write!(card, "  [{}]", locale.t("console.hospital.badge"));
    }
    let _ = write!(
        card,
        "\n  {}, {} - {}",
        hospital.address, hospital.district, hospital.pincode
    );
    if let Some(phone) = &hospital.phone {
        let _ = write!(card, "\n  {}: {}", locale.t("hospital.contact"), phone);
    }
    let _ = write!(card, "\n  {}", hospital.kind);

    let services = hospital.services();
    if !services.is_empty() {
        let shown = services
            .iter()
            .take(SERVICES_SHOWN)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(card, "\n  {}: {}", locale.t("hospital.services"), shown);
        if services.len() > SERVICES_SHOWN {
            let _ = write!(card, " +{}", services.len() - SERVICES_SHOWN);
        }
    }

    card
}

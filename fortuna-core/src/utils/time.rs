use time::{
    format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime,
    UtcOffset,
};

/// Restituisce l'istante corrente in UTC formattato come RFC3339 (es. "2025-11-02T12:34:56Z").
pub fn now_timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| OffsetDateTime::UNIX_EPOCH.to_string())
}

/// Rende leggibile un timestamp RFC3339 nel fuso locale (es. "02/11/2025, 13:34:56").
/// Se il fuso locale non è determinabile si usa UTC; un input non valido viene restituito così com'è.
pub fn format_joined_at(raw: &str) -> String {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    format_joined_at_with_offset(raw, offset)
}

pub fn format_joined_at_with_offset(raw: &str, offset: UtcOffset) -> String {
    let parsed = match OffsetDateTime::parse(raw, &Rfc3339) {
        Ok(dt) => dt.to_offset(offset),
        Err(_) => return raw.to_string(),
    };
    parsed
        .format(format_description!(
            "[day]/[month]/[year], [hour]:[minute]:[second]"
        ))
        .unwrap_or_else(|_| raw.to_string())
}

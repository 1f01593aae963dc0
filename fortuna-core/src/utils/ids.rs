use uuid::Uuid;

/// Genera un nuovo id (UUIDv4) come stringa.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Forma canonica di un id: senza spazi ai bordi e in minuscolo.
/// Gli id salvati e quelli decodificati dal token passano entrambi di qui prima del confronto.
pub fn canonical_id(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Vero se `id` compare in `ids` (confronto sulle forme canoniche).
/// Un id vuoto non corrisponde mai.
pub fn contains_id<S: AsRef<str>>(ids: &[S], id: &str) -> bool {
    let wanted = canonical_id(id);
    if wanted.is_empty() {
        return false;
    }
    ids.iter().any(|candidate| canonical_id(candidate.as_ref()) == wanted)
}

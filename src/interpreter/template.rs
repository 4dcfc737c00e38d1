//! `{variable}` placeholder substitution in message content.

use crate::data::Contact;

/// Replaces `{name}`, `{phone}` and `{email}` placeholders (and their
/// Portuguese aliases `{nome}` and `{telefone}`) with the contact's fields.
///
/// A placeholder whose field is missing on the contact, an unknown
/// placeholder, and an unclosed brace are all left verbatim; substitution
/// never fails.
pub fn render(template: &str, contact: &Contact) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open..];
        match after.find('}') {
            Some(close) => {
                let key = &after[1..close];
                match resolve(key, contact) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&after[..=close]),
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(after);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

fn resolve<'a>(key: &str, contact: &'a Contact) -> Option<&'a str> {
    let field = match key.trim().to_lowercase().as_str() {
        "name" | "nome" => &contact.name,
        "phone" | "telefone" => &contact.phone,
        "email" => &contact.email,
        _ => return None,
    };
    field.as_deref()
}

//! Display masking for customer contact details.
//!
//! These are cosmetic and lossy; the output is not meant to be reversible
//! or to preserve the original length.

/// Mask an email address as `f*****@d***.com`.
///
/// Keeps the first character of the local part and of the domain's first
/// label. The top-level domain is always rendered as `.com`.
pub fn mask_email(email: &str) -> String {
    if email.is_empty() {
        return String::new();
    }

    let (local, domain) = email.split_once('@').unwrap_or((email, ""));
    let local_initial: String = local.chars().take(1).collect();
    let domain_initial: String = domain
        .split('.')
        .next()
        .unwrap_or_default()
        .chars()
        .take(1)
        .collect();

    format!("{}*****@{}***.com", local_initial, domain_initial)
}

/// Mask a phone number, keeping only the last four characters.
///
/// Digits before the last four characters become `x`; separators such as
/// `+`, `-` and spaces are kept.
pub fn mask_phone(phone: &str) -> String {
    if phone.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = phone.chars().collect();
    let split = chars.len().saturating_sub(4);
    let (head, tail) = chars.split_at(split);

    head.iter()
        .map(|c| if c.is_ascii_digit() { 'x' } else { *c })
        .chain(tail.iter().copied())
        .collect()
}

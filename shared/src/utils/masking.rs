//! Helpers for keeping personal data out of logs

/// Masks the local part of an email address for logging
///
/// `jane@example.com` becomes `j***@example.com`. Input without an `@` is fully masked.
pub fn mask_email(email: &str) -> String {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

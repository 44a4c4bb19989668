//! Phone number utilities

/// Mask a phone number for logging, keeping only the last 4 digits
///
/// ```
/// use cms_shared::utils::phone::mask_phone_number;
///
/// assert_eq!(mask_phone_number("+18135555555"), "+*******5555");
/// ```
pub fn mask_phone_number(phone: &str) -> String {
    let visible_digits = 4;
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= visible_digits {
        return "*".repeat(chars.len());
    }

    let last_digits: String = chars[chars.len() - visible_digits..].iter().collect();
    if chars[0] == '+' {
        format!("+{}{}", "*".repeat(chars.len() - visible_digits - 1), last_digits)
    } else {
        format!("{}{}", "*".repeat(chars.len() - visible_digits), last_digits)
    }
}

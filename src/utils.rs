use std::fs::OpenOptions;
use std::io::Write;

/// Mask a credential for on-screen display
pub fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= 15 {
        // Too short to safely show, just show dots
        return "●".repeat(len);
    }

    let first: String = secret.chars().take(7).collect();
    let last: String = secret.chars().skip(len - 6).collect();
    format!("{first}...{last}")
}

/// Log debug message to /tmp/api-console.log
pub fn log_debug(msg: &str) {
    let _ = OpenOptions::new()
        .create(true)
        .append(true)
        .open("/tmp/api-console.log")
        .and_then(|mut f| writeln!(f, "{msg}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_short_secret() {
        assert_eq!(mask_secret("hunter2"), "●●●●●●●");
    }

    #[test]
    fn test_mask_long_secret() {
        let masked = mask_secret("sk-live-0123456789abcdef");
        assert_eq!(masked, "sk-live...abcdef");
    }

    #[test]
    fn test_mask_empty() {
        assert_eq!(mask_secret(""), "");
    }
}

//! Free-text sanitization.
//!
//! Runs before structural validation, so length limits apply to the
//! sanitized form. Identifier and secret fields are never touched; only
//! display names and notes carry free text.

use tillgate_shared::auth::{OperationRequest, RefundRequest, RegisterAccountRequest};

/// Escapes HTML-significant characters and strips control characters.
#[must_use]
pub fn sanitize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.trim().chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

fn sanitize_opt(value: &mut Option<String>) {
    if let Some(text) = value.as_deref() {
        *value = Some(sanitize_text(text));
    }
}

/// Payloads carrying free-text fields that must be sanitized in place.
pub trait Sanitize {
    /// Sanitizes all free-text fields.
    fn sanitize(&mut self);
}

impl Sanitize for OperationRequest {
    fn sanitize(&mut self) {
        sanitize_opt(&mut self.note);
    }
}

impl Sanitize for RefundRequest {
    fn sanitize(&mut self) {
        sanitize_opt(&mut self.note);
    }
}

impl Sanitize for RegisterAccountRequest {
    fn sanitize(&mut self) {
        self.display_name = sanitize_text(&self.display_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_markup() {
        assert_eq!(
            sanitize_text("<script>alert('hi')</script>"),
            "&lt;script&gt;alert(&#x27;hi&#x27;)&lt;/script&gt;"
        );
        assert_eq!(sanitize_text("a & b"), "a &amp; b");
        assert_eq!(sanitize_text(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_strips_control_characters() {
        assert_eq!(sanitize_text("a\u{0}b\u{1b}[31mc"), "ab[31mc");
        assert_eq!(sanitize_text("line1\nline2"), "line1line2");
    }

    #[test]
    fn test_trims_and_preserves_plain_text() {
        assert_eq!(sanitize_text("  table 4, receipt #18  "), "table 4, receipt #18");
        assert_eq!(sanitize_text("Front counter"), "Front counter");
    }

    #[test]
    fn test_sanitize_operation_note() {
        let mut req = OperationRequest {
            account_id: String::new(),
            kind: "credit".to_string(),
            amount: 1,
            idempotency_key: "k".to_string(),
            note: Some("<b>top-up</b>".to_string()),
        };
        req.sanitize();
        assert_eq!(req.note.as_deref(), Some("&lt;b&gt;top-up&lt;/b&gt;"));
    }

    #[test]
    fn test_sanitize_display_name() {
        let mut req = RegisterAccountRequest {
            account_id: None,
            role: "terminal".to_string(),
            display_name: "Till <1>".to_string(),
            secret: "long-enough-secret".to_string(),
        };
        req.sanitize();
        assert_eq!(req.display_name, "Till &lt;1&gt;");
    }
}

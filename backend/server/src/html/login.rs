use super::page;
use crate::gate::GateState;

const WELCOME: &str = "👋 Welcome, enter the password (the usual one 🐈)";
const PROMPT: &str = "Enter password";
const REJECTED: &str = "❌ Incorrect password";

/// Only the prompt, nothing from the dataset. A rejected visitor gets the plain
/// prompt and the error line.
pub fn login_page(state: GateState) -> String {
    let (label, error) = match state {
        GateState::Rejected => (
            PROMPT,
            format!(r#"<div class="notice error">{REJECTED}</div>"#),
        ),
        GateState::Prompt | GateState::Unlocked => (WELCOME, String::new()),
    };

    page(
        "",
        &format!(
            r#"<div class="gate">
  <form method="post" action="/login">
    <label for="password">{label}</label>
    <input id="password" name="password" type="password" autocomplete="current-password" autofocus required />
    <button type="submit">Enter</button>
  </form>
  {error}
</div>"#
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_has_no_error() {
        let html = login_page(GateState::Prompt);

        assert!(html.contains(r#"action="/login""#));
        assert!(html.contains(r#"type="password""#));
        assert!(html.contains(WELCOME));
        assert!(!html.contains(PROMPT));
        assert!(!html.contains(REJECTED));
    }

    #[test]
    fn test_rejected_shows_error() {
        let html = login_page(GateState::Rejected);

        assert!(html.contains(r#"type="password""#));
        assert!(html.contains(PROMPT));
        assert!(!html.contains(WELCOME));
        assert!(html.contains(REJECTED));
    }
}

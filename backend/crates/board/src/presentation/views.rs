//! Server-rendered pages for the board routes

use axum::response::Html;

use crate::domain::entities::Secret;

/// Escape text for safe interpolation into HTML element content
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// GET /secrets page
pub fn secrets_page(secrets: &[Secret]) -> Html<String> {
    let items: String = secrets
        .iter()
        .map(|s| format!("    <li>{}</li>\n", escape_html(&s.text)))
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Secrets</title></head>
<body>
  <h1>You've Discovered My Secrets!</h1>
  <ul>
{items}  </ul>
  <p><a href="/submit">Submit a secret</a> | <a href="/logout">Log out</a></p>
</body>
</html>"#
    ))
}

/// GET /submit page
pub fn submit_page() -> Html<String> {
    Html(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Submit a Secret</title></head>
<body>
  <h1>Share a Secret</h1>
  <form action="/submit" method="post">
    <label>Secret <input type="text" name="secret" required></label>
    <button type="submit">Submit</button>
  </form>
  <p><a href="/secrets">Back to secrets</a></p>
</body>
</html>"#
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_secrets_page_lists_posts() {
        let secrets = vec![
            Secret::new("first secret".to_string()),
            Secret::new("second secret".to_string()),
        ];
        let Html(body) = secrets_page(&secrets);
        assert!(body.contains("<li>first secret</li>"));
        assert!(body.contains("<li>second secret</li>"));
    }

    #[test]
    fn test_secrets_page_escapes_posts() {
        let secrets = vec![Secret::new("<img src=x>".to_string())];
        let Html(body) = secrets_page(&secrets);
        assert!(!body.contains("<img"));
        assert!(body.contains("&lt;img src=x&gt;"));
    }

    #[test]
    fn test_submit_page_posts_to_submit() {
        let Html(body) = submit_page();
        assert!(body.contains(r#"action="/submit""#));
        assert!(body.contains(r#"name="secret""#));
    }
}

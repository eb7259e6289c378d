//! Top-level pages

use axum::response::Html;

/// GET / - landing page
pub async fn home() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Secrets</title></head>
<body>
  <h1>Secrets</h1>
  <p>Share your secrets anonymously with the world.</p>
  <p><a href="/register">Register</a> | <a href="/login">Login</a></p>
</body>
</html>"#,
    )
}

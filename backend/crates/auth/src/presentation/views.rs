//! Server-rendered pages for the auth routes

use axum::response::Html;

/// GET /login page
pub fn login_page() -> Html<String> {
    Html(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Login</title></head>
<body>
  <h1>Login</h1>
  <form action="/login" method="post">
    <label>Email <input type="email" name="email" required></label>
    <label>Password <input type="password" name="password" required></label>
    <button type="submit">Login</button>
  </form>
  <a href="/auth/google">Sign in with Google</a>
  <p><a href="/register">Need an account? Register</a></p>
</body>
</html>"#
            .to_string(),
    )
}

/// GET /register page
pub fn register_page() -> Html<String> {
    Html(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Register</title></head>
<body>
  <h1>Register</h1>
  <form action="/register" method="post">
    <label>Email <input type="email" name="email" required></label>
    <label>Password <input type="password" name="password" required></label>
    <button type="submit">Register</button>
  </form>
  <a href="/auth/google">Sign up with Google</a>
  <p><a href="/login">Already have an account? Login</a></p>
</body>
</html>"#
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_page_posts_to_login() {
        let Html(body) = login_page();
        assert!(body.contains(r#"action="/login""#));
        assert!(body.contains(r#"name="email""#));
        assert!(body.contains(r#"name="password""#));
    }

    #[test]
    fn test_register_page_posts_to_register() {
        let Html(body) = register_page();
        assert!(body.contains(r#"action="/register""#));
        assert!(body.contains("/auth/google"));
    }
}

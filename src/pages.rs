//! Minimal inline HTML for the interactive pages. There is deliberately no
//! template engine here; these are small enough to build by hand, and the
//! data they show is already covered by the JSON endpoint and the repos.

use axum::response::Html;

use crate::{
    auth::repo::User,
    health::repo::{HealthRecord, RecordWithOwner},
};

/// Escape user-supplied text for HTML body and attribute positions.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>{body}</body></html>"
    ))
}

const NAV: &str = r#"<nav><a href="/">Home</a> <a href="/records">My records</a> <a href="/logout">Log out</a></nav>"#;

pub fn register_page() -> Html<String> {
    layout(
        "Register",
        r#"<h1>Register</h1>
<form method="post" action="/register">
  <label>Username <input name="username" required></label>
  <label>Password <input name="password" type="password" required></label>
  <button type="submit">Register</button>
</form>
<p>Already have an account? <a href="/login">Log in</a></p>"#,
    )
}

pub fn login_page() -> Html<String> {
    layout(
        "Log in",
        r#"<h1>Log in</h1>
<form method="post" action="/login">
  <label>Username <input name="username" required></label>
  <label>Password <input name="password" type="password" required></label>
  <button type="submit">Log in</button>
</form>
<p>New here? <a href="/register">Register</a></p>"#,
    )
}

// Submits the vitals as JSON; form values arrive as strings and the server
// coerces them.
const ANALYZE_FORM: &str = r#"<form id="analyze-form">
  <label>BMI <input name="bmi" required></label>
  <label>Heart rate <input name="heart_rate" required></label>
  <label>Sleep hours <input name="sleep" required></label>
  <label>Systolic BP <input name="bp" required></label>
  <button type="submit">Analyze</button>
</form>
<p id="analyze-result"></p>
<script>
document.getElementById('analyze-form').addEventListener('submit', async (ev) => {
  ev.preventDefault();
  const data = Object.fromEntries(new FormData(ev.target));
  const res = await fetch('/analyze', {
    method: 'POST',
    headers: {'Content-Type': 'application/json'},
    body: JSON.stringify(data)
  });
  const out = document.getElementById('analyze-result');
  if (!res.ok) { out.textContent = 'Analysis failed.'; return; }
  const body = await res.json();
  out.textContent = body.risk_level + ' (score ' + body.risk_score + '): ' + body.recommendation;
});
</script>"#;

pub fn home_page(username: &str) -> Html<String> {
    let body = format!(
        "{NAV}\n<h1>Welcome, {}!</h1>\n<p>Submit your vitals for a risk check.</p>\n{ANALYZE_FORM}",
        escape(username)
    );
    layout("Health Coach", &body)
}

pub fn records_page(username: &str, records: &[HealthRecord]) -> Html<String> {
    let rows: String = records
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                r.bmi,
                r.heart_rate,
                r.sleep,
                r.bp,
                r.risk_score,
                r.risk_level,
                escape(&r.timestamp)
            )
        })
        .collect();

    let table = if records.is_empty() {
        "<p>No records yet.</p>".to_string()
    } else {
        format!(
            "<table>\n<tr><th>BMI</th><th>Heart rate</th><th>Sleep</th><th>BP</th>\
<th>Risk score</th><th>Risk level</th><th>Timestamp</th></tr>\n{rows}</table>"
        )
    };

    let body = format!(
        "{NAV}\n<h1>Records for {}</h1>\n{table}",
        escape(username)
    );
    layout("My records", &body)
}

pub fn admin_page(username: &str, users: &[User], records: &[RecordWithOwner]) -> Html<String> {
    let user_rows: String = users
        .iter()
        .map(|u| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                u.id,
                escape(&u.username),
                u.role
            )
        })
        .collect();

    let record_rows: String = records
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
<td>{}</td><td>{}</td><td>{}</td></tr>\n",
                r.record.id,
                escape(&r.username),
                r.record.bmi,
                r.record.heart_rate,
                r.record.sleep,
                r.record.bp,
                r.record.risk_score,
                r.record.risk_level,
                escape(&r.record.timestamp)
            )
        })
        .collect();

    let body = format!(
        "{NAV}\n<h1>Admin panel</h1>\n<p>Signed in as {}</p>\n\
<h2>Users</h2>\n<table>\n<tr><th>ID</th><th>Username</th><th>Role</th></tr>\n{user_rows}</table>\n\
<h2>All records</h2>\n<table>\n<tr><th>ID</th><th>User</th><th>BMI</th><th>Heart rate</th>\
<th>Sleep</th><th>BP</th><th>Risk score</th><th>Risk level</th><th>Timestamp</th></tr>\n{record_rows}</table>",
        escape(username)
    );
    layout("Admin", &body)
}

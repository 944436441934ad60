//! Registration page rendering.
//!
//! The page is a single HTML document: an optional success banner, an
//! optional error banner, and the form posting to `/register`. Rendering is
//! pure; every interpolated string is escaped.

use crate::domain::{
    ADDRESS_FIELD, AGE_FIELD, NAME_FIELD, PERCENTAGE_FIELD, QUALIFICATION_FIELD, YEAR_FIELD,
};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Student Registration</title>
<style>
body { font-family: sans-serif; max-width: 32rem; margin: 2rem auto; }
label { display: block; margin-top: 0.75rem; }
input { width: 100%; padding: 0.25rem; }
button { margin-top: 1rem; }
.banner { padding: 0.5rem 0.75rem; margin-bottom: 1rem; border-radius: 4px; }
.banner-success { background: #e6f4ea; color: #1e4620; }
.banner-error { background: #fdecea; color: #611a15; }
</style>
</head>
<body>
<h1>Student Registration</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// One `<input>` on the form.
struct FormField {
    name: &'static str,
    label: &'static str,
    input_type: &'static str,
    extra: &'static str,
}

const FORM_FIELDS: [FormField; 6] = [
    FormField {
        name: NAME_FIELD,
        label: "Name",
        input_type: "text",
        extra: " required",
    },
    FormField {
        name: ADDRESS_FIELD,
        label: "Address",
        input_type: "text",
        extra: "",
    },
    FormField {
        name: AGE_FIELD,
        label: "Age",
        input_type: "number",
        extra: " required",
    },
    FormField {
        name: QUALIFICATION_FIELD,
        label: "Qualification",
        input_type: "text",
        extra: " required",
    },
    FormField {
        name: PERCENTAGE_FIELD,
        label: "Percentage",
        input_type: "number",
        extra: r#" step="0.01" required"#,
    },
    FormField {
        name: YEAR_FIELD,
        label: "Year",
        input_type: "number",
        extra: " required",
    },
];

/// Render the registration page.
///
/// `message` is shown in a success banner and `error` in an error banner;
/// either, both, or neither may be present.
///
/// # Examples
/// ```
/// use registration::inbound::http::form::render_form;
///
/// let page = render_form(None, Some("age <missing>"));
/// assert!(page.contains("age &lt;missing&gt;"));
/// assert!(page.contains(r#"action="/register""#));
/// ```
pub fn render_form(message: Option<&str>, error: Option<&str>) -> String {
    let mut page = String::with_capacity(2048);
    page.push_str(PAGE_HEAD);

    if let Some(message) = message {
        push_banner(&mut page, "banner banner-success", message);
    }
    if let Some(error) = error {
        push_banner(&mut page, "banner banner-error", error);
    }

    page.push_str("<form method=\"post\" action=\"/register\">\n");
    for field in &FORM_FIELDS {
        page.push_str(&format!(
            r#"<label for="{name}">{label}</label>
<input id="{name}" name="{name}" type="{input_type}"{extra}>
"#,
            name = field.name,
            label = field.label,
            input_type = field.input_type,
            extra = field.extra,
        ));
    }
    page.push_str("<button type=\"submit\">Register</button>\n</form>\n");
    page.push_str(PAGE_TAIL);
    page
}

fn push_banner(page: &mut String, class: &str, text: &str) {
    page.push_str(&format!(
        "<div class=\"{class}\" role=\"status\">{}</div>\n",
        escape_html(text)
    ));
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
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

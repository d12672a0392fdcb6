//! Contact email payload.
//!
//! The payload is the JSON body of a Resend `POST /emails` call:
//!
//! ```json
//! {"from": "...", "to": "...", "subject": "...", "html": "...", "reply_to": "..."}
//! ```
//!
//! Every snapshot value placed in `html` is HTML-escaped. The subject is plain
//! text; line breaks in it are folded to spaces.

use serde::Serialize;

use formflow_types::{FormSnapshot, escape_html};

pub const NAME_FIELD: &str = "navn";
pub const EMAIL_FIELD: &str = "epost";
pub const PROJECT_TYPE_FIELD: &str = "prosjekt_type";
const INSPECTION_FIELD: &str = "befaring";
const DESCRIPTION_FIELD: &str = "beskrivelse";

const NO_DESCRIPTION: &str = "Ingen beskrivelse oppgitt";

/// Labelled rows of the message body, in display order.
const DETAIL_ROWS: &[(&str, &str)] = &[
    ("Navn", NAME_FIELD),
    ("E-post", EMAIL_FIELD),
    ("Telefon", "telefon"),
    ("Bydel", "bydel"),
    ("Type prosjekt", PROJECT_TYPE_FIELD),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailPayload {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

#[must_use]
pub fn build_payload(snapshot: &FormSnapshot, from: &str, to: &str) -> EmailPayload {
    let reply_to = snapshot.value(EMAIL_FIELD).trim();
    EmailPayload {
        from: from.to_string(),
        to: to.to_string(),
        subject: format_subject(snapshot),
        html: format_html_body(snapshot),
        reply_to: (!reply_to.is_empty()).then(|| reply_to.to_string()),
    }
}

#[must_use]
pub fn format_subject(snapshot: &FormSnapshot) -> String {
    let subject = format!(
        "Ny forespørsel: {} - {}",
        snapshot.value(PROJECT_TYPE_FIELD).trim(),
        snapshot.value(NAME_FIELD).trim()
    );
    subject
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[must_use]
pub fn format_html_body(snapshot: &FormSnapshot) -> String {
    let mut html = String::from("<h2>Ny forespørsel fra nettsiden</h2>\n<hr>\n");

    for (label, field) in DETAIL_ROWS {
        push_row(&mut html, label, snapshot.value(field));
    }

    // A checked checkbox submits any non-empty value ("on" by default).
    let inspection = if snapshot.value(INSPECTION_FIELD).trim().is_empty() {
        "Nei"
    } else {
        "Ja"
    };
    push_row(&mut html, "Ønsker befaring", inspection);

    // Fields outside the standard contact form are listed under their own names.
    for (name, value) in snapshot.iter().filter(|(name, _)| !is_known_field(name)) {
        push_row(&mut html, name, value);
    }

    html.push_str("<hr>\n<h3>Beskrivelse:</h3>\n<p>");
    let description = snapshot.value(DESCRIPTION_FIELD).trim();
    if description.is_empty() {
        html.push_str(NO_DESCRIPTION);
    } else {
        html.push_str(&escape_html(description));
    }
    html.push_str("</p>\n");

    html
}

fn push_row(html: &mut String, label: &str, value: &str) {
    html.push_str("<p><strong>");
    html.push_str(&escape_html(label));
    html.push_str(":</strong> ");
    html.push_str(&escape_html(value.trim()));
    html.push_str("</p>\n");
}

fn is_known_field(name: &str) -> bool {
    name == INSPECTION_FIELD
        || name == DESCRIPTION_FIELD
        || DETAIL_ROWS.iter().any(|(_, field)| *field == name)
}

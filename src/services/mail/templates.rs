use crate::domain::contact::ContactSubmission;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fmt::Write as _;
use time::format_description::BorrowedFormatItem;
use time::macros::{format_description, offset};
use time::{OffsetDateTime, UtcOffset};

/// Local time of the HomiFi office (Asia/Dubai, no daylight saving).
pub const OFFICE_OFFSET: UtcOffset = offset!(+4);

const SUBMITTED_AT_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[weekday], [month repr:long] [day padding:none], [year] at [hour repr:12 padding:none]:[minute] [period]"
);

const NOT_PROVIDED: &str = "Not provided";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateKind {
    /// Sent to the customer.
    Confirmation,
    /// Sent to the HomiFi inbox.
    Notification { submitted_at: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Formats an instant as office-local en-US text, e.g. `Monday, January 1, 2024 at 3:45 PM`.
///
/// # Errors
/// Returns an error if the instant cannot be rendered with the format description.
pub fn format_submitted_at(instant: OffsetDateTime) -> Result<String, time::error::Format> {
    instant.to_offset(OFFICE_OFFSET).format(SUBMITTED_AT_FORMAT)
}

#[must_use]
pub fn render(kind: &TemplateKind, submission: &ContactSubmission) -> RenderedMessage {
    match kind {
        TemplateKind::Confirmation => render_confirmation(submission),
        TemplateKind::Notification { submitted_at } => render_notification(submission, submitted_at),
    }
}

fn render_confirmation(submission: &ContactSubmission) -> RenderedMessage {
    let fields = detail_fields(submission);

    let html = layout(&html! {
        h1 style=(HEADING_STYLE) { "Thank you, " (submission.name()) "!" }
        p {
            "We have received your enquiry and one of our smart-home specialists will get back to you within 48 hours."
        }
        p { "Here is a copy of what you sent us:" }
        (details_table(&fields))
        p {
            "If you need to reach us sooner, simply reply to this email or write to "
            a href="mailto:info@homifi.ae" { "info@homifi.ae" }
            "."
        }
        p { "Warm regards," br; "The HomiFi Team" }
    });

    let mut text = format!(
        "Thank you, {}!\n\nWe have received your enquiry and one of our smart-home specialists will get back \
         to you within 48 hours.\n\nHere is a copy of what you sent us:\n\n",
        submission.name()
    );
    push_text_fields(&mut text, &fields);
    text.push_str("\nIf you need to reach us sooner, reply to this email or write to info@homifi.ae.\n\nThe HomiFi Team\n");

    RenderedMessage { subject: "Thank you for contacting HomiFi".to_string(), html: html.into_string(), text }
}

fn render_notification(submission: &ContactSubmission, submitted_at: &str) -> RenderedMessage {
    let mut fields = detail_fields(submission);
    fields.push(("Submitted", submitted_at));

    let html = layout(&html! {
        h1 style=(HEADING_STYLE) { "New contact form submission" }
        (details_table(&fields))
        p {
            "Reply directly to "
            a href={ "mailto:" (submission.email()) } { (submission.email()) }
            " to follow up."
        }
    });

    let mut text = String::from("New contact form submission\n\n");
    push_text_fields(&mut text, &fields);

    RenderedMessage { subject: format!("New Contact: {}", submission.name()), html: html.into_string(), text }
}

fn detail_fields(submission: &ContactSubmission) -> Vec<(&'static str, &str)> {
    vec![
        ("Name", submission.name()),
        ("Email", submission.email()),
        ("Phone", submission.phone().unwrap_or(NOT_PROVIDED)),
        ("Property", submission.property().unwrap_or(NOT_PROVIDED)),
        ("Message", submission.message()),
    ]
}

fn layout(content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
            }
            body style=(BODY_STYLE) {
                div style=(CARD_STYLE) {
                    (content)
                    p style=(FOOTER_STYLE) { "HomiFi Smart Homes " (PreEscaped("&middot;")) " Dubai, UAE" }
                }
            }
        }
    }
}

fn details_table(fields: &[(&str, &str)]) -> Markup {
    html! {
        table style=(TABLE_STYLE) {
            @for (label, value) in fields {
                tr {
                    td style=(LABEL_STYLE) { (label) }
                    td style=(VALUE_STYLE) { (value) }
                }
            }
        }
    }
}

fn push_text_fields(text: &mut String, fields: &[(&str, &str)]) {
    for (label, value) in fields {
        let _ = writeln!(text, "{label}: {value}");
    }
}

const BODY_STYLE: &str =
    "margin:0;padding:24px;background:#f8fafc;font-family:Helvetica,Arial,sans-serif;color:#334155;";
const CARD_STYLE: &str = "max-width:600px;margin:0 auto;background:#ffffff;border-radius:8px;padding:32px;";
const HEADING_STYLE: &str = "color:#0f172a;font-size:22px;";
const TABLE_STYLE: &str = "border-collapse:collapse;width:100%;margin:16px 0;";
const LABEL_STYLE: &str = "padding:8px;font-weight:600;vertical-align:top;width:120px;";
const VALUE_STYLE: &str = "padding:8px;white-space:pre-wrap;";
const FOOTER_STYLE: &str = "font-size:12px;color:#94a3b8;margin-top:32px;";

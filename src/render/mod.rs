//! Page rendering.
//!
//! [`render_page`] is a pure function of the visitor count, the entries
//! and the current instant. User-supplied fields go through
//! [`format::escape_html`] and are inserted pre-escaped, so maud never
//! sees raw user input.

pub mod format;

use chrono::{DateTime, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::domain::{Entry, MAX_MESSAGE_CHARS, MAX_NAME_CHARS};
use format::{escape_html, group_thousands, relative_time};

/// Document returned when the home page cannot be built.
pub const FAILURE_PAGE: &str =
    "<h1>Something went wrong</h1><p>Could not connect to the database.</p>";

/// Placeholder shown instead of the entry list when there are no entries.
pub const EMPTY_PLACEHOLDER: &str = "No messages yet. Be the first to sign!";

/// Inline CSS for the guestbook page.
const PAGE_CSS: &str = r#"
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",system-ui,sans-serif;background:#0a0a0f;color:#e0e0e8;min-height:100vh;display:flex;justify-content:center;padding:2rem 1rem}
main{width:100%;max-width:640px}
.hero{text-align:center;margin-bottom:2.5rem}
.hero h1{font-size:2rem;font-weight:700;letter-spacing:-.03em;color:#a78bfa}
.counter{display:inline-flex;gap:.5rem;margin-top:1rem;padding:.4rem 1rem;border-radius:999px;border:1px solid rgba(129,140,248,.15);color:#a5b4fc;font-size:.85rem}
.counter span{font-weight:700;font-variant-numeric:tabular-nums}
.card{background:rgba(255,255,255,.03);border:1px solid rgba(255,255,255,.06);border-radius:16px;padding:1.5rem;margin-bottom:1.5rem}
.card h2{font-size:.8rem;font-weight:600;text-transform:uppercase;letter-spacing:.08em;color:#6b6b80;margin-bottom:1.25rem}
form{display:flex;flex-direction:column;gap:.75rem}
input,textarea{background:rgba(255,255,255,.04);border:1px solid rgba(255,255,255,.08);border-radius:10px;padding:.7rem .9rem;color:#e0e0e8;font:inherit;font-size:.9rem}
textarea{resize:vertical;min-height:80px}
button{background:#6366f1;color:#fff;border:none;border-radius:10px;padding:.7rem;font-size:.9rem;font-weight:600;cursor:pointer}
.entries{display:flex;flex-direction:column;gap:.75rem}
.entry{border:1px solid rgba(255,255,255,.04);border-radius:10px;padding:1rem}
.entry-header{display:flex;justify-content:space-between;align-items:center;margin-bottom:.4rem}
.entry-name{font-weight:600;font-size:.9rem;color:#c4b5fd}
.entry-time{font-size:.75rem;color:#4a4a5e}
.entry-message{font-size:.88rem;line-height:1.5;color:#a0a0b4;white-space:pre-wrap;word-break:break-word}
.empty{text-align:center;color:#4a4a5e;padding:2rem 0;font-size:.9rem}
"#;

/// Renders the complete guestbook document.
///
/// Entries are shown in the order given; relative times are measured
/// against `now`.
#[must_use]
pub fn render_page(visitor_count: u64, entries: &[Entry], now: DateTime<Utc>) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Guestbook" }
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                main {
                    div class="hero" {
                        h1 { "guestbook" }
                        div class="counter" {
                            "visitors: " span { (group_thousands(visitor_count)) }
                        }
                    }
                    div class="card" {
                        h2 { "Leave a message" }
                        form action="/sign" method="POST" {
                            input type="text" name="name" placeholder="Your name" required
                                maxlength=(MAX_NAME_CHARS) autocomplete="off";
                            textarea name="message" placeholder="Write something..." required
                                maxlength=(MAX_MESSAGE_CHARS) {}
                            button type="submit" { "Sign the guestbook" }
                        }
                    }
                    div class="card" {
                        h2 { "Messages (" (entries.len()) ")" }
                        div class="entries" {
                            @if entries.is_empty() {
                                p class="empty" { (EMPTY_PLACEHOLDER) }
                            } @else {
                                @for entry in entries {
                                    (entry_card(entry, now))
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    markup.into_string()
}

fn entry_card(entry: &Entry, now: DateTime<Utc>) -> Markup {
    html! {
        div class="entry" {
            div class="entry-header" {
                span class="entry-name" { (PreEscaped(escape_html(&entry.name))) }
                span class="entry-time" { (relative_time(entry.created_at, now)) }
            }
            p class="entry-message" { (PreEscaped(escape_html(&entry.message))) }
        }
    }
}

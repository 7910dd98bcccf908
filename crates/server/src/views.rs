//! HTML pages for the form front end
//!
//! Every interpolated value goes through [`escape_html`].

use symptocare_core::advice::HealthAdvice;
use symptocare_core::facility::round_km;
use symptocare_core::language::SUPPORTED_LANGUAGES;
use symptocare_core::{DEFAULT_LANGUAGE, Facility};

/// Values shown on the result page
pub struct ResultView<'a> {
    pub advice: &'a HealthAdvice,
    pub facilities: &'a [Facility],
    pub searched_city: &'a str,
    pub searched_symptoms: &'a str,
    pub location_used: &'a str,
    pub selected_language: &'a str,
}

/// Escape text for HTML element content and double-quoted attributes
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

const STYLE: &str = r#"
    * { box-sizing: border-box; }
    body { font-family: system-ui, -apple-system, 'Segoe UI', sans-serif; margin: 0; background: #f5f7fa; color: #1f2933; }
    body.dark { background: #111827; color: #e5e7eb; }
    header { display: flex; justify-content: space-between; align-items: center; padding: 1rem 1.5rem; background: #0f766e; color: #fff; }
    main { max-width: 860px; margin: 1.5rem auto; padding: 0 1rem; }
    .card { background: #fff; border-radius: 10px; padding: 1.25rem; margin-bottom: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
    body.dark .card { background: #1f2937; }
    label { display: block; font-weight: 600; margin: .75rem 0 .25rem; }
    textarea, input, select { width: 100%; padding: .6rem; border: 1px solid #cbd5e1; border-radius: 6px; font: inherit; }
    button { padding: .6rem 1.1rem; border: 0; border-radius: 6px; background: #0f766e; color: #fff; font: inherit; cursor: pointer; }
    .hospital { border-top: 1px solid #e2e8f0; padding: .6rem 0; }
    .hospital .meta { font-size: .9rem; opacity: .8; }
    .notice { font-size: .85rem; opacity: .75; }
    #chat-bubble { position: fixed; right: 1.25rem; bottom: 1.25rem; width: 3.25rem; height: 3.25rem; border-radius: 50%; }
    #chat-box { display: none; position: fixed; right: 1.25rem; bottom: 5.25rem; width: 320px; }
    #chat-box.open { display: block; }
    #chat-body { height: 240px; overflow-y: auto; margin-bottom: .5rem; }
    .user-msg { text-align: right; margin: .3rem 0; }
    .bot-msg { text-align: left; margin: .3rem 0; color: #0f766e; }
"#;

const CHAT_WIDGET: &str = r#"
  <button id="chat-bubble" type="button" aria-label="Open chat">&#128172;</button>
  <div id="chat-box" class="card">
    <div id="chat-body"></div>
    <input id="chat-input" type="text" placeholder="Ask a health question" onkeydown="if (event.key === 'Enter') sendMessage()">
    <p>
      <button type="button" onclick="sendMessage()">Send</button>
      <button type="button" onclick="startVoice()">&#127908;</button>
    </p>
  </div>
"#;

const DISCLAIMER: &str =
    "This assistant gives general information only and is not a medical diagnosis.";

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <style>{STYLE}</style>
</head>
<body>
  <header>
    <strong>SymptoCare</strong>
    <button id="dark-toggle" type="button">Dark mode</button>
  </header>
  <main>
{body}
    <p class="notice">{DISCLAIMER}</p>
  </main>
{CHAT_WIDGET}
  <script src="/static/assistant.js"></script>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn language_options(selected: &str) -> String {
    let selected = if SUPPORTED_LANGUAGES
        .iter()
        .any(|(code, _)| code.eq_ignore_ascii_case(selected))
    {
        selected
    } else {
        DEFAULT_LANGUAGE
    };

    SUPPORTED_LANGUAGES
        .iter()
        .map(|(code, name)| {
            let attr = if code.eq_ignore_ascii_case(selected) {
                " selected"
            } else {
                ""
            };
            format!(r#"<option value="{code}"{attr}>{name}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

fn symptom_form(symptoms: &str, city: &str, language: &str) -> String {
    format!(
        r#"    <form class="card" method="post" action="/analyze">
      <label for="symptoms">Describe your symptoms</label>
      <textarea id="symptoms" name="symptoms" rows="4" required>{symptoms}</textarea>
      <label for="city">City</label>
      <input id="city" name="city" type="text" value="{city}" placeholder="e.g. Bengaluru">
      <label for="language">Reply language</label>
      <select id="language" name="language">
        {options}
      </select>
      <p><button type="submit">Analyze</button></p>
    </form>"#,
        symptoms = escape_html(symptoms),
        city = escape_html(city),
        options = language_options(language),
    )
}

/// GET / page
pub fn index_page() -> String {
    layout("SymptoCare", &symptom_form("", "", DEFAULT_LANGUAGE))
}

fn facility_item(facility: &Facility) -> String {
    let mut meta = vec![format!(
        "{} &middot; {:.1} km",
        facility.kind,
        round_km(facility.distance_km)
    )];
    if let Some(address) = &facility.address {
        meta.push(escape_html(address));
    }
    if let Some(phone) = &facility.phone {
        meta.push(format!("&#9742; {}", escape_html(phone)));
    }
    if let Some(hours) = &facility.opening_hours {
        meta.push(escape_html(hours));
    }

    let name = escape_html(&facility.name);
    let title = match &facility.website {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => format!(
            r#"<a href="{}" target="_blank" rel="noopener">{name}</a>"#,
            escape_html(url)
        ),
        _ => name,
    };

    format!(
        r#"      <div class="hospital" data-distance="{distance}" data-type="{kind}">
        <strong>{title}</strong>
        <div class="meta">{meta}</div>
        <a class="meta" href="https://www.openstreetmap.org/?mlat={lat}&amp;mlon={lon}#map=17/{lat}/{lon}" target="_blank" rel="noopener">Map</a>
      </div>"#,
        distance = round_km(facility.distance_km),
        kind = facility.kind,
        meta = meta.join(" &middot; "),
        lat = facility.coordinates.lat,
        lon = facility.coordinates.lon,
    )
}

/// POST /analyze result page
pub fn result_page(view: &ResultView<'_>) -> String {
    let places = if view.facilities.is_empty() {
        "      <p>No medical facilities found nearby.</p>".to_string()
    } else {
        view.facilities
            .iter()
            .map(facility_item)
            .collect::<Vec<_>>()
            .join("\n")
    };

    let body = format!(
        r#"    <section class="card">
      <h2>Health note</h2>
      <p id="assistant-text">{health}</p>
      <p><strong>Recommended doctor:</strong> {doctor}</p>
      <p><strong>Reason:</strong> {reason}</p>
      <button id="speak-btn" type="button">&#128264; Read aloud</button>
    </section>
    <section class="card">
      <h2>Nearby medical facilities</h2>
      <p class="notice">Showing results near {location}</p>
      <label for="sortSelect">Sort by</label>
      <select id="sortSelect" onchange="sortPlaces()">
        <option value="distance">Distance</option>
        <option value="type">Type</option>
      </select>
      <div id="places-container">
{places}
      </div>
    </section>
{form}"#,
        health = escape_html(&view.advice.health),
        doctor = escape_html(&view.advice.doctor),
        reason = escape_html(&view.advice.reason),
        location = escape_html(view.location_used),
        form = symptom_form(
            view.searched_symptoms,
            view.searched_city,
            view.selected_language
        ),
    );

    layout("SymptoCare: results", &body)
}

/// Page for rejected form submissions
pub fn error_page(message: &str) -> String {
    let body = format!(
        r#"    <section class="card">
      <h2>Something went wrong</h2>
      <p>{}</p>
      <p><a href="/">Back to the form</a></p>
    </section>"#,
        escape_html(message)
    );
    layout("SymptoCare: error", &body)
}

//! Terminal rendering of REST responses

use console::Style;
use kconnect_core::{ApiResponse, StatusClass};
use std::io::{self, Write};

/// Display tone of a line of output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Green
    Success,
    /// Yellow
    Warning,
    /// Red
    Failure,
    /// Status outside the success/failure ranges
    Neutral,
}

impl Tone {
    /// Terminal style for this tone
    pub fn style(self) -> Style {
        match self {
            Tone::Success => Style::new().green(),
            Tone::Warning => Style::new().yellow(),
            Tone::Failure => Style::new().red(),
            Tone::Neutral => Style::new().cyan(),
        }
    }
}

impl From<StatusClass> for Tone {
    fn from(class: StatusClass) -> Self {
        match class {
            StatusClass::Success => Tone::Success,
            StatusClass::ClientError | StatusClass::ServerError => Tone::Failure,
            StatusClass::Other => Tone::Neutral,
        }
    }
}

/// Pretty-print `body` if it is JSON, otherwise return it unchanged.
pub fn render_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}

/// Print the status line and body in a tone chosen by the status code.
///
/// Malformed JSON is shown raw; only writer errors are returned.
pub fn echo_status_and_body<W: Write>(out: &mut W, status: u16, body: &str) -> io::Result<()> {
    let style = Tone::from(StatusClass::from_code(status)).style();
    writeln!(out, "{}", style.apply_to(format!("HTTP {status}")))?;
    if !body.trim().is_empty() {
        writeln!(out, "{}", style.apply_to(render_body(body)))?;
    }
    Ok(())
}

/// Echo an [`ApiResponse`] through [`echo_status_and_body`]
pub fn echo<W: Write>(out: &mut W, response: &ApiResponse) -> io::Result<()> {
    echo_status_and_body(out, response.status, &response.body)
}

//! View rendering seam
//!
//! Handlers return a [`View`]: a view name plus a serialized context. The
//! response carries it as an extension until [`render_views`] hands it to the
//! configured [`ViewRenderer`], so handlers never touch markup.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

/// Turns a view name and its context into an HTML document
pub trait ViewRenderer: Send + Sync {
    fn render(
        &self,
        view: &str,
        context: &serde_json::Value,
        flashes: &[String],
    ) -> anyhow::Result<String>;
}

/// A page to be rendered once the handler has finished
#[derive(Debug, Clone)]
pub struct View {
    status: StatusCode,
    name: String,
    context: serde_json::Value,
    flashes: Vec<String>,
}

impl View {
    pub fn new(name: impl Into<String>, context: impl Serialize) -> Self {
        let name = name.into();
        let context = serde_json::to_value(context).unwrap_or_else(|e| {
            tracing::error!(view = %name, error = %e, "view context is not serializable");
            serde_json::Value::Null
        });
        Self {
            status: StatusCode::OK,
            name,
            context,
            flashes: Vec::new(),
        }
    }

    /// Generic page for an error status
    pub fn error(status: StatusCode) -> Self {
        let name = if status == StatusCode::NOT_FOUND {
            "errors/404"
        } else {
            "errors/500"
        };
        Self::new(
            name,
            super::dto::ErrorPageDto {
                status: status.as_u16(),
            },
        )
        .with_status(status)
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_flash(mut self, message: Option<String>) -> Self {
        self.flashes.extend(message);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        let mut response = self.status.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Response middleware rendering any pending [`View`]
pub async fn render_views(
    State(renderer): State<Arc<dyn ViewRenderer>>,
    mut response: Response,
) -> Response {
    let Some(view) = response.extensions_mut().remove::<View>() else {
        return response;
    };

    match renderer.render(&view.name, &view.context, &view.flashes) {
        Ok(html) => {
            let (mut parts, _) = response.into_parts();
            parts.headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            );
            Response::from_parts(parts, Body::from(html))
        }
        Err(e) => {
            tracing::error!(view = %view.name, error = %e, "failed to render view");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Id of the script element holding the JSON view context
pub const CONTEXT_ELEMENT_ID: &str = "view-context";

/// Minimal renderer: an HTML shell with flash messages and the view context
/// embedded as a JSON data island for client-side templates.
#[derive(Debug, Clone)]
pub struct HtmlShellRenderer {
    title: String,
    script_src: Option<String>,
}

impl HtmlShellRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            script_src: None,
        }
    }

    /// Reference a script from every page
    pub fn with_script(mut self, src: impl Into<String>) -> Self {
        self.script_src = Some(src.into());
        self
    }
}

impl Default for HtmlShellRenderer {
    fn default() -> Self {
        Self::new("Showbook").with_script("/static/js/script.js")
    }
}

impl ViewRenderer for HtmlShellRenderer {
    fn render(
        &self,
        view: &str,
        context: &serde_json::Value,
        flashes: &[String],
    ) -> anyhow::Result<String> {
        let json = serde_json::to_string(context)?;
        let mut html = String::with_capacity(json.len() + 512);

        html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&self.title)));
        if let Some(src) = &self.script_src {
            html.push_str(&format!(
                "<script src=\"{}\" defer></script>\n",
                escape_html(src)
            ));
        }
        html.push_str("</head>\n");
        html.push_str(&format!("<body data-view=\"{}\">\n", escape_html(view)));

        if !flashes.is_empty() {
            html.push_str("<ul class=\"flashes\">\n");
            for message in flashes {
                html.push_str(&format!("<li>{}</li>\n", escape_html(message)));
            }
            html.push_str("</ul>\n");
        }

        html.push_str("<main id=\"content\"></main>\n");
        html.push_str(&format!(
            "<script type=\"application/json\" id=\"{CONTEXT_ELEMENT_ID}\">{}</script>\n",
            escape_script_json(&json)
        ));
        html.push_str("</body>\n</html>\n");
        Ok(html)
    }
}

fn escape_html(raw: &str) -> String {
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

/// JSON stays valid while `</script>` cannot close the island early
fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// Pull the JSON view context back out of a page rendered by
/// [`HtmlShellRenderer`]
pub fn extract_context(html: &str) -> Option<serde_json::Value> {
    let open = format!("<script type=\"application/json\" id=\"{CONTEXT_ELEMENT_ID}\">");
    let start = html.find(&open)? + open.len();
    let end = start + html[start..].find("</script>")?;
    serde_json::from_str(&html[start..end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shell_embeds_escaped_context() {
        let renderer = HtmlShellRenderer::default();
        let context = json!({"name": "</script><b>Hop & Co</b>"});

        let html = renderer
            .render("pages/show_venue", &context, &["Venue <b> listed".to_string()])
            .unwrap();

        assert!(html.contains("data-view=\"pages/show_venue\""));
        assert!(html.contains("<li>Venue &lt;b&gt; listed</li>"));
        assert!(!html.contains("</script><b>"));
        assert_eq!(extract_context(&html), Some(context));
    }

    #[test]
    fn test_error_view_names() {
        assert_eq!(View::error(StatusCode::NOT_FOUND).name(), "errors/404");
        assert_eq!(View::error(StatusCode::INTERNAL_SERVER_ERROR).name(), "errors/500");
    }
}

//! Landing page listing the API endpoints.

use axum::response::Html;

/// One routed endpoint as shown on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
}

impl Endpoint {
    /// Only parameterless GET routes can be followed from a browser.
    fn is_linkable(&self) -> bool {
        self.method == "GET" && !self.path.contains('{')
    }
}

pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint { method: "GET", path: "/user" },
    Endpoint { method: "GET", path: "/todo" },
    Endpoint { method: "POST", path: "/todo" },
    Endpoint { method: "PUT", path: "/todo/{id}" },
    Endpoint { method: "DELETE", path: "/todo/{id}" },
];

pub fn render(endpoints: &[Endpoint]) -> String {
    let items: String = endpoints
        .iter()
        .map(|e| {
            if e.is_linkable() {
                format!(
                    "<li><code>{}</code> <a href=\"{path}\">{path}</a></li>",
                    e.method,
                    path = e.path
                )
            } else {
                format!("<li><code>{}</code> {}</li>", e.method, e.path)
            }
        })
        .collect();

    format!(
        "<!DOCTYPE html><html><head><title>Todo API</title></head><body>\
         <h1>Todo API</h1><p>Available endpoints:</p><ul>{items}</ul>\
         </body></html>"
    )
}

pub async fn sitemap() -> Html<String> {
    Html(render(ENDPOINTS))
}

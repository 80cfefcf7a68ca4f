//! HTTP response handlers.

use anyhow::Result;
use tiny_http::{Header, Request, Response};

use crate::core::DocId;
use crate::document::DocumentStore;
use crate::embed::serve::{WELCOME_HTML, WelcomeVars};

fn html_header() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()
}

/// Respond with an HTML body.
pub fn respond_html(request: Request, html: &str, status: u16) -> Result<()> {
    let response = Response::from_string(html)
        .with_status_code(status)
        .with_header(html_header());
    request.respond(response)?;
    Ok(())
}

/// Workspace index: list every document with a preview link.
pub fn respond_index(request: Request, store: &DocumentStore) -> Result<()> {
    let docs = store.scan();

    let doc_list = if docs.is_empty() {
        format!(
            "<p><em>No .ink documents found in <code>{}</code>. Create one and it will appear here.</em></p>",
            store.root().display()
        )
    } else {
        let items: Vec<String> = docs
            .iter()
            .map(|doc| {
                format!(
                    r#"<li><a href="/preview/{id}">{id}</a></li>"#,
                    id = doc.as_str()
                )
            })
            .collect();
        format!("<ul>\n{}\n</ul>", items.join("\n"))
    };

    let html = WELCOME_HTML.render(&WelcomeVars {
        title: "Ink stories",
        version: env!("CARGO_PKG_VERSION"),
        doc_list: &doc_list,
    });
    respond_html(request, &html, 200)
}

/// The document exists but no preview has been published yet.
/// The page polls until the seed compile lands.
pub fn respond_compiling(request: Request, doc: &DocId) -> Result<()> {
    let html = format!(
        "<!doctype html><html><head><meta charset=\"utf-8\">\
         <meta http-equiv=\"refresh\" content=\"1\">\
         <title>{doc}</title></head>\
         <body><p><em>Compiling {doc}&hellip;</em></p></body></html>"
    );
    respond_html(request, &html, 200)
}

/// Server is still starting up.
pub fn respond_starting(request: Request) -> Result<()> {
    let html = "<!doctype html><html><head><meta charset=\"utf-8\">\
                <meta http-equiv=\"refresh\" content=\"1\">\
                <title>inkpot</title></head>\
                <body><p><em>Starting up&hellip;</em></p></body></html>";
    respond_html(request, html, 503)
}

/// Shutdown in progress.
pub fn respond_unavailable(request: Request) -> Result<()> {
    respond_html(request, "<p>Server shutting down</p>", 503)
}

/// Unknown route or document.
pub fn respond_not_found(request: Request) -> Result<()> {
    respond_html(
        request,
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>Not found</title></head>\
         <body><p>Not found. <a href=\"/\">Back to the document list</a></p></body></html>",
        404,
    )
}

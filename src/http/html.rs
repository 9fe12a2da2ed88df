//! Minimal HTML pages for the browser form interface

use std::fmt::Write;

use crate::core::types::{CorpusSearchResponse, Location, SearchResponse};

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn page(title: &str, action: &str, query: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n\
         <h1>{title}</h1>\n\
         <form method=\"post\" action=\"{action}\">\n\
         <input type=\"text\" name=\"query\" value=\"{query}\" autofocus>\n\
         <button type=\"submit\">Search</button>\n\
         </form>\n{body}</body>\n</html>\n",
        title = escape(title),
        action = action,
        query = escape(query),
        body = body,
    )
}

/// Document search page, with results when a query was submitted
pub fn search_page(query: &str, response: Option<&SearchResponse>) -> String {
    let mut body = String::new();

    if let Some(response) = response {
        if response.hits.is_empty() {
            let _ = writeln!(body, "<p>No results for <b>{}</b></p>", escape(query));
        } else {
            let _ = writeln!(body, "<p>{} result(s)</p>\n<ul>", response.count);
            for hit in &response.hits {
                let location = match hit.location {
                    Location::Title => "title match".to_string(),
                    Location::Line(n) => format!("line {}", n + 1),
                };
                let _ = write!(
                    body,
                    "<li><b>{}</b> ({})",
                    escape(&hit.path.display().to_string()),
                    location
                );
                if let Some(snippet) = &hit.snippet {
                    let _ = write!(body, "<br><code>{}</code>", escape(snippet.trim_end()));
                }
                body.push_str("</li>\n");
            }
            body.push_str("</ul>\n");
        }
    }

    page("Document Search", "/", query, &body)
}

/// Fixed corpus search page
pub fn corpus_page(query: &str, response: Option<&CorpusSearchResponse>) -> String {
    let mut body = String::new();

    if let Some(response) = response {
        if response.documents.is_empty() {
            let _ = writeln!(body, "<p>No documents for <b>{}</b></p>", escape(query));
        } else {
            body.push_str("<ul>\n");
            for (id, text) in &response.documents {
                let _ = writeln!(body, "<li>[{}] {}</li>", id, escape(text));
            }
            body.push_str("</ul>\n");
        }
    }

    page("Corpus Search", "/corpus", query, &body)
}

/// Inline error message on the form page
pub fn error_page(title: &str, action: &str, query: &str, message: &str) -> String {
    let body = format!("<p class=\"error\">{}</p>\n", escape(message));
    page(title, action, query, &body)
}

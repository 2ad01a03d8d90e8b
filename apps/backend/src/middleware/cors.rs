use actix_cors::Cors;
use actix_web::http::header;

use crate::trace_ctx::TRACE_ID_HEADER;

/// Build CORS middleware for the browser client.
///
/// `None` (nothing configured) allows any origin, which is how the student
/// app front-end has always been served. `Some` accepts only the listed
/// origins; an empty list accepts none.
pub fn cors_middleware(allowed_origins: Option<&[String]>) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![header::HeaderName::from_static(TRACE_ID_HEADER)])
        .max_age(3600);

    let Some(allowed_origins) = allowed_origins else {
        return cors.allow_any_origin();
    };

    for origin in allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

/// Parse and lightly validate a comma-separated origin list.
///
/// Empty entries, `null`, and anything that is not an http(s) origin are
/// dropped.
pub fn parse_allowed_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}

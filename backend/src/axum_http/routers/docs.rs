use axum::{
    Router,
    http::header::CONTENT_TYPE,
    response::{Html, IntoResponse},
    routing::get,
};

const OPENAPI_DOCUMENT: &str = include_str!("../../../docs/openapi.yaml");

const SWAGGER_UI_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>darraa-pay API</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
      window.ui = SwaggerUIBundle({ url: "/docs/openapi.yaml", dom_id: "#swagger-ui" });
    </script>
  </body>
</html>
"##;

pub fn routes() -> Router {
    Router::new()
        .route("/", get(swagger_ui))
        .route("/openapi.yaml", get(openapi_document))
}

pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_PAGE)
}

pub async fn openapi_document() -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/yaml")], OPENAPI_DOCUMENT)
}

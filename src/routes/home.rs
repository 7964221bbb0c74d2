use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

const LANDING_PAGE: &str = r#"<html>
  <head><title>IBank - Back-End</title></head>
  <body style="font-family: Arial, sans-serif; padding: 2rem;">
    <h1>IBank - API</h1>
    <p>Server is running. Available routes:</p>
    <ul>
      <li><a href="/investments">/investments</a> - list investments (JSON)</li>
      <li><a href="/investments/types/distribution">/investments/types/distribution</a> - count by type (JSON)</li>
      <li><a href="/health">/health</a> - health check</li>
    </ul>
  </body>
</html>
"#;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(landing))
}

async fn landing() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

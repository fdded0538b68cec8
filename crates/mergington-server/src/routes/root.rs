use axum::response::Redirect;

pub const INDEX_PATH: &str = "/static/index.html";

/// GET / — send browsers to the front page.
pub async fn root() -> Redirect {
    Redirect::temporary(INDEX_PATH)
}

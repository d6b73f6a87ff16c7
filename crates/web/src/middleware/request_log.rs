use axum::{extract, middleware::Next, response::Response};

pub async fn request_log_middleware(req: extract::Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let response = next.run(req).await;

    log::info!("{} {} {}", method, path, response.status().as_u16());
    response
}

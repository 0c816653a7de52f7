use salvo::{Router, handler};

#[handler]
async fn healthcheck() -> &'static str {
    "OK"
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("healthcheck").get(healthcheck)
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use salvo::prelude::*;
    use salvo::test::{ResponseExt, TestClient};

    use crate::app::api::APP_ROUTE_PREFIX;

    #[tokio::test]
    async fn test_healthcheck_reports_ok() {
        let service = Service::new(crate::app::api::routes());

        let url = format!("http://127.0.0.1:5800{APP_ROUTE_PREFIX}/healthcheck");
        let mut resp = TestClient::get(url).send(&service).await;

        assert_eq!(resp.status_code, Some(StatusCode::OK));
        assert_eq!(resp.take_string().await.unwrap(), "OK");
    }
}

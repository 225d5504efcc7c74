use super::types::{ApiResponse, ApiUsage};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

/// Issue a GET and decode the JSON body. The `Err` side is already the
/// failure envelope: non-2xx statuses carry the body as `details`,
/// transport and decode failures carry only the error text.
pub async fn fetch_json(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<(Value, ApiUsage), ApiResponse> {
    send_json(client.get(url).query(query), url).await
}

/// Send a prepared request of any method and decode it like `fetch_json`.
pub async fn send_json(
    request: RequestBuilder,
    url: &str,
) -> Result<(Value, ApiUsage), ApiResponse> {
    let resp = match request.send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!(url, error = %e, "request failed");
            return Err(ApiResponse::failed(e.to_string(), None));
        }
    };

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        tracing::error!(url, status = status.as_u16(), body = %body, "vendor API error");
        return Err(ApiResponse::failed(
            format!("API returned status {}", status.as_u16()),
            Some(body),
        ));
    }

    let usage = ApiUsage::from_headers(resp.headers());

    match resp.json::<Value>().await {
        Ok(data) => Ok((data, usage)),
        Err(e) => {
            tracing::error!(url, error = %e, "failed to parse response");
            Err(ApiResponse::failed(e.to_string(), None))
        }
    }
}

/// `fetch_json` for vendors that report no quota.
pub async fn get_json(client: &Client, url: &str, query: &[(&str, String)]) -> ApiResponse {
    match fetch_json(client, url, query).await {
        Ok((data, _)) => ApiResponse::ok(data),
        Err(failed) => failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_success_carries_data_and_usage() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/thing")
            .match_query(mockito::Matcher::UrlEncoded("limit".into(), "5".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("x-requests-remaining", "42")
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let url = format!("{}/thing", server.url());
        let (data, usage) = fetch_json(&Client::new(), &url, &[("limit", "5".to_string())])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(data, json!({"ok": true}));
        assert_eq!(usage.remaining.as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn test_get_json_omits_usage() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/thing")
            .with_status(200)
            .with_header("x-requests-remaining", "42")
            .with_body("[1, 2]")
            .create_async()
            .await;

        let url = format!("{}/thing", server.url());
        let resp = get_json(&Client::new(), &url, &[]).await;

        assert!(resp.success);
        assert_eq!(resp.data, Some(json!([1, 2])));
        assert!(resp.usage.is_none());
    }

    #[tokio::test]
    async fn test_non_2xx_becomes_error_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/thing")
            .with_status(429)
            .with_body("slow down")
            .create_async()
            .await;

        let url = format!("{}/thing", server.url());
        let resp = get_json(&Client::new(), &url, &[]).await;

        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("API returned status 429"));
        assert_eq!(resp.details.as_deref(), Some("slow down"));
        assert!(resp.data.is_none());
    }

    #[tokio::test]
    async fn test_invalid_json_becomes_error_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/thing")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let url = format!("{}/thing", server.url());
        let resp = get_json(&Client::new(), &url, &[]).await;

        assert!(!resp.success);
        assert!(resp.error.is_some());
        assert!(resp.details.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_host_becomes_error_envelope() {
        let resp = get_json(&Client::new(), "http://127.0.0.1:1/nothing", &[]).await;
        assert!(!resp.success);
        assert!(resp.error.is_some());
    }
}

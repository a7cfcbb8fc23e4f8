// src/service/http.rs
use std::time::Duration;

use chrono::Local;
use log::{debug, info, warn};
use reqwest::blocking::{multipart, Client, Response};

use super::{ClassificationService, PredictionResponse, ServiceError, TextPayload};
use crate::analysis::{AnalysisResult, BatchResult, ModelMetrics};

const REQUEST_ID_HEADER: &str = "x-request-id";
const DRIFT_HEADER: &str = "x-drift-detected";

/// Blocking HTTP client for the classification service. Calls are made from
/// worker threads, never from the UI thread.
#[derive(Debug, Clone)]
pub struct HttpClassificationService {
    client: Client,
    base_url: String,
}

impl HttpClassificationService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Unreachable(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn unreachable(e: reqwest::Error) -> ServiceError {
    ServiceError::Unreachable(e.to_string())
}

fn invalid_body(e: reqwest::Error) -> ServiceError {
    ServiceError::InvalidBody(e.to_string())
}

fn check_status(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    warn!("Classification service answered {} ({})", status, body.trim());
    Err(ServiceError::Status {
        status: status.as_u16(),
        body,
    })
}

fn header_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ClassificationService for HttpClassificationService {
    fn predict_text(&self, text: &str) -> Result<AnalysisResult, ServiceError> {
        let url = self.endpoint("predict_json");
        debug!("POST {} ({} chars)", url, text.chars().count());

        let response = self
            .client
            .post(&url)
            .json(&TextPayload { text })
            .send()
            .map_err(unreachable)?;
        let body: PredictionResponse = check_status(response)?.json().map_err(invalid_body)?;
        body.into_result()
    }

    fn predict_batch(&self, file_name: &str, bytes: &[u8]) -> Result<BatchResult, ServiceError> {
        let url = self.endpoint("predict");
        debug!("POST {} ({}, {} bytes)", url, file_name, bytes.len());

        let part = multipart::Part::bytes(bytes.to_vec())
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(invalid_body)?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(unreachable)?;
        let response = check_status(response)?;

        let request_id = header_value(&response, REQUEST_ID_HEADER);
        let drift_detected = header_value(&response, DRIFT_HEADER)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let raw_table = response.text().map_err(invalid_body)?;

        info!(
            "Batch prediction for {} returned {} bytes (request id {:?}, drift {})",
            file_name,
            raw_table.len(),
            request_id,
            drift_detected
        );

        Ok(BatchResult {
            raw_table,
            request_id,
            drift_detected,
            received_at: Local::now(),
        })
    }

    fn fetch_metrics(&self) -> Result<ModelMetrics, ServiceError> {
        let url = self.endpoint("model/metrics");
        debug!("GET {}", url);
        let response = self.client.get(&url).send().map_err(unreachable)?;
        check_status(response)?.json().map_err(invalid_body)
    }

    fn healthcheck(&self) -> Result<(), ServiceError> {
        let url = self.endpoint("healthcheck");
        debug!("GET {}", url);
        let response = self.client.get(&url).send().map_err(unreachable)?;
        check_status(response).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Sentiment;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serves exactly one canned HTTP response on a loopback port and returns
    /// the raw request it received.
    fn serve_once(status: &str, headers: &[(&str, &str)], body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let mut response = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
            status,
            body.len()
        );
        for (name, value) in headers {
            response.push_str(&format!("{}: {}\r\n", name, value));
        }
        response.push_str("\r\n");
        response.push_str(body);

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request
        });

        (format!("http://{}", addr), handle)
    }

    fn read_request(stream: &mut impl Read) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            let Some(header_end) = text.find("\r\n\r\n") else {
                continue;
            };
            let head = text[..header_end].to_ascii_lowercase();
            let content_length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok());
            match content_length {
                Some(len) if buf.len() >= header_end + 4 + len => break,
                Some(_) => continue,
                None if head.contains("transfer-encoding: chunked") => {
                    if text.ends_with("0\r\n\r\n") {
                        break;
                    }
                }
                None => break,
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    fn client(base: &str) -> HttpClassificationService {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpClassificationService::with_client(client, base)
    }

    #[test]
    fn test_predict_text_posts_json() {
        let (base, server) = serve_once(
            "200 OK",
            &[("Content-Type", "application/json")],
            r#"{"text":"love it","prediction":"Positive","confidence":0.91,"probabilities":{}}"#,
        );

        let result = client(&base).predict_text("love it").unwrap();
        assert_eq!(
            result,
            AnalysisResult::SinglePrediction {
                label: Sentiment::Positive,
                confidence: Some(0.91),
            }
        );

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /predict_json "));
        assert!(request.contains(r#"{"text":"love it"}"#));
    }

    #[test]
    fn test_predict_text_non_success_status() {
        let (base, server) = serve_once("500 Internal Server Error", &[], "boom");
        let err = client(&base).predict_text("hello").unwrap_err();
        assert_eq!(
            err,
            ServiceError::Status {
                status: 500,
                body: "boom".into()
            }
        );
        server.join().unwrap();
    }

    #[test]
    fn test_predict_text_model_not_found() {
        let (base, server) = serve_once(
            "200 OK",
            &[("Content-Type", "application/json")],
            r#"{"text":"x","prediction":"model_not_found","confidence":0.0,"probabilities":{}}"#,
        );
        assert_eq!(client(&base).predict_text("x"), Err(ServiceError::ModelUnavailable));
        server.join().unwrap();
    }

    #[test]
    fn test_predict_batch_uploads_file_and_reads_headers() {
        let csv = "review,sentiment\n\"good, really\",Positive\n";
        let (base, server) = serve_once(
            "200 OK",
            &[
                ("Content-Type", "text/csv"),
                ("X-Request-ID", "20251017_101500"),
                ("X-Drift-Detected", "true"),
            ],
            csv,
        );

        let result = client(&base)
            .predict_batch("reviews.csv", b"review\ngood, really\n")
            .unwrap();
        assert_eq!(result.raw_table, csv);
        assert_eq!(result.request_id.as_deref(), Some("20251017_101500"));
        assert!(result.drift_detected);

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /predict "));
        assert!(request.contains("name=\"file\""));
        assert!(request.contains("filename=\"reviews.csv\""));
        assert!(request.contains("review\ngood, really\n"));
    }

    #[test]
    fn test_fetch_metrics() {
        let (base, server) = serve_once(
            "200 OK",
            &[("Content-Type", "application/json")],
            r#"{"accuracy":0.9023,"macro_f1":0.8811,"weighted_f1":0.9}"#,
        );
        let metrics = client(&base).fetch_metrics().unwrap();
        assert_eq!(metrics.accuracy, Some(0.9023));
        assert_eq!(metrics.macro_f1, Some(0.8811));
        assert_eq!(metrics.macro_precision, None);

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /model/metrics "));
    }

    #[test]
    fn test_unreachable_service() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let err = client(&format!("http://{}/", addr)).healthcheck().unwrap_err();
        assert!(matches!(err, ServiceError::Unreachable(_)), "{:?}", err);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let service = client("http://localhost:8000/");
        assert_eq!(service.base_url(), "http://localhost:8000");
        assert_eq!(service.endpoint("predict"), "http://localhost:8000/predict");
    }
}

// HTTP response utilities with optional Brotli encoding
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Response, StatusCode},
};
use tokio::io::AsyncReadExt;

/// Check if client accepts Brotli compression
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}

pub async fn brotli_compress(bytes: Vec<u8>) -> std::io::Result<Vec<u8>> {
    let cursor = std::io::Cursor::new(bytes);
    let mut encoder = BrotliEncoder::new(cursor);
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

/// Build a response body, compressing it with Brotli when requested
pub async fn encoded_response(
    status: StatusCode,
    content_type: &'static str,
    bytes: Vec<u8>,
    compress: bool,
    attachment: Option<&str>,
) -> Result<Response<Body>, StatusCode> {
    let original_len = bytes.len();
    let (body_bytes, content_encoding) = if compress {
        let compressed = brotli_compress(bytes).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!("Compressed {} -> {} bytes", original_len, compressed.len());
        (compressed, Some("br"))
    } else {
        (bytes, None)
    };

    let mut response_builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, body_bytes.len())
        .header(header::VARY, "accept-encoding");

    if let Some(encoding) = content_encoding {
        response_builder = response_builder.header(header::CONTENT_ENCODING, encoding);
    }

    if let Some(filename) = attachment {
        let disposition = format!(
            "attachment; filename*=UTF-8''{}",
            urlencoding::encode(filename)
        );
        let value = HeaderValue::from_str(&disposition).map_err(|e| {
            tracing::error!("Invalid Content-Disposition header: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        response_builder = response_builder.header(header::CONTENT_DISPOSITION, value);
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_brotli() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_brotli(&headers));
        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, br"));
        assert!(accepts_brotli(&headers));
    }

    #[tokio::test]
    async fn test_attachment_filename_is_percent_encoded() {
        let response = encoded_response(
            StatusCode::OK,
            "image/svg+xml",
            b"<svg/>".to_vec(),
            false,
            Some("1) Serviços.svg"),
        )
        .await
        .unwrap();

        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert_eq!(disposition, "attachment; filename*=UTF-8''1%29%20Servi%C3%A7os.svg");
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
    }

    #[tokio::test]
    async fn test_compressed_body_sets_encoding() {
        let body = "<html>".repeat(200).into_bytes();
        let response = encoded_response(StatusCode::OK, "text/html", body.clone(), true, None)
            .await
            .unwrap();

        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
        let len: usize = response.headers()[header::CONTENT_LENGTH]
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!(len < body.len());
    }
}

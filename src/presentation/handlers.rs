// HTTP request handlers
use crate::infrastructure::http_response::{accepts_brotli, encoded_response};
use crate::presentation::app_state::AppState;
use crate::presentation::page::{
    chart_options, render_dashboard_page, render_error_page, render_panel_svg,
};
use crate::presentation::view_state::ViewState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct PageQuery {
    pub expanded: Option<String>,
}

/// `expanded` takes the page's own form (`1,3`) or `true`; anything else is ignored
#[derive(Deserialize)]
pub struct ChartQuery {
    pub expanded: Option<String>,
}

impl ChartQuery {
    fn is_expanded(&self, number: usize) -> bool {
        match self.expanded.as_deref() {
            Some("true") => true,
            other => ViewState::from_query(other).is_expanded(number),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

async fn respond(
    status: StatusCode,
    content_type: &'static str,
    bytes: Vec<u8>,
    compress: bool,
    attachment: Option<&str>,
) -> Response {
    match encoded_response(status, content_type, bytes, compress, attachment).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Dashboard page with one Pareto chart per question
pub async fn dashboard_page(
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);
    let view = ViewState::from_query(query.expanded.as_deref());

    let (status, html) = match state.dashboard_service.build_dashboard().await {
        Ok(dashboard) => (
            StatusCode::OK,
            render_dashboard_page(&dashboard, &view, &state.chart_settings),
        ),
        Err(e) => {
            tracing::error!("Error loading spreadsheet: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                render_error_page(&state.title, &e.to_string()),
            )
        }
    };

    respond(status, "text/html; charset=utf-8", html.into_bytes(), compress, None).await
}

/// Dashboard data as JSON
pub async fn dashboard_json(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);

    match state.dashboard_service.build_dashboard().await {
        Ok(dashboard) => match serde_json::to_vec(&dashboard) {
            Ok(bytes) => respond(StatusCode::OK, "application/json", bytes, compress, None).await,
            Err(e) => {
                tracing::error!("Dashboard serialization error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        Err(e) => {
            tracing::error!("Error loading spreadsheet: {}", e);
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}

/// Download one question's chart as SVG, e.g. `/charts/3.svg`
pub async fn chart_svg(
    Path(file): Path<String>,
    Query(query): Query<ChartQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(number) = parse_chart_file(&file) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let compress = accepts_brotli(&headers);

    let dashboard = match state.dashboard_service.build_dashboard().await {
        Ok(dashboard) => dashboard,
        Err(e) => {
            tracing::error!("Error loading spreadsheet: {}", e);
            return (StatusCode::BAD_GATEWAY, e.to_string()).into_response();
        }
    };

    let Some(panel) = dashboard.panel(number) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let options = chart_options(&state.chart_settings, query.is_expanded(number));
    let svg = match render_panel_svg(panel, &options) {
        Ok(svg) => svg,
        Err(e) => {
            tracing::error!("Chart for question {} failed: {}", number, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let filename = format!("{}.svg", panel.title);

    respond(
        StatusCode::OK,
        "image/svg+xml",
        svg.into_bytes(),
        compress,
        Some(filename.as_str()),
    )
    .await
}

/// `"3.svg"` -> 3
fn parse_chart_file(file: &str) -> Option<usize> {
    file.strip_suffix(".svg")?
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::DashboardService;
    use crate::application::sheet_source::{SheetError, SheetSource};
    use crate::domain::survey::ResponseTable;
    use crate::infrastructure::config::{ChartSettings, Orientation, QuestionSettings};
    use async_trait::async_trait;

    struct FixedSource(Option<ResponseTable>);

    #[async_trait]
    impl SheetSource for FixedSource {
        async fn load_table(&self) -> Result<ResponseTable, SheetError> {
            self.0
                .clone()
                .ok_or_else(|| SheetError::InvalidUrl("https://example.com/x".to_string()))
        }
    }

    fn state(table: Option<ResponseTable>) -> State<Arc<AppState>> {
        let service = DashboardService::new(
            Arc::new(FixedSource(table)),
            QuestionSettings {
                first_column: 1,
                last_column: 8,
            },
            "Pareto Charts".to_string(),
        );
        State(Arc::new(AppState {
            dashboard_service: service,
            chart_settings: ChartSettings {
                orientation: Orientation::Vertical,
                label_wrap: 18,
            },
            title: "Pareto Charts".to_string(),
        }))
    }

    fn survey() -> ResponseTable {
        ResponseTable::from_records(
            vec!["Timestamp".to_string(), "Serviços".to_string()],
            vec![
                vec!["t1".to_string(), "Exame, Consulta".to_string()],
                vec!["t2".to_string(), "Exame".to_string()],
            ],
        )
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_page_renders_charts() {
        let response = dashboard_page(
            Query(PageQuery { expanded: None }),
            HeaderMap::new(),
            state(Some(survey())),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("1) Serviços"));
        assert!(html.contains("<svg"));
    }

    #[tokio::test]
    async fn test_page_shows_load_error() {
        let response = dashboard_page(
            Query(PageQuery { expanded: None }),
            HeaderMap::new(),
            state(None),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = body_text(response).await;
        assert!(html.contains("invalid URL"));
        assert!(!html.contains("<svg"));
    }

    #[tokio::test]
    async fn test_chart_download() {
        let response = chart_svg(
            Path("1.svg".to_string()),
            Query(ChartQuery { expanded: None }),
            HeaderMap::new(),
            state(Some(survey())),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "image/svg+xml"
        );
        assert!(body_text(response).await.contains("Exame"));

        let missing = chart_svg(
            Path("5.svg".to_string()),
            Query(ChartQuery { expanded: None }),
            HeaderMap::new(),
            state(Some(survey())),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_chart_download_accepts_page_expand_form() {
        for expanded in ["1", "2,1", "true"] {
            let response = chart_svg(
                Path("1.svg".to_string()),
                Query(ChartQuery {
                    expanded: Some(expanded.to_string()),
                }),
                HeaderMap::new(),
                state(Some(survey())),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
            assert!(body_text(response).await.contains("width=\"1200\""));
        }

        let response = chart_svg(
            Path("1.svg".to_string()),
            Query(ChartQuery {
                expanded: Some("abc".to_string()),
            }),
            HeaderMap::new(),
            state(Some(survey())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("width=\"800\""));
    }

    #[test]
    fn test_chart_query_expanded() {
        let query = |v: Option<&str>| ChartQuery {
            expanded: v.map(str::to_string),
        };
        assert!(query(Some("3")).is_expanded(3));
        assert!(query(Some("1,3")).is_expanded(3));
        assert!(!query(Some("1")).is_expanded(3));
        assert!(query(Some("true")).is_expanded(3));
        assert!(!query(Some("false")).is_expanded(3));
        assert!(!query(None).is_expanded(3));
    }

    #[tokio::test]
    async fn test_dashboard_json() {
        let response = dashboard_json(HeaderMap::new(), state(Some(survey()))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["row_count"], 2);
        assert_eq!(json["panels"][0]["series"]["labels"][0], "Exame");
        assert_eq!(json["panels"][0]["series"]["cumulative_percent"][1], 100.0);
    }

    #[test]
    fn test_parse_chart_file() {
        assert_eq!(parse_chart_file("3.svg"), Some(3));
        assert_eq!(parse_chart_file("0.svg"), None);
        assert_eq!(parse_chart_file("3.png"), None);
        assert_eq!(parse_chart_file("x.svg"), None);
    }
}

//! HTTP surface: the data-entry form, the report preview and the PDF download.

pub mod page;

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use chrono::Local;
use log::{error, info, warn};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::ReportError;
use crate::fonts;
use crate::form::{FormErrors, ReportForm};
use crate::layout::format_report;
use crate::model::ReportRecord;
use crate::render::{RenderOptions, ReportRenderer};

/// Immutable state shared by all requests.
pub struct AppState {
    pub config: AppConfig,
    pub renderer: ReportRenderer,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let renderer = ReportRenderer::new(RenderOptions::from_config(&config));
        Self { config, renderer }
    }
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(show_form))
        .route("/report", post(preview_report))
        .route("/report.pdf", post(download_report))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `config.server.bind` and serves the form until the process is stopped.
pub async fn serve(config: AppConfig) -> Result<(), ReportError> {
    if !fonts::default_fonts_available(config.fonts.directory.as_deref()) {
        warn!("No font family found; PDF downloads will fail until fonts are installed");
    }

    let bind = config.server.bind.clone();
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .map_err(|source| ReportError::Io {
            context: format!("binding {bind}"),
            source,
        })?;
    info!("Client call report form listening on http://{bind}");

    let app = router(Arc::new(AppState::new(config)));
    axum::serve(listener, app)
        .await
        .map_err(|source| ReportError::Io {
            context: "serving HTTP".to_owned(),
            source,
        })
}

async fn show_form(State(state): State<Arc<AppState>>) -> Html<String> {
    let today = Local::now().date_naive();
    Html(page::form_page(
        &state.config.branding.company_name,
        &ReportForm::defaults(today),
        &FormErrors::default(),
    ))
}

fn validate(state: &AppState, form: ReportForm) -> Result<ReportRecord, Response> {
    let today = Local::now().date_naive();
    form.clone().into_record(today).map_err(|errors| {
        info!("Rejected submission: {errors}");
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(page::form_page(
                &state.config.branding.company_name,
                &form,
                &errors,
            )),
        )
            .into_response()
    })
}

async fn preview_report(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ReportForm>,
) -> Response {
    let record = match validate(&state, form) {
        Ok(record) => record,
        Err(response) => return response,
    };

    let document = format_report(
        &record,
        &state.config.branding,
        Local::now().date_naive(),
    );
    Html(page::preview_page(&document, &ReportForm::from_record(&record))).into_response()
}

async fn download_report(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ReportForm>,
) -> Response {
    let record = match validate(&state, form) {
        Ok(record) => record,
        Err(response) => return response,
    };

    let now = Local::now().naive_local();
    let document = format_report(&record, &state.config.branding, now.date());
    let renderer = state.renderer.clone();

    let rendered = tokio::task::spawn_blocking(move || renderer.render(&document, now)).await;
    match rendered {
        Ok(Ok(pdf)) => {
            info!("Generated {} ({} bytes)", pdf.file_name, pdf.bytes.len());
            (
                [
                    (header::CONTENT_TYPE, "application/pdf".to_owned()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", pdf.file_name),
                    ),
                ],
                pdf.bytes,
            )
                .into_response()
        }
        Ok(Err(err)) => {
            error!("Report rendering failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Report could not be generated: {err}"),
            )
                .into_response()
        }
        Err(err) => {
            error!("Report rendering task failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Report could not be generated".to_owned(),
            )
                .into_response()
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

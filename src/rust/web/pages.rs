use std::cmp::Ordering;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::Form;
use log::{error, info, warn};
use serde::Deserialize;

use super::error::AppError;
use super::render::{self, PredictionOutcome, TEXT_PLACEHOLDER};
use super::state::AppState;

/// The pages offered in the sidebar selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Prediction,
    Information,
}

impl Page {
    pub fn all() -> [Page; 3] {
        [Self::Home, Self::Prediction, Self::Information]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Prediction => "Prediction",
            Self::Information => "Information",
        }
    }

    /// Unknown or missing names select the Home page.
    pub fn from_name(name: Option<&str>) -> Self {
        name.and_then(|n| {
            Self::all()
                .into_iter()
                .find(|p| p.name().eq_ignore_ascii_case(n.trim()))
        })
        .unwrap_or(Self::Home)
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub text: String,
    pub model: Option<String>,
}

/// Handler for GET /?page=<name>
pub async fn page_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let page = Page::from_name(query.page.as_deref());
    info!("Rendering {} page", page.name());
    Html(match page {
        Page::Home => render::home_page(),
        Page::Information => render::information_page(&state),
        Page::Prediction => render::prediction_page(
            &state,
            TEXT_PLACEHOLDER,
            state.classifier.default_model(),
            None,
        ),
    })
}

/// Handler for POST /predict, the "Classify" button
pub async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PredictForm>,
) -> Result<Html<String>, AppError> {
    let model = form
        .model
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| state.classifier.default_model())
        .to_string();

    let outcome = match state.classifier.predict(&form.text, &model) {
        Ok((label, scores)) => {
            info!("Text categorized as '{}' by {}", label, model);
            let mut scores: Vec<_> = scores.into_iter().collect();
            scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
            PredictionOutcome::Success { label, scores }
        }
        Err(e) if e.is_user_error() => {
            warn!("Rejected classification request: {}", e);
            PredictionOutcome::Invalid(e.to_string())
        }
        Err(e) => {
            error!("Classification with {} failed: {}", model, e);
            return Err(e.into());
        }
    };

    Ok(Html(render::prediction_page(
        &state,
        &form.text,
        &model,
        Some(&outcome),
    )))
}

/// Handler for GET /health
pub async fn health_handler() -> &'static str {
    "Healthy"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_name() {
        assert_eq!(Page::from_name(Some("Prediction")), Page::Prediction);
        assert_eq!(Page::from_name(Some(" information ")), Page::Information);
        assert_eq!(Page::from_name(Some("Admin")), Page::Home);
        assert_eq!(Page::from_name(None), Page::Home);
    }
}

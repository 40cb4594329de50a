mod error;
mod pages;
mod render;
mod router;
mod server;
mod state;

pub use error::AppError;
pub use pages::{health_handler, page_handler, predict_handler, Page, PageQuery, PredictForm};
pub use render::{escape_html, PredictionOutcome, SUBHEADER, TEXT_PLACEHOLDER, TITLE};
pub use router::app_router;
pub use server::serve;
pub use state::AppState;

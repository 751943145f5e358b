//! HTTP API for the venue desk

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::assistant::Assistant;
use crate::booking::BookingManager;
use axum::Router;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub bookings: BookingManager,
    pub assistant: Assistant,
}

impl AppState {
    pub fn new(bookings: BookingManager, assistant: Assistant) -> Self {
        Self {
            bookings,
            assistant,
        }
    }
}

/// Mount venue images, ad images and the built frontend
pub fn with_static_files(router: Router, public_dir: &Path, frontend_dist: &Path) -> Router {
    let router = router
        .nest_service("/images", ServeDir::new(public_dir.join("images")))
        .nest_service("/ads", ServeDir::new(public_dir.join("ads")));

    if frontend_dist.is_dir() {
        let index = frontend_dist.join("index.html");
        router.fallback_service(ServeDir::new(frontend_dist).fallback(ServeFile::new(index)))
    } else {
        router
    }
}

//! In-memory campus social feed.
//!
//! Posts (text, confessions, moods and memes) are scoped to a university
//! campus, listed through campus and tab filters, and reacted to with a fixed
//! set of emoji. Everything lives in process memory; the HTTP layer in
//! [`routes`] is a thin shell over [`feed`], [`composer`] and [`store`].

use std::{error::Error, time::Duration};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tracing::info;

pub mod args;
pub mod campus;
pub mod composer;
pub mod dto;
pub mod error;
pub mod feed;
pub mod image;
pub mod notifier;
pub mod post;
pub mod routes;
pub mod state;
pub mod store;
pub mod theme;

use args::Args;
use image::{MAX_IMAGE_BYTES, MAX_INLINE_POST_BYTES};
use routes::{
    acknowledge_live, block_author, create_post, get_theme, health, index, list_campuses,
    list_posts, live_status, react_to_post, report_post, toggle_theme, upload_image,
};
use state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/campuses", get(list_campuses))
        .route(
            "/posts",
            get(list_posts)
                .post(create_post)
                .layer(DefaultBodyLimit::max(MAX_INLINE_POST_BYTES)),
        )
        .route("/posts/:id/reactions", post(react_to_post))
        .route("/posts/:id/report", post(report_post))
        .route("/posts/:id/block", post(block_author))
        .route(
            "/images",
            post(upload_image).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES)),
        )
        .route("/live", get(live_status))
        .route("/live/ack", post(acknowledge_live))
        .route("/theme", get(get_theme))
        .route("/theme/toggle", post(toggle_theme))
        .with_state(state)
}

pub async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    info!("Initializing state...");
    let state = AppState::bootstrap(
        !args.no_seed,
        args.theme,
        Duration::from_secs(args.poll_interval_secs),
        args.new_posts_probability,
    );

    let addr = &args.listen;
    let listener = TcpListener::bind(addr).await?;
    info!("Serving campus-feed on http://{addr}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

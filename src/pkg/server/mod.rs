pub mod handlers;
pub mod router;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use crate::pkg::internal::scheduler::Scheduler;
use crate::{conf::settings, prelude::Result};
use router::build_routes;
use state::AppState;

pub async fn listen() -> Result<()> {
    let state = AppState::new();
    let scheduler = Scheduler::new(
        state.store.clone(),
        state.recorder.clone(),
        Arc::clone(&state.clock),
        Duration::from_secs(settings.sweep_interval_secs),
    );
    let scheduler_handle = scheduler.start();

    let listener =
        tokio::net::TcpListener::bind(format!("0.0.0.0:{}", settings.listen_port.clone())).await?;
    tracing::info!("Listening at port {}", settings.listen_port);
    tokio::select! {
        r = axum::serve(listener, build_routes(state)) => {
            tracing::warn!("server ended unexpectedly: {:?}", &r)
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received ctrl+c interrupt, closing server");
        }
    }
    scheduler_handle.stop().await;
    Ok(())
}

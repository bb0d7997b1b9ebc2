use std::{net::SocketAddr, sync::Arc};

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{error, info};

use control::{display::AudienceDisplay, ControlContext};
use shared::domain::LowerThird;
use storage::Storage;

mod config;
mod ws;

use config::{load_settings, prepare_database_url};

#[derive(Clone)]
struct AppState {
    control: ControlContext,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;
    let control = ControlContext {
        storage,
        display: Arc::new(AudienceDisplay::new()),
    };

    let app = build_router(Arc::new(AppState { control }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "lower thirds server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/lower-thirds", get(list_lower_thirds))
        .route("/ws/lower-thirds", get(ws::control_socket))
        .route("/ws/audience", get(ws::audience_socket))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_lower_thirds(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LowerThird>>, (StatusCode, String)> {
    let lower_thirds = state
        .control
        .storage
        .all_lower_thirds()
        .await
        .map_err(|error| (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()))?;
    Ok(Json(lower_thirds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use shared::domain::LowerThirdId;
    use tower::ServiceExt;

    async fn test_app() -> (Router, ControlContext) {
        let storage = Storage::new("sqlite::memory:").await.expect("db");
        let control = ControlContext {
            storage,
            display: Arc::new(AudienceDisplay::new()),
        };
        let app = build_router(Arc::new(AppState {
            control: control.clone(),
        }));
        (app, control)
    }

    #[tokio::test]
    async fn healthz_responds_ok() {
        let (app, _) = test_app().await;
        let response = app
            .oneshot(Request::get("/healthz").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn lists_lower_thirds_in_display_order() {
        let (app, control) = test_app().await;
        for (top, order) in [("Second", 20), ("First", 10)] {
            let mut record = LowerThird {
                id: LowerThirdId(0),
                top_text: top.to_string(),
                bottom_text: String::new(),
                display_order: order,
            };
            control
                .storage
                .create_lower_third(&mut record)
                .await
                .expect("create");
        }

        let response = app
            .oneshot(
                Request::get("/lower-thirds")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let listed: Vec<LowerThird> = serde_json::from_slice(&bytes).expect("json");
        let tops: Vec<&str> = listed.iter().map(|t| t.top_text.as_str()).collect();
        assert_eq!(tops, ["First", "Second"]);
    }
}

use dioxus::prelude::*;

use ui::{RegistryProvider, RegistryShell};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        tracing_subscriber::fmt::init();
        let result = tokio::runtime::Runtime::new()
            .map_err(Box::<dyn std::error::Error>::from)
            .and_then(|rt| rt.block_on(launch_server()));
        if let Err(e) = result {
            tracing::error!("Server failed: {}", e);
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() -> Result<(), Box<dyn std::error::Error>> {
    use axum::routing::get;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower_sessions::cookie::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, SessionManagerLayer};
    use tower_sessions_sqlx_store::PostgresStore;

    dotenvy::dotenv().ok();

    let pool = api::db::get_pool().await?;

    sqlx::migrate!("../api/migrations").run(pool).await?;

    let session_store = PostgresStore::new(pool.clone());
    session_store.migrate().await?;

    // Secure cookies only when serving over HTTPS
    let secure = std::env::var("SESSION_SECURE").is_ok_and(|v| v == "true");
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    let router = axum::Router::new()
        .route("/auth/callback", get(identity_callback))
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Registry listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

/// Completes the identity provider redirect and binds the user to the session.
/// Every outcome lands back on `/`, where the app picks up the session or, on
/// failure, the `error` query parameter.
#[cfg(feature = "server")]
async fn identity_callback(
    axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
    session: tower_sessions::Session,
) -> axum::response::Redirect {
    use axum::response::Redirect;

    if let Some(error) = params.get("error") {
        tracing::error!("Identity provider refused login: {}", error);
        return Redirect::to("/?error=login_failed");
    }

    let (Some(code), Some(state)) = (params.get("code"), params.get("state")) else {
        tracing::error!("Identity callback missing code or state");
        return Redirect::to("/?error=missing_params");
    };

    let oauth = match api::auth::IdentityOAuth::new(None) {
        Ok(oauth) => oauth,
        Err(e) => {
            tracing::error!("Identity provider misconfigured: {}", e);
            return Redirect::to("/?error=config_error");
        }
    };

    let user = match oauth.exchange_code(code, state).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Identity exchange failed: {}", e);
            return Redirect::to("/?error=login_failed");
        }
    };

    if let Err(e) = session
        .insert(api::auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
    {
        tracing::error!("Failed to set session: {}", e);
        return Redirect::to("/?error=session_error");
    }
    if let Err(e) = session.save().await {
        tracing::error!("Failed to save session: {}", e);
        return Redirect::to("/?error=session_save_error");
    }

    tracing::info!("Signed in {}", user.provider_id);
    Redirect::to("/")
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        RegistryProvider {
            RegistryShell {}
        }
    }
}

use alpe::anilist::{
    AuthSession, AuthState, Clock, OauthClientConfig, ReqwestTransport, Requester, SystemClock,
    TokenStore, Transport,
};
use alpe::config::Config;
use alpe::exporter::Exporter;
use alpe::server::{AlpeState, alpe_router};
use mimalloc::MiMalloc;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::from_sources()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    for (legacy, replacement) in Config::legacy_env_in_use() {
        warn!(legacy = %legacy, replacement, "Ignoring flat environment variable, use the nested name instead");
    }

    let anilist_cfg = &cfg.anilist;
    let tokens_path = cfg.tokens_path();
    info!(
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        loglevel = %cfg.basic.loglevel,
        require_authentication = cfg.basic.require_authentication,
        tokens_file = %tokens_path.display(),
        graphql_url = %anilist_cfg.graphql_url,
        proxy = %anilist_cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        cache_timeout_secs = anilist_cfg.cache_timeout_secs,
    );

    let transport: Arc<dyn Transport> =
        Arc::new(ReqwestTransport::new(&anilist_cfg.transport_settings())?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let oauth_client = OauthClientConfig::new(
        &anilist_cfg.client_id,
        &anilist_cfg.client_secret,
        &anilist_cfg.redirect_uri,
        &anilist_cfg.oauth_authorize_url,
        &anilist_cfg.oauth_token_url,
    )?;

    let auth = AuthSession::load(
        transport.clone(),
        clock.clone(),
        TokenStore::new(tokens_path),
        oauth_client,
        anilist_cfg.auth_code.clone(),
    )
    .await?;
    if auth.state() == AuthState::NoCredential && !auth.has_authorization_code() {
        warn!(
            authorize_url = %auth.authorize_url(),
            "No AniList credential yet. Open the URL, then set anilist.auth_code (or ALPE_ANILIST__AUTH_CODE) to the code shown."
        );
    }

    let requester = Requester::new(transport, clock, auth, anilist_cfg.graphql_endpoint()?);
    let exporter = Arc::new(Exporter::new(requester, anilist_cfg.cache_ttl()));

    let state = AlpeState::new(
        exporter,
        Arc::from(cfg.basic.access_key.as_str()),
        cfg.basic.require_authentication,
    );
    let app = alpe_router(state);

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

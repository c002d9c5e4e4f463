/**
 * XFBoard Store Server Entry Point
 *
 * This is the main entry point for the XFBoard store server. It
 * initializes the Axum HTTP server exposing the replicated board
 * document and presence markers.
 */

#[cfg(feature = "server")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("[Startup] Store server initialization started");

    let app = xfboard::backend::server::init::create_app().await;

    let port = xfboard::shared::config::AppConfig::from_env().port;
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("[Startup] Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(not(feature = "server"))]
fn main() {
    eprintln!("The store server requires the 'server' feature to be enabled.");
    eprintln!("Run with: cargo run --bin xfboard-server --features server");
    std::process::exit(1);
}

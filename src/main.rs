use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lingo_deck::config::Settings;
use lingo_deck::content::Catalog;
use lingo_deck::domain::ModuleType;

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lingo_deck=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let settings = Settings::load();
  tracing::debug!("Settings: {:?}", settings);

  let catalog = Catalog::load_or_builtin(&settings.catalog_path);
  for module in ModuleType::ALL {
    tracing::info!("Catalog: {} {} items", catalog.len(module), module);
  }

  let bind_addr = settings.bind_addr();
  let port = settings.port;
  let (state, _outbox_worker) =
    lingo_deck::init_state(settings, catalog).expect("Failed to initialize progress store");
  let app = lingo_deck::app(state);

  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", port);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jp_notebook::content::Source;
use jp_notebook::db::LogOnError;
use jp_notebook::state::AppState;
use jp_notebook::{config, db, handlers, paths};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "jp_notebook=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let app_config = config::load();

  let db_path = config::database_path(&app_config);
  let pool = db::init_db(&db_path).expect("Failed to initialize database");

  let state = AppState::new(pool, paths::data_dir());

  // Load both word lists up front so bad data shows in the startup log
  for source in [Source::Phrases, Source::Vocabulary] {
    let count = state
      .library
      .dataset(source)
      .map(|dataset| dataset.card_count())
      .log_warn_default(&format!("Failed to load {}", source));
    tracing::info!("Loaded {} {} card(s)", count, source);
  }

  let app = handlers::router(state).layer(TraceLayer::new_for_http());

  let bind_addr = config::server_bind_addr(&app_config);
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://{}", bind_addr);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}

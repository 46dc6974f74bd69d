use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pantherguessr::game::repository::InMemoryGameRepository;
use pantherguessr::leaderboard::repository::InMemoryLeaderboardRepository;
use pantherguessr::level::repository::InMemoryLevelRepository;
use pantherguessr::session::repository::InMemoryOngoingGameRepository;
use pantherguessr::session::{start_session_cleanup_task, SessionCleanupConfig};
use pantherguessr::shared::AppState;
use pantherguessr::user::repository::InMemoryUserRepository;
use pantherguessr::user::{start_streak_reset_task, StreakResetConfig};
use pantherguessr::{game, leaderboard, level, session};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pantherguessr=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PantherGuessr game backend");

    // Create shared application state with dependency injection
    // Easy to switch between implementations:
    let level_repository = Arc::new(InMemoryLevelRepository::new());
    let game_repository = Arc::new(InMemoryGameRepository::new());
    let ongoing_game_repository = Arc::new(InMemoryOngoingGameRepository::new());
    let leaderboard_repository = Arc::new(InMemoryLeaderboardRepository::new());
    let user_repository = Arc::new(InMemoryUserRepository::new());

    // For production with PostgreSQL:
    // let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // let pool = sqlx::PgPool::connect(&database_url).await.expect("Failed to connect to database");
    // let leaderboard_repository = Arc::new(PostgresLeaderboardRepository::new(pool));

    let app_state = AppState::new(
        level_repository,
        game_repository,
        ongoing_game_repository.clone(),
        leaderboard_repository,
        user_repository.clone(),
    );

    // Background sweeps: abandoned sessions and stale daily streaks
    tokio::spawn(start_session_cleanup_task(
        ongoing_game_repository,
        SessionCleanupConfig::default(),
    ));
    tokio::spawn(start_streak_reset_task(
        user_repository,
        StreakResetConfig::default(),
    ));

    // build our application with the game API routes
    let app = Router::new()
        .route("/", get(|| async { "PantherGuessr game backend" }))
        .route("/levels", get(level::handlers::list_levels))
        .route("/game", post(game::handlers::create_game))
        .route("/game/:game_id", get(game::handlers::get_game))
        .route("/guess", post(game::handlers::check_guess))
        .route(
            "/game/:game_id/finalize",
            post(session::handlers::finalize_game),
        )
        .route(
            "/game/:game_id/ongoing",
            put(session::handlers::save_progress),
        )
        .route(
            "/game/:game_id/ongoing/:user_id",
            get(session::handlers::get_ongoing).delete(session::handlers::delete_ongoing),
        )
        .route(
            "/game/:game_id/leaderboard",
            get(leaderboard::handlers::game_leaderboard),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}

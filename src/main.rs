mod config;
mod handlers;
mod models;
mod services;
mod tasks;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::Utc;
use dotenv::dotenv;

use services::catalog::CatalogService;
use services::storage::FileStorage;
use services::Stores;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = config::Config::from_env();

    let catalog = CatalogService::load(&config.catalog_path)
        .expect("Failed to load subscription catalog");

    let backend =
        Arc::new(FileStorage::new(&config.data_dir).expect("Failed to initialize data directory"));
    let stores = Stores::new(backend);

    tasks::renewal_alerts::run_renewal_alert_sweep(
        &stores.renewals,
        &stores.activity,
        Utc::now().date_naive(),
    );

    let catalog = web::Data::new(catalog);
    let stores = web::Data::new(stores);

    let bind_address = format!("{}:{}", config.host, config.port);
    log::info!("starting abocompare server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(catalog.clone())
            .app_data(stores.clone())
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/catalog")
                            .service(handlers::catalog::list_subscriptions)
                            .service(handlers::catalog::list_durations)
                            .service(handlers::catalog::get_badges)
                            .service(handlers::catalog::get_score)
                            .service(handlers::catalog::get_subscription),
                    )
                    .service(
                        web::scope("/selection")
                            .service(handlers::selection::get_selection)
                            .service(handlers::selection::select_plan)
                            .service(handlers::selection::deselect)
                            .service(handlers::selection::clear_selection),
                    )
                    .service(
                        web::scope("/insights")
                            .service(handlers::insights::get_duplicates)
                            .service(handlers::insights::get_recommendations)
                            .service(handlers::insights::family_cost)
                            .service(handlers::insights::compare),
                    )
                    .service(
                        web::scope("/budget")
                            .service(handlers::budget::get_usage)
                            .service(handlers::budget::get_budget)
                            .service(handlers::budget::update_budget),
                    )
                    .service(
                        web::scope("/goals")
                            .service(handlers::goals::list_active)
                            .service(handlers::goals::list_completed)
                            .service(handlers::goals::list_goals)
                            .service(handlers::goals::create_goal)
                            .service(handlers::goals::update_progress)
                            .service(handlers::goals::complete_goal)
                            .service(handlers::goals::delete_goal),
                    )
                    .service(
                        web::scope("/renewals")
                            .service(handlers::renewals::upcoming_renewals)
                            .service(handlers::renewals::renewal_alerts)
                            .service(handlers::renewals::list_renewals)
                            .service(handlers::renewals::upsert_renewal)
                            .service(handlers::renewals::update_renewal)
                            .service(handlers::renewals::delete_renewal),
                    )
                    .service(
                        web::scope("/favorites")
                            .service(handlers::favorites::list_favorites)
                            .service(handlers::favorites::toggle_favorite)
                            .service(handlers::favorites::clear_favorites),
                    )
                    .service(
                        web::scope("/history")
                            .service(handlers::history::list_history)
                            .service(handlers::history::record_view)
                            .service(handlers::history::remove_from_history)
                            .service(handlers::history::clear_history),
                    )
                    .service(
                        web::scope("/notes")
                            .service(handlers::notes::list_notes)
                            .service(handlers::notes::get_note)
                            .service(handlers::notes::save_note)
                            .service(handlers::notes::delete_note),
                    )
                    .service(
                        web::scope("/tags")
                            .service(handlers::tags::tags_for_subscription)
                            .service(handlers::tags::list_tags)
                            .service(handlers::tags::create_tag)
                            .service(handlers::tags::assign_tag)
                            .service(handlers::tags::unassign_tag)
                            .service(handlers::tags::subscriptions_with_tag)
                            .service(handlers::tags::delete_tag),
                    )
                    .service(
                        web::scope("/promo-codes")
                            .service(handlers::promo::active_promo_codes)
                            .service(handlers::promo::promo_codes_for_subscription)
                            .service(handlers::promo::list_promo_codes)
                            .service(handlers::promo::add_promo_code)
                            .service(handlers::promo::toggle_promo_code)
                            .service(handlers::promo::delete_promo_code),
                    )
                    .service(
                        web::scope("/activity")
                            .service(handlers::activity::recent_activity)
                            .service(handlers::activity::activity_for_subscription)
                            .service(handlers::activity::list_activity)
                            .service(handlers::activity::log_activity)
                            .service(handlers::activity::clear_activity),
                    )
                    .service(
                        web::scope("/spending")
                            .service(handlers::spending::recent_snapshots)
                            .service(handlers::spending::spending_evolution)
                            .service(handlers::spending::list_snapshots)
                            .service(handlers::spending::record_snapshot)
                            .service(handlers::spending::clear_snapshots),
                    )
                    .route("/health", web::get().to(handlers::health::health_check)),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}

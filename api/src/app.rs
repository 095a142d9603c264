//! Application factory
//!
//! Builds the Actix-web application around a shared [`AppState`]. `main`
//! and the integration tests both go through [`create_app`], so the routing
//! table exists in one place.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    http::StatusCode,
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use folio_shared::errors::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};
use crate::middleware::{create_cors, SessionGate};
use crate::routes::{admin, auth, content, health};
use crate::state::AppState;

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let cors = create_cors(&app_state.cors_config);
    let json_config = web::JsonConfig::default()
        .limit(app_state.max_payload_size)
        .error_handler(|err, _req| {
            let response = ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string())
                .to_response(StatusCode::BAD_REQUEST);
            InternalError::from_response(err, response).into()
        });

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Last registered runs first, so request spans cover CORS
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health::health))
        .service(
            web::scope("/admin")
                .wrap(SessionGate::redirect())
                .route("", web::get().to(admin::dashboard)),
        )
        .service(
            web::scope("/api")
                // Registered before the category routes so `auth` is never
                // taken for a content category
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login))
                        .route("/logout", web::post().to(auth::logout))
                        .route("/register", web::post().to(auth::register))
                        .service(
                            web::resource("/session")
                                .wrap(SessionGate::api())
                                .route(web::get().to(auth::session)),
                        )
                        .route("/reset-password", web::post().to(auth::reset_password))
                        .route("/verify-reset", web::post().to(auth::verify_reset))
                        .route("/signin/{provider}", web::get().to(auth::oauth_signin))
                        .route("/callback/{provider}", web::get().to(auth::oauth_callback)),
                )
                .service(
                    web::resource("/{category}")
                        .route(web::get().to(content::list))
                        .route(web::post().to(content::create)),
                )
                .service(
                    web::resource("/{category}/{id}")
                        .route(web::get().to(content::get))
                        .route(web::put().to(content::update))
                        .route(web::delete().to(content::delete)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
    .to_response(StatusCode::NOT_FOUND)
}

use actix_web::web;

pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/emailExists", web::get().to(users::email_exists))
            .route("/usernameExists", web::get().to(users::username_exists)),
    )
    .route(
        "/form-validation-example",
        web::post().to(users::signup),
    );
}

use actix_web::{web, HttpResponse};

pub fn root_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/api", web::get().to(root));
}

async fn root() -> HttpResponse {
    HttpResponse::Ok().body("Vortext API is running")
}

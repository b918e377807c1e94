use actix_web::web;

use crate::modules::complaint::submitter::Submitter;

pub fn configure<S>(cfg: &mut web::ServiceConfig)
where
    S: Submitter + Send + Sync + 'static,
{
    cfg.service(
        web::scope("/complaints")
            .service(
                web::resource("")
                    .route(web::post().to(crate::modules::complaint::handle::submit_complaint::<S>)),
            )
            .service(
                web::resource("/form")
                    .route(web::get().to(crate::modules::complaint::handle::get_form)),
            ),
    );
}

use crate::{
    api::{attendance, payroll},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter config
    fn build_limiter(requests_per_min: u32) -> GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap()
    }

    let attendance_limiter = build_limiter(config.rate_attendance_per_min);
    let payroll_limiter = build_limiter(config.rate_payroll_per_min);
    let sync_limiter = build_limiter(config.rate_sync_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/attendance")
                    // /attendance/close (external session-close hook)
                    .service(
                        web::resource("/close")
                            .wrap(Governor::new(&attendance_limiter))
                            .route(web::post().to(attendance::close_session)),
                    )
                    // /attendance/{id}/check-in
                    .service(
                        web::resource("/{id}/check-in")
                            .wrap(Governor::new(&attendance_limiter))
                            .route(web::post().to(attendance::check_in)),
                    )
                    // /attendance/{id}/check-out
                    .service(
                        web::resource("/{id}/check-out")
                            .wrap(Governor::new(&attendance_limiter))
                            .route(web::post().to(attendance::check_out)),
                    ),
            )
            .service(
                web::scope("/payroll")
                    // /payroll/monthly/sync — register before the
                    // parameterised monthly route
                    .service(
                        web::resource("/monthly/sync")
                            .wrap(Governor::new(&sync_limiter))
                            .route(web::post().to(payroll::sync_monthly)),
                    )
                    // /payroll/monthly/{id}/{year}/{month}
                    .service(
                        web::resource("/monthly/{id}/{year}/{month}")
                            .wrap(Governor::new(&payroll_limiter))
                            .route(web::get().to(payroll::get_monthly_payroll)),
                    )
                    // /payroll/daily/{id}/{date}/recalculate
                    .service(
                        web::resource("/daily/{id}/{date}/recalculate")
                            .wrap(Governor::new(&sync_limiter))
                            .route(web::post().to(payroll::recalculate_daily)),
                    )
                    // /payroll/daily/{id}/{date}
                    .service(
                        web::resource("/daily/{id}/{date}")
                            .wrap(Governor::new(&payroll_limiter))
                            .route(web::get().to(payroll::get_daily_payroll)),
                    )
                    // /payroll/daily/{id}?start=&end=
                    .service(
                        web::resource("/daily/{id}")
                            .wrap(Governor::new(&payroll_limiter))
                            .route(web::get().to(payroll::get_daily_payroll_range)),
                    ),
            ),
    );
}

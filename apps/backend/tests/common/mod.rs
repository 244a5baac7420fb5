#![allow(dead_code)]

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// Logging is auto-installed for every test binary that pulls in this module.
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

pub const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Fixed whole-second instant used as "now" in clock-driven tests.
pub fn t0() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// Build the production route table behind the standard middleware stack.
#[allow(unused_macros)]
macro_rules! market_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(market_backend::StructuredLogger)
                .wrap(market_backend::TraceSpan)
                .wrap(market_backend::RequestTrace)
                .app_data(actix_web::web::Data::new($state))
                .configure(market_backend::routes::configure),
        )
        .await
    };
}

//! Test helpers.

use std::{
    io,
    string::FromUtf8Error,
    sync::{Arc, Mutex, PoisonError},
};

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use tracing::{Level, subscriber::DefaultGuard};
use tracing_subscriber::fmt::MakeWriter;

use coupons_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::coupons::{
        MockCouponsService,
        records::{CouponRecord, CouponUuid},
    },
};

use crate::{auth, state::State};

pub(crate) const TEST_API_KEY: &str = "test-api-key";

pub(crate) fn make_coupon(uuid: CouponUuid, name: &str, brand: &str, value: i64) -> CouponRecord {
    CouponRecord {
        uuid,
        name: name.to_string(),
        brand: brand.to_string(),
        value: Decimal::from(value),
        expiry: Timestamp::constant(1_577_836_799, 0),
        created_at: Timestamp::constant(1_546_300_800, 0),
        last_modified: Timestamp::constant(1_546_300_800, 0),
    }
}

fn accepting_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate()
        .withf(|api_key| api_key == TEST_API_KEY)
        .returning(|_| Ok(()));

    auth
}

fn strict_coupons_mock() -> MockCouponsService {
    let mut coupons = MockCouponsService::new();

    coupons.expect_create_many().never();
    coupons.expect_update_many().never();
    coupons.expect_find_by_uuids().never();
    coupons.expect_search().never();

    coupons
}

fn state(coupons: MockCouponsService, auth: MockAuthService) -> Arc<State> {
    State::from_app_context(
        AppContext {
            coupons: Arc::new(coupons),
            auth: Arc::new(auth),
        },
        true,
        16 * 1024 * 1024,
    )
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(strict_coupons_mock(), auth)
}

pub(crate) fn state_with_coupons(coupons: MockCouponsService) -> Arc<State> {
    state(coupons, accepting_auth_mock())
}

/// Serve `route` behind the envelope middleware, authenticating with [`TEST_API_KEY`].
pub(crate) fn coupons_service(coupons: MockCouponsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_coupons(coupons)))
            .hoop(auth::middleware::handler)
            .push(route),
    )
}

/// Collects formatted log output written while its guard is held.
#[derive(Clone, Default)]
pub(crate) struct LogCapture(Arc<Mutex<Vec<u8>>>);

pub(crate) struct LogWriter(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Install a debug-level subscriber writing here for the current thread.
    pub(crate) fn set_default(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .finish();

        tracing::subscriber::set_default(subscriber)
    }

    pub(crate) fn contents(&self) -> Result<String, FromUtf8Error> {
        let bytes = self
            .0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        String::from_utf8(bytes)
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter(Arc::clone(&self.0))
    }
}

impl io::Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

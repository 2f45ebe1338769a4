//! Token cookies shared by the gateway middleware and the auth endpoints

use std::time::Duration;

use actix_web::cookie::{time, Cookie, SameSite};

/// Cookie carrying the access token written after a transparent refresh
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

fn max_age(ttl: Duration) -> time::Duration {
    time::Duration::seconds(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX))
}

/// `access_token` cookie: path `/`, HttpOnly, max-age of the access TTL
pub fn access_token_cookie(token: &str, ttl: Duration, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(ACCESS_TOKEN_COOKIE, token.to_string());
    cookie.set_path("/");
    cookie.set_max_age(max_age(ttl));
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie
}

/// `refresh_token` cookie: like the access cookie plus `SameSite=Lax`
pub fn refresh_token_cookie(token: &str, ttl: Duration, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(REFRESH_TOKEN_COOKIE, token.to_string());
    cookie.set_path("/");
    cookie.set_max_age(max_age(ttl));
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// Removal cookie that makes the browser drop `name`
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.make_removal();
    cookie
}

//! One-shot notices carried across a redirect in a cookie
//!
//! The jar percent-encodes values on the way out and decodes them on the
//! way in, so messages are stored as plain text here.

use axum_extra::extract::cookie::{Cookie, CookieJar};

pub const FLASH_COOKIE: &str = "flash";

/// Store `message` for the next rendered page
pub fn push(jar: CookieJar, message: impl Into<String>) -> CookieJar {
    let cookie = Cookie::build((FLASH_COOKIE, message.into()))
        .path("/")
        .http_only(true)
        .build();
    jar.add(cookie)
}

/// Read the pending notice, if any, and clear it
pub fn take(jar: CookieJar) -> (CookieJar, Option<String>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let message = Some(cookie.value().to_string()).filter(|m| !m.is_empty());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, message)
}

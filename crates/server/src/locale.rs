use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use collapse_shared::lang::{self, Language};

const TELEGRAM_URL: &str = "https://t.me/CollapseLoader";
const DISCORD_URL: &str = "https://discord.gg/FyKtnFqs6J";

/// Redirect the bare root to a language-prefixed path: the stored preference
/// when the visitor has one, otherwise whatever Accept-Language suggests,
/// falling back to English. First-time detection also sets the preference
/// cookie, so the redirect is only ever detected once
pub async fn root_redirect(headers: HeaderMap) -> Response {
	let stored = cookie_language(&headers);
	let language = stored
		.or_else(|| {
			headers
				.get(header::ACCEPT_LANGUAGE)
				.and_then(|value| value.to_str().ok())
				.and_then(Language::from_accept_language)
		})
		.unwrap_or_default();

	let mut response = Redirect::temporary(&format!("/{}", language.code())).into_response();
	if stored.is_none() {
		let cookie = format!("{}={}; Path=/", lang::PREFERENCE_COOKIE, language.code());
		if let Ok(value) = HeaderValue::from_str(&cookie) {
			response.headers_mut().insert(header::SET_COOKIE, value);
		}
	}

	response
}

/// Vanity path for the community Telegram
pub async fn telegram_redirect() -> Redirect {
	Redirect::temporary(TELEGRAM_URL)
}

/// Vanity path for the community Discord
pub async fn discord_redirect() -> Redirect {
	Redirect::temporary(DISCORD_URL)
}

fn cookie_language(headers: &HeaderMap) -> Option<Language> {
	let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
	cookies.split(';').find_map(|pair| {
		let (name, value) = pair.trim().split_once('=')?;
		if name == lang::PREFERENCE_COOKIE {
			value.trim().parse().ok()
		} else {
			None
		}
	})
}

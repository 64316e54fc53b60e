use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name of the cookie that stores the visitor's language preference
pub const PREFERENCE_COOKIE: &str = "language";

#[derive(Debug, thiserror::Error)]
#[error("Unknown language code: {code}")]
pub struct UnknownLanguageError {
	pub code: String,
}

/// A display language supported by the site
#[derive(Deserialize, Serialize, Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum Language {
	/// English, the fallback language
	#[default]
	#[serde(rename = "en")]
	English,
	/// Russian
	#[serde(rename = "ru")]
	Russian,
}

impl Language {
	/// All supported languages
	pub fn all() -> [Language; 2] {
		[Self::English, Self::Russian]
	}

	/// The two-letter code used in URL prefixes and the preference cookie
	pub fn code(&self) -> &'static str {
		match self {
			Self::English => "en",
			Self::Russian => "ru",
		}
	}

	/// The English name of the language
	pub fn display_name(&self) -> &'static str {
		match self {
			Self::English => "English",
			Self::Russian => "Russian",
		}
	}

	/// The name of the language in the language itself
	pub fn native_name(&self) -> &'static str {
		match self {
			Self::English => "English",
			Self::Russian => "Русский",
		}
	}

	/// Match a full locale tag like `ru-RU` or `en_US` by its primary subtag
	pub fn from_locale_tag(tag: &str) -> Option<Language> {
		let primary = tag.split(['-', '_']).next().unwrap_or_default();
		Self::all()
			.into_iter()
			.find(|lang| lang.code().eq_ignore_ascii_case(primary))
	}

	/// Pick the first supported language out of an `Accept-Language` header
	pub fn from_accept_language(header: &str) -> Option<Language> {
		header.split(',').find_map(|entry| {
			let tag = entry.split(';').next().unwrap_or_default().trim();
			Self::from_locale_tag(tag)
		})
	}

	/// Read the language prefix of a URL path, such as `/ru/clients/5`
	pub fn from_path(path: &str) -> Option<Language> {
		let first = path
			.trim_start_matches('/')
			.split('/')
			.next()
			.unwrap_or_default();
		Self::all().into_iter().find(|lang| lang.code() == first)
	}

	/// Prefix a path with this language's code, replacing any existing
	/// language prefix instead of stacking a second one
	pub fn localize_path(&self, path: &str) -> String {
		let rest = strip_language_prefix(path);
		if rest == "/" {
			format!("/{}", self.code())
		} else {
			format!("/{}{rest}", self.code())
		}
	}
}

impl fmt::Display for Language {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.code())
	}
}

impl FromStr for Language {
	type Err = UnknownLanguageError;

	fn from_str(string: &str) -> Result<Self, Self::Err> {
		Self::all()
			.into_iter()
			.find(|lang| lang.code() == string)
			.ok_or_else(|| UnknownLanguageError {
				code: string.to_string(),
			})
	}
}

/// Remove the language prefix of a path, if it has one.
/// The result always starts with a slash
pub fn strip_language_prefix(path: &str) -> String {
	let trimmed = path.trim_start_matches('/');
	if let Some(lang) = Language::from_path(path) {
		let rest = trimmed[lang.code().len()..].trim_start_matches('/');
		if rest.is_empty() {
			"/".to_string()
		} else {
			format!("/{rest}")
		}
	} else if trimmed.is_empty() {
		"/".to_string()
	} else {
		format!("/{trimmed}")
	}
}

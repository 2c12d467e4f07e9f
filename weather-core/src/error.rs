use thiserror::Error;

/// Failures that end a single weather query.
///
/// The `Display` text is what the user sees in the error panel. The extra
/// fields only feed the logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeatherError {
    /// The API answered 404: it does not know the requested location.
    #[error("Город не найден")]
    NotFound,

    /// Any other non-success status, an unreadable body, or a transport failure.
    #[error("Ошибка сервера")]
    Server { detail: String },

    #[error("Не удалось определить местоположение")]
    GeolocationDenied { reason: String },
}

impl WeatherError {
    pub fn server(detail: impl Into<String>) -> Self {
        Self::Server { detail: detail.into() }
    }

    pub fn geolocation_denied(reason: impl Into<String>) -> Self {
        Self::GeolocationDenied { reason: reason.into() }
    }

    /// Diagnostic detail for logging, empty when the variant carries none.
    pub fn detail(&self) -> &str {
        match self {
            Self::NotFound => "",
            Self::Server { detail } => detail,
            Self::GeolocationDenied { reason } => reason,
        }
    }
}

//! Conversions from external infrastructure errors into domain errors.

use kineticpanel_domain::PanelError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PanelError);

impl From<InfraError> for PanelError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PanelError> for InfraError {
    fn from(value: PanelError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPanelError {
    fn into_panel(self) -> PanelError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PanelError */
/* -------------------------------------------------------------------------- */

impl IntoPanelError for HttpError {
    fn into_panel(self) -> PanelError {
        if self.is_timeout() {
            return PanelError::Transport(format!("HTTP request timed out: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return PanelError::Transport(format!("HTTP connection failure: {self}"));
        }

        // Status errors only arise from `error_for_status`; the client reads
        // bodies itself, so keep the code structured rather than as text.
        if let Some(status) = self.status() {
            return PanelError::Api { status: status.as_u16(), body: String::new() };
        }

        if self.is_decode() || self.is_body() {
            return PanelError::Transport(format!("failed to read response body: {self}"));
        }

        PanelError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_panel())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

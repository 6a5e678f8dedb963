//! Authenticated session state.
//!
//! A [`Session`] owns the transport and the server-issued token. Every
//! operation other than `login` goes out with the token as its first
//! parameter; calls made without one fail locally and never reach the
//! transport.

use crate::catalog::RemoteProcedureCatalog;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::transport::Transport;
use jirasoap_model::{Boolean, codec};
use jirasoap_wire::{Node, Param, Request, extract_scalar};
use tracing::{debug, info, warn};

/// Where the session stands with the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

pub struct Session<T> {
    config: ClientConfig,
    transport: T,
    token: Option<String>,
    user: Option<String>,
}

impl<T: Transport> Session<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            token: None,
            user: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn state(&self) -> SessionState {
        if self.token.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// The user the current token was issued to.
    pub fn current_user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Remote operations bound to this session.
    pub fn api(&mut self) -> RemoteProcedureCatalog<'_, T> {
        RemoteProcedureCatalog::new(self)
    }

    /// Exchanges credentials for a token.
    ///
    /// A rejection by the server leaves the session as it was.
    pub fn login(&mut self, user: &str, password: &str) -> ClientResult<bool> {
        const OPERATION: &str = "login";

        let request = Request::new(OPERATION).param(user).param(password);
        debug!(operation = OPERATION, user = %user, "dispatching");
        let envelope = self.transport.invoke(&request, self.config.timeout()).map_err(|source| {
            if source.is_authentication_fault() {
                warn!(user = %user, "login rejected");
                ClientError::Authentication(format!("login rejected for {user}"))
            } else {
                warn!(operation = OPERATION, error = %source, "transport failure");
                ClientError::Transport {
                    operation: OPERATION,
                    source,
                }
            }
        })?;

        let token = extract_scalar(&envelope, "loginReturn")
            .map_err(|source| ClientError::MalformedResponse {
                operation: OPERATION,
                source,
            })?
            .text()
            .trim()
            .to_string();
        if token.is_empty() {
            return Err(ClientError::Authentication(format!(
                "server issued an empty token for {user}"
            )));
        }

        self.token = Some(token);
        self.user = Some(user.to_string());
        info!(user = %user, "logged in");
        Ok(true)
    }

    /// Ends the session on the server.
    ///
    /// Returns the server's answer. On `false` the token is kept.
    pub fn logout(&mut self) -> ClientResult<bool> {
        const OPERATION: &str = "logout";

        let envelope = self.call(OPERATION, Vec::new())?;
        let result = extract_scalar(&envelope, "logoutReturn").map_err(|source| {
            ClientError::MalformedResponse {
                operation: OPERATION,
                source,
            }
        })?;
        let accepted = codec::decode_value::<Boolean>(result).map_err(|source| ClientError::Coercion {
            operation: OPERATION,
            source,
        })?;

        if accepted {
            info!(user = ?self.user, "logged out");
            self.clear();
        } else {
            warn!(user = ?self.user, "server declined logout; keeping token");
        }
        Ok(accepted)
    }

    /// Sends `operation` with the token prepended to `args`.
    ///
    /// A rejected token clears the session and reports
    /// [`ClientError::AuthenticationExpired`].
    pub(crate) fn call(&mut self, operation: &'static str, args: Vec<Param>) -> ClientResult<Node> {
        let token = self.require_token()?;

        let mut request = Request::new(operation).param(token);
        for arg in args {
            request.push(arg);
        }
        debug!(operation, params = request.params().len(), "dispatching");

        match self.transport.invoke(&request, self.config.timeout()) {
            Ok(envelope) => Ok(envelope),
            Err(source) if source.is_authentication_fault() => {
                warn!(operation, user = ?self.user, "token rejected; session expired");
                self.clear();
                Err(ClientError::AuthenticationExpired { operation })
            }
            Err(source) => {
                warn!(operation, error = %source, "transport failure");
                Err(ClientError::Transport { operation, source })
            }
        }
    }

    fn require_token(&self) -> ClientResult<String> {
        self.token
            .clone()
            .ok_or_else(|| ClientError::Authentication("not logged in".into()))
    }

    fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

impl<T> std::fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("authenticated", &self.token.is_some())
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

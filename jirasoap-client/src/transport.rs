//! Transport abstraction.
//!
//! A transport takes a [`Request`] to the service endpoint and hands back the
//! response envelope as a [`Node`] tree. XML serialization and HTTP live on
//! the far side of this trait.

use jirasoap_wire::{Node, Request};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Marker the server puts in fault messages when it rejects a token.
pub const AUTHENTICATION_FAULT: &str = "RemoteAuthenticationException";

/// Failures reported by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The server answered with a fault envelope.
    #[error("server fault {code}: {message}")]
    Fault { code: String, message: String },
}

impl TransportError {
    /// True when the server refused the credentials or token.
    pub fn is_authentication_fault(&self) -> bool {
        match self {
            TransportError::Fault { code, message } => {
                message.contains(AUTHENTICATION_FAULT) || code.contains(AUTHENTICATION_FAULT)
            }
            _ => false,
        }
    }
}

/// Sends one request and waits for the response envelope.
///
/// `timeout` bounds the whole exchange; an implementation that gives up
/// reports [`TransportError::Timeout`].
pub trait Transport {
    fn invoke(&self, request: &Request, timeout: Duration) -> Result<Node, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn invoke(&self, request: &Request, timeout: Duration) -> Result<Node, TransportError> {
        (**self).invoke(request, timeout)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn invoke(&self, request: &Request, timeout: Duration) -> Result<Node, TransportError> {
        (**self).invoke(request, timeout)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn invoke(&self, request: &Request, timeout: Duration) -> Result<Node, TransportError> {
        (**self).invoke(request, timeout)
    }
}

/// A scripted transport for testing.
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Mutex, MutexGuard};

    /// A queued answer and how long the simulated server takes to give it.
    #[derive(Debug)]
    struct Scripted {
        result: Result<Node, TransportError>,
        latency: Duration,
    }

    /// Replays queued responses in order and records every request it sees.
    ///
    /// Running out of queued responses is reported as a network error. A
    /// response queued with a latency above the caller's timeout is reported
    /// as a timeout instead.
    #[derive(Debug, Default)]
    pub struct MockTransport {
        responses: Mutex<VecDeque<Scripted>>,
        requests: Mutex<Vec<(Request, Duration)>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues a response envelope.
        pub fn respond(&self, envelope: Node) -> &Self {
            self.respond_after(envelope, Duration::ZERO)
        }

        /// Queues a response envelope that takes `latency` to arrive.
        pub fn respond_after(&self, envelope: Node, latency: Duration) -> &Self {
            self.lock_responses().push_back(Scripted {
                result: Ok(envelope),
                latency,
            });
            self
        }

        /// Queues a transport failure.
        pub fn fail(&self, error: TransportError) -> &Self {
            self.lock_responses().push_back(Scripted {
                result: Err(error),
                latency: Duration::ZERO,
            });
            self
        }

        /// Every request seen so far, oldest first.
        pub fn requests(&self) -> Vec<Request> {
            self.lock_requests().iter().map(|(r, _)| r.clone()).collect()
        }

        pub fn last_request(&self) -> Option<Request> {
            self.lock_requests().last().map(|(r, _)| r.clone())
        }

        /// The timeout each request was sent with, oldest first.
        pub fn timeouts(&self) -> Vec<Duration> {
            self.lock_requests().iter().map(|(_, t)| *t).collect()
        }

        pub fn request_count(&self) -> usize {
            self.lock_requests().len()
        }

        /// Responses queued but not yet consumed.
        pub fn pending(&self) -> usize {
            self.lock_responses().len()
        }

        fn lock_responses(&self) -> MutexGuard<'_, VecDeque<Scripted>> {
            self.responses.lock().unwrap_or_else(|e| e.into_inner())
        }

        fn lock_requests(&self) -> MutexGuard<'_, Vec<(Request, Duration)>> {
            self.requests.lock().unwrap_or_else(|e| e.into_inner())
        }
    }

    impl Transport for MockTransport {
        fn invoke(&self, request: &Request, timeout: Duration) -> Result<Node, TransportError> {
            self.lock_requests().push((request.clone(), timeout));
            let scripted = self.lock_responses().pop_front();
            match scripted {
                None => Err(TransportError::Network(format!(
                    "no response queued for {}",
                    request.operation()
                ))),
                Some(Scripted { latency, .. }) if latency > timeout => {
                    Err(TransportError::Timeout(millis(timeout)))
                }
                Some(Scripted { result, .. }) => result,
            }
        }
    }

    fn millis(duration: Duration) -> u64 {
        u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
    }

    /// Wraps `payload` as `Envelope/Body/<operation>Response/payload`.
    pub fn envelope(operation: &str, payload: Node) -> Node {
        Node::new("soapenv:Envelope").child(
            Node::new("soapenv:Body")
                .child(Node::new(format!("ns1:{operation}Response")).child(payload)),
        )
    }

    /// Envelope carrying a single `<operation>Return` text value.
    pub fn scalar_envelope(operation: &str, text: &str) -> Node {
        envelope(operation, Node::with_text(format!("{operation}Return"), text))
    }

    /// Envelope carrying an array of `<operation>Return` items.
    ///
    /// Each item is renamed to the result element name.
    pub fn collection_envelope(operation: &str, items: impl IntoIterator<Item = Node>) -> Node {
        let tag = format!("{operation}Return");
        let items = items.into_iter().map(|mut item| {
            item.rename(tag.as_str());
            item
        });
        envelope(operation, Node::new(tag.as_str()).children_from(items))
    }

    /// Envelope carrying one structured `<operation>Return` value.
    pub fn entity_envelope(operation: &str, mut item: Node) -> Node {
        item.rename(format!("{operation}Return"));
        envelope(operation, item)
    }

    /// The fault the server raises for a rejected token.
    pub fn authentication_fault() -> TransportError {
        TransportError::Fault {
            code: "soapenv:Server.userException".into(),
            message: format!(
                "com.atlassian.jira.rpc.exception.{AUTHENTICATION_FAULT}: User not authenticated yet, or session timed out."
            ),
        }
    }
}

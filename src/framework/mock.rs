//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_update`] to assert behavior.
//! For a fluent API, queue answers up front with [`MockClient`].

use crate::framework::{FrameworkError, ResourceClient, ResourceEntity, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the canned answer for it.
enum Expectation<T: ResourceEntity> {
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests are answered in the order expectations were queued. A request that
/// does not match the next expectation (wrong kind, or wrong id) panics the
/// background task, which surfaces in the test as [`FrameworkError::ActorDropped`].
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Product>::new();
/// mock.expect_list().return_ok(vec![desk]);
/// mock.expect_delete(desk_id).return_err(FrameworkError::NotFound("...".into()));
///
/// let client = ProductClient::new(mock.client());
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ResourceEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ResourceEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .map(|mut exps| exps.pop_front())
                    .unwrap_or(None);

                match (request, expectation) {
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: expected, response }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `update` of the given record.
    pub fn expect_update(&mut self, id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `delete` of the given record.
    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().map(|exps| exps.len()).unwrap_or(0);
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

impl<T: ResourceEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn push<T: ResourceEntity>(queue: &Queue<T>, expectation: Expectation<T>) {
    if let Ok(mut exps) = queue.lock() {
        exps.push_back(expectation);
    }
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: ResourceEntity> {
    expectations: Queue<T>,
}

impl<T: ResourceEntity> ListExpectationBuilder<T> {
    pub fn return_ok(self, items: Vec<T>) {
        push(&self.expectations, Expectation::List { response: Ok(items) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::List { response: Err(error) });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ResourceEntity> {
    expectations: Queue<T>,
}

impl<T: ResourceEntity> CreateExpectationBuilder<T> {
    pub fn return_ok(self, item: T) {
        push(&self.expectations, Expectation::Create { response: Ok(item) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Create { response: Err(error) });
    }
}

/// Builder for `update` expectations.
pub struct UpdateExpectationBuilder<T: ResourceEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ResourceEntity> UpdateExpectationBuilder<T> {
    pub fn return_ok(self, item: T) {
        push(
            &self.expectations,
            Expectation::Update {
                id: self.id,
                response: Ok(item),
            },
        );
    }

    pub fn return_err(self, error: FrameworkError) {
        push(
            &self.expectations,
            Expectation::Update {
                id: self.id,
                response: Err(error),
            },
        );
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder<T: ResourceEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ResourceEntity> DeleteExpectationBuilder<T> {
    pub fn return_ok(self, item: T) {
        push(
            &self.expectations,
            Expectation::Delete {
                id: self.id,
                response: Ok(item),
            },
        );
    }

    pub fn return_err(self, error: FrameworkError) {
        push(
            &self.expectations,
            Expectation::Delete {
                id: self.id,
                response: Err(error),
            },
        );
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// Client wrappers (e.g. `ProductClient`) can be tested without a running
/// `ResourceActor`: the client sends to a channel the test owns, the test
/// inspects each request and answers it through the enclosed responder.
/// This makes failure paths (dropped actors, entity errors) deterministic.
pub fn create_mock_client<T: ResourceEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: ResourceEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<oneshot::Sender<Result<Vec<T>, FrameworkError>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ResourceEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: ResourceEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: ResourceEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Product, ProductCreate, ProductId};

    fn lamp_params() -> ProductCreate {
        ProductCreate {
            name: "Lamp".to_string(),
            price: 35.0,
            image: "http://x/lamp.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Product>(10);

        let create_task = tokio::spawn(async move { client.create(lamp_params()).await });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Lamp");
        let stored = Product::from_params(ProductId::new(), payload);
        responder.send(Ok(stored.clone())).unwrap();

        let result = create_task.await.unwrap().unwrap();
        assert_eq!(result, stored);
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let lamp = Product::from_params(ProductId::new(), lamp_params());

        let mut mock = MockClient::<Product>::new();
        mock.expect_create().return_ok(lamp.clone());
        mock.expect_list().return_ok(vec![lamp.clone()]);
        mock.expect_delete(lamp.id).return_ok(lamp.clone());

        let client = mock.client();

        let created = client.create(lamp_params()).await.unwrap();
        assert_eq!(created.id, lamp.id);

        let listed = client.list().await.unwrap();
        assert_eq!(listed.len(), 1);

        let removed = client.delete(lamp.id).await.unwrap();
        assert_eq!(removed.name, "Lamp");

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_id_mismatch_drops_responder() {
        let lamp = Product::from_params(ProductId::new(), lamp_params());

        let mut mock = MockClient::<Product>::new();
        mock.expect_delete(lamp.id).return_ok(lamp);

        let result = mock.client().delete(ProductId::new()).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}

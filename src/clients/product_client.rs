//! # Product Client
//!
//! Provides the in-process [`ProductStore`] on top of the `Product` actor.
//! It wraps a `ResourceClient<Product>` and turns framework errors back into
//! [`ProductError`]s.
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::ProductError;
use crate::store::ProductStore;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    /// Map framework errors to product errors.
    ///
    /// Errors raised by the entity hooks travel boxed inside
    /// [`FrameworkError::EntityError`] and are unboxed here. A closed or dropped
    /// actor means the store is gone, which is a store failure.
    fn map_error(e: FrameworkError) -> ProductError {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<ProductError>() {
                Ok(product_error) => *product_error,
                Err(other) => ProductError::Store(other.to_string()),
            },
            other => ProductError::Store(other.to_string()),
        }
    }
}

#[async_trait]
impl ProductStore for ProductClient {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.inner.list().await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn create(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: ProductId) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.delete(id).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn update_by_id(&self, id: ProductId, update: ProductUpdate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_delete, expect_update, MockClient};

    fn chair() -> Product {
        Product::new(ProductId::new(), "Chair", 45.0, "http://x/c.png")
    }

    #[tokio::test]
    async fn test_update_forwards_id_and_fields() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);
        let stored = chair();
        let id = stored.id;

        let update_task = tokio::spawn(async move {
            product_client
                .update_by_id(
                    id,
                    ProductUpdate {
                        price: Some(50.0),
                        ..Default::default()
                    },
                )
                .await
        });

        let (sent_id, update, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(sent_id, id);
        assert_eq!(update.price, Some(50.0));
        assert_eq!(update.name, None);

        let mut updated = stored.clone();
        updated.price = 50.0;
        responder.send(Ok(updated.clone())).unwrap();

        let result = update_task.await.unwrap();
        assert_eq!(result.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_product_not_found() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);
        let id = ProductId::new();

        let delete_task = tokio::spawn(async move { product_client.delete_by_id(id).await });

        let (_, responder) = expect_delete(&mut receiver)
            .await
            .expect("Expected Delete request");
        responder
            .send(Err(FrameworkError::NotFound(id.to_string())))
            .unwrap();

        let result = delete_task.await.unwrap();
        assert_eq!(result, Err(ProductError::NotFound(id.to_string())));
    }

    #[tokio::test]
    async fn test_entity_error_is_unboxed() {
        let mut mock = MockClient::<Product>::new();
        let id = ProductId::new();
        mock.expect_update(id)
            .return_err(FrameworkError::EntityError(Box::new(ProductError::Validation(
                "name is required".into(),
            ))));

        let product_client = ProductClient::new(mock.client());
        let result = product_client
            .update_by_id(
                id,
                ProductUpdate {
                    name: Some(String::new()),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(result, Err(ProductError::Validation("name is required".into())));
        mock.verify();
    }

    #[tokio::test]
    async fn test_foreign_entity_error_becomes_store_error() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_list()
            .return_err(FrameworkError::EntityError(Box::new(std::io::Error::other(
                "disk on fire",
            ))));

        let result = ProductClient::new(mock.client()).list().await;
        match result {
            Err(ProductError::Store(msg)) => assert!(msg.contains("disk on fire")),
            other => panic!("Expected Store error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_stopped_actor_is_a_store_error() {
        let (client, receiver) = create_mock_client::<Product>(1);
        drop(receiver);

        let result = ProductClient::new(client).list().await;
        assert!(matches!(result, Err(ProductError::Store(_))));
    }
}

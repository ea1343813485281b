//! Product lifecycle operations over a `ProductRepository`.

use catalog_core::ProductId;
use catalog_products::Product;

use crate::error::ServiceError;
use crate::repository::{ListQuery, ProductRepository};

#[derive(Debug, Clone)]
pub struct CatalogService<P> {
    products: P,
}

impl<P> CatalogService<P>
where
    P: ProductRepository,
{
    pub fn new(products: P) -> Self {
        Self { products }
    }

    pub async fn create_product(
        &self,
        name: impl Into<String>,
        price: f64,
    ) -> Result<Product, ServiceError> {
        let product = Product::new(name, price)?;
        self.products.create(&product).await?;

        tracing::info!(product_id = %product.id_typed(), "product created");
        Ok(product)
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    pub async fn list_products(&self, query: ListQuery) -> Result<Vec<Product>, ServiceError> {
        Ok(self.products.list(query).await?)
    }

    /// Replace name and price of an existing product, revalidating first.
    pub async fn update_product(
        &self,
        id: ProductId,
        name: impl Into<String>,
        price: f64,
    ) -> Result<Product, ServiceError> {
        let mut product = self.get_product(id).await?;
        product.update(name, price)?;
        self.products.update(&product).await?;

        tracing::info!(product_id = %id, "product updated");
        Ok(product)
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<(), ServiceError> {
        self.products.delete(id).await?;

        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryProductRepository, SortOrder};
    use catalog_core::DomainError;

    fn service() -> CatalogService<InMemoryProductRepository> {
        CatalogService::new(InMemoryProductRepository::new())
    }

    #[tokio::test]
    async fn create_then_get() {
        let svc = service();
        let created = svc.create_product("Test Product", 100.0).await.unwrap();

        let fetched = svc.get_product(created.id_typed()).await.unwrap();
        assert_eq!(fetched.name(), "Test Product");
        assert_eq!(fetched.price(), 100.0);
    }

    #[tokio::test]
    async fn invalid_product_is_never_stored() {
        let svc = service();
        let err = svc.create_product("", 100.0).await.unwrap_err();
        assert_eq!(err, ServiceError::Domain(DomainError::NameRequired));

        let all = svc.list_products(ListQuery::default()).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn update_revalidates_and_keeps_stored_state_on_error() {
        let svc = service();
        let p = svc.create_product("Lamp", 20.0).await.unwrap();

        let err = svc.update_product(p.id_typed(), "Lamp", 0.0).await.unwrap_err();
        assert_eq!(err, ServiceError::Domain(DomainError::PriceRequired));
        assert_eq!(svc.get_product(p.id_typed()).await.unwrap().price(), 20.0);

        let updated = svc.update_product(p.id_typed(), "Desk lamp", 35.0).await.unwrap();
        assert_eq!(updated.id_typed(), p.id_typed());
        assert_eq!(svc.get_product(p.id_typed()).await.unwrap().name(), "Desk lamp");
    }

    #[tokio::test]
    async fn missing_products_are_not_found() {
        let svc = service();
        let id = ProductId::new();

        assert_eq!(svc.get_product(id).await.unwrap_err(), ServiceError::NotFound);
        assert_eq!(
            svc.update_product(id, "X", 1.0).await.unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(svc.delete_product(id).await.unwrap_err(), ServiceError::NotFound);
    }

    #[tokio::test]
    async fn delete_removes_product() {
        let svc = service();
        let p = svc.create_product("Temp", 1.0).await.unwrap();

        svc.delete_product(p.id_typed()).await.unwrap();
        assert_eq!(
            svc.get_product(p.id_typed()).await.unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[tokio::test]
    async fn list_honours_query() {
        let svc = service();
        for i in 1..=3 {
            svc.create_product(format!("P{i}"), f64::from(i)).await.unwrap();
        }

        let newest = svc
            .list_products(ListQuery::new(1, 1, SortOrder::Desc))
            .await
            .unwrap();
        assert_eq!(newest.len(), 1);
        assert_eq!(newest[0].name(), "P3");
    }
}

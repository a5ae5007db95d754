//! Typed entity services
//!
//! One service per backend resource, all sharing the generic CRUD surface of
//! [`EntityApi`]. Orders get their own service: creation routes by order kind
//! and there is a status-transition endpoint.

use crate::error::ClientResult;
use crate::http::RestClient;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{
    Category, CategoryCreate, CategoryUpdate, Inventory, InventoryTransaction, OrderCreate,
    OrderKind, OrderStatusUpdate, Product, ProductCreate, ProductUpdate, PurchaseOrder,
    PurchaseOrderCreate, SalesOrder, SalesOrderCreate, Supplier, SupplierCreate, SupplierUpdate,
    User, UserCreate, UserUpdate,
};
use shared::query::{PaginatedResponse, QueryRequest};
use std::marker::PhantomData;

// ============================================================================
// Generic CRUD service
// ============================================================================

/// Generic CRUD service over one backend resource
///
/// `T` is the entity, `C` the create payload, `U` the update payload.
#[derive(Debug, Clone)]
pub struct EntityApi<T, C, U> {
    http: RestClient,
    base: &'static str,
    _marker: PhantomData<fn() -> (T, C, U)>,
}

impl<T, C, U> EntityApi<T, C, U>
where
    T: DeserializeOwned,
    C: Serialize,
    U: Serialize,
{
    pub fn new(http: RestClient, base: &'static str) -> Self {
        Self {
            http,
            base,
            _marker: PhantomData,
        }
    }

    /// Paginated list
    pub async fn list(&self, query: QueryRequest) -> ClientResult<PaginatedResponse<T>> {
        self.http
            .get(&format!("{}/list", self.base), Some(&query))
            .await
    }

    /// Fetch one record by id
    pub async fn get(&self, id: i64) -> ClientResult<T> {
        self.http.get(&format!("{}/{}", self.base, id), None).await
    }

    /// Create a record
    pub async fn create(&self, payload: &C) -> ClientResult<T> {
        self.http.post(self.base, payload).await
    }

    /// Partially update a record
    pub async fn update(&self, id: i64, payload: &U) -> ClientResult<T> {
        self.http
            .patch(&format!("{}/{}", self.base, id), payload)
            .await
    }

    /// Delete a record
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("{}/{}", self.base, id)).await
    }
}

pub type SupplierApi = EntityApi<Supplier, SupplierCreate, SupplierUpdate>;
pub type CategoryApi = EntityApi<Category, CategoryCreate, CategoryUpdate>;
pub type ProductApi = EntityApi<Product, ProductCreate, ProductUpdate>;
pub type UserApi = EntityApi<User, UserCreate, UserUpdate>;

// ============================================================================
// Inventory
// ============================================================================

/// Inventory service - stock levels are read-only from the back office;
/// they move through received purchase orders and completed sales orders
#[derive(Debug, Clone)]
pub struct InventoryApi {
    http: RestClient,
}

impl InventoryApi {
    pub fn new(http: RestClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: QueryRequest) -> ClientResult<PaginatedResponse<Inventory>> {
        self.http.get("/inventory/list", Some(&query)).await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Inventory> {
        self.http.get(&format!("/inventory/{id}"), None).await
    }

    /// Movement history
    pub async fn transactions(
        &self,
        query: QueryRequest,
    ) -> ClientResult<PaginatedResponse<InventoryTransaction>> {
        self.http.get("/inventory/transactions", Some(&query)).await
    }
}

// ============================================================================
// Orders
// ============================================================================

/// Order-creation collaborator
///
/// The draft controller depends on this trait rather than on the concrete
/// REST service, so submission can be exercised against a mock.
#[async_trait]
pub trait OrderCreator: Send + Sync {
    /// Create an order, returning the id assigned by the backend
    async fn create(&self, order: OrderCreate) -> ClientResult<i64>;
}

/// Purchase and sales order service
#[derive(Debug, Clone)]
pub struct OrderApi {
    http: RestClient,
}

impl OrderApi {
    pub fn new(http: RestClient) -> Self {
        Self { http }
    }

    pub async fn create_purchase(&self, payload: &PurchaseOrderCreate) -> ClientResult<PurchaseOrder> {
        self.http.post("/purchase", payload).await
    }

    pub async fn create_sales(&self, payload: &SalesOrderCreate) -> ClientResult<SalesOrder> {
        self.http.post("/sales", payload).await
    }

    pub async fn list_purchase(
        &self,
        query: QueryRequest,
    ) -> ClientResult<PaginatedResponse<PurchaseOrder>> {
        self.http.get("/purchase/list", Some(&query)).await
    }

    pub async fn list_sales(
        &self,
        query: QueryRequest,
    ) -> ClientResult<PaginatedResponse<SalesOrder>> {
        self.http.get("/sales/list", Some(&query)).await
    }

    pub async fn get_purchase(&self, id: i64) -> ClientResult<PurchaseOrder> {
        self.http.get(&format!("/purchase/{id}"), None).await
    }

    pub async fn get_sales(&self, id: i64) -> ClientResult<SalesOrder> {
        self.http.get(&format!("/sales/{id}"), None).await
    }

    /// Status transition (mark received / completed / cancelled)
    pub async fn update_status(
        &self,
        kind: OrderKind,
        id: i64,
        payload: &OrderStatusUpdate,
    ) -> ClientResult<()> {
        let base = match kind {
            OrderKind::Purchase => "/purchase",
            OrderKind::Sales => "/sales",
        };
        self.http
            .patch(&format!("{base}/{id}/status"), payload)
            .await
    }
}

#[async_trait]
impl OrderCreator for OrderApi {
    async fn create(&self, order: OrderCreate) -> ClientResult<i64> {
        match order {
            OrderCreate::Purchase(payload) => {
                let created = self.create_purchase(&payload).await?;
                tracing::info!(order_id = created.id, kind = %OrderKind::Purchase, "Order created");
                Ok(created.id)
            }
            OrderCreate::Sales(payload) => {
                let created = self.create_sales(&payload).await?;
                tracing::info!(order_id = created.id, kind = %OrderKind::Sales, "Order created");
                Ok(created.id)
            }
        }
    }
}

// ============================================================================
// Service hub
// ============================================================================

/// All backend services over one shared [`RestClient`]
#[derive(Debug, Clone)]
pub struct Services {
    pub suppliers: SupplierApi,
    pub categories: CategoryApi,
    pub products: ProductApi,
    pub users: UserApi,
    pub inventory: InventoryApi,
    pub orders: OrderApi,
}

impl Services {
    pub fn new(http: RestClient) -> Self {
        Self {
            suppliers: SupplierApi::new(http.clone(), "/suppliers"),
            categories: CategoryApi::new(http.clone(), "/categories"),
            products: ProductApi::new(http.clone(), "/products"),
            users: UserApi::new(http.clone(), "/users"),
            inventory: InventoryApi::new(http.clone()),
            orders: OrderApi::new(http),
        }
    }
}

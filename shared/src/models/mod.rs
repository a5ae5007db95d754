//! Entity models shared between the REST client and the back-office core

pub mod category;
pub mod inventory;
pub mod order;
pub mod product;
pub mod supplier;
pub mod user;

pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use inventory::{Inventory, InventoryTransaction};
pub use order::{
    OrderCreate, OrderKind, OrderStatus, OrderStatusUpdate, PurchaseOrder, PurchaseOrderCreate,
    PurchaseOrderItem, PurchaseOrderItemInput, SalesOrder, SalesOrderCreate, SalesOrderItem,
    SalesOrderItemInput,
};
pub use product::{Product, ProductCreate, ProductUpdate};
pub use supplier::{Supplier, SupplierCreate, SupplierUpdate};
pub use user::{User, UserCreate, UserUpdate};

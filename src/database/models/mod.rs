pub mod order;
pub mod product;
pub mod quotation;
pub mod user;

pub use order::{NewOrder, Order, ORDER_STATUS_PENDING};
pub use product::{NewProduct, Product, ProductFilter};
pub use quotation::{
    AcceptedQuotation, NewQuoteRequest, QuotationRecord, QuoteLine, QuoteRequest,
    QUOTATION_STATUS_ACCEPTED,
};
pub use user::{NewUser, ParseRoleError, Role, User};

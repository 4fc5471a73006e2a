//! One check per guarded operation. Handlers call these instead of comparing
//! role strings or ids inline.

use crate::database::models::{Product, QuoteRequest, Role, User};
use crate::error::ApiError;

/// Route-level role gate.
pub fn require_role(user: &User, role: Role) -> Result<(), ApiError> {
    if user.role == role {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!("Not authorized as {}", role)))
    }
}

/// Admins list every product; every other role lists only what it owns.
pub fn can_list_all_products(user: &User) -> bool {
    user.role == Role::Admin
}

pub fn ensure_can_create_product(user: &User) -> Result<(), ApiError> {
    if user.role == Role::Supplier {
        Ok(())
    } else {
        Err(ApiError::forbidden("You are not authorized to add products"))
    }
}

/// Ownership only; admins are not exempt.
pub fn ensure_can_edit_product(user: &User, product: &Product) -> Result<(), ApiError> {
    if product.supplier == user.id {
        Ok(())
    } else {
        Err(ApiError::forbidden("You can only edit your own products"))
    }
}

pub fn ensure_can_delete_product(user: &User, product: &Product) -> Result<(), ApiError> {
    if product.supplier == user.id {
        Ok(())
    } else {
        Err(ApiError::forbidden("You can only delete your own products"))
    }
}

pub fn ensure_can_update_quotation_status(user: &User, quotation: &QuoteRequest) -> Result<(), ApiError> {
    if quotation.supplier_id == user.id {
        Ok(())
    } else {
        Err(ApiError::forbidden("You are not authorized to update this quotation"))
    }
}

use serde_json::Value;

use crate::client::{media_form, GymClient};
use crate::endpoints::Route;
use crate::error::ApiError;
use crate::session::TokenStore;
use crate::transport::Transport;
use crate::types::{MediaFile, NewProduct, Product};

impl<T: Transport, S: TokenStore> GymClient<T, S> {
    pub fn list_products(&self, page: u32) -> Result<Vec<Product>, ApiError> {
        self.get(Route::Products { page })
    }

    /// Listings always go out as multipart, images as `images[]` parts.
    pub fn create_product(
        &self,
        product: &NewProduct,
        images: &[MediaFile],
    ) -> Result<Product, ApiError> {
        let form = media_form(product, "images[]", images)?;
        self.post_form(Route::CreateProduct, form)
    }

    pub fn get_product(&self, product_id: &str) -> Result<Product, ApiError> {
        self.get(Route::Product(product_id))
    }

    pub fn delete_product(&self, product_id: &str) -> Result<Value, ApiError> {
        self.delete(Route::Product(product_id))
    }
}

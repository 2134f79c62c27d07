//! Backend endpoint paths, relative to the API base URL.

pub const PRODUCT_LIST: &str = "api/v1/product/list";
pub const NEW_ARRIVALS: &str = "api/v1/product/new-arrivals";
pub const CATEGORY_LIST: &str = "api/v1/cat/list";
pub const SUBCATEGORY_LIST: &str = "api/v1/cat/subcategory/list";

pub const LOGIN: &str = "login";
pub const CHANGE_PASSWORD: &str = "api/v1/users/change-password";
pub const FORGOT_PASSWORD: &str = "api/v1/users/forgot-password";
pub const RESET_PASSWORD: &str = "api/v1/users/reset-password";

pub const USERS: &str = "api/users";
pub const COUPON_LIST: &str = "api/v1/coupon/list";

// Collections addressed as `{collection}/{id}`. The ID is appended as one
// escaped path segment by `ApiClient::item_endpoint`.
pub const USER_ITEMS: &str = USERS;
pub const PRODUCT_ITEMS: &str = "api/v1/product";
pub const COUPON_ITEMS: &str = "api/v1/coupon";

//! Global application store.
//!
//! State shared across pages lives in a single [`StoreState`] held by a
//! `tokio::sync::watch` channel. It is only ever changed by dispatching an
//! [`Action`]; each dispatch runs to completion inside `send_modify`, so
//! subscribers never observe a half-applied action.

use std::sync::Arc;

use jokroup_core::{
    CartItem, Coupon, CouponId, Filters, Product, ProductId, User, UserId, WishlistItem,
};
use tokio::sync::watch;
use tracing::debug;

/// Cross-page client state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub current_user: Option<User>,
    /// Canonical filter selection, committed by the filter panel.
    pub filters: Filters,
    pub wishlist: Vec<WishlistItem>,
    pub cart: Vec<CartItem>,
    /// Unfiltered product listing.
    pub products: Vec<Product>,
    /// Result of the last applied filter, if any.
    pub filtered_products: Option<Vec<Product>>,
    pub new_arrivals: Vec<Product>,
    pub best_sellers: Vec<Product>,
    /// Admin user table source (raw account records).
    pub users: Vec<User>,
    pub coupons: Vec<Coupon>,
}

impl StoreState {
    /// Products to show on the listing page: the filtered result when a
    /// filter has been applied, otherwise the full listing.
    #[must_use]
    pub fn visible_products(&self) -> &[Product] {
        self.filtered_products
            .as_deref()
            .unwrap_or(&self.products)
    }

    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.wishlist.iter().any(|w| &w.product_id == product_id)
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn cart_count(&self) -> u32 {
        self.cart.iter().map(|line| line.quantity).sum()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Apply one action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetCurrentUser(user) => self.current_user = Some(*user),
            Action::Logout => self.current_user = None,
            Action::SetFilters(filters) => self.filters = filters,
            Action::ResetFilters => {
                self.filters = Filters::default();
                self.filtered_products = None;
            }
            Action::ApplyFilters { filters, products } => {
                self.filters = filters;
                self.filtered_products = Some(products);
            }
            Action::SetProducts(products) => self.products = products,
            Action::RemoveProduct(product_id) => {
                let keep = |p: &Product| p.id != product_id;
                self.products.retain(keep);
                self.new_arrivals.retain(keep);
                self.best_sellers.retain(keep);
                if let Some(filtered) = &mut self.filtered_products {
                    filtered.retain(keep);
                }
            }
            Action::SetNewArrivals(products) => self.new_arrivals = products,
            Action::SetBestSellers(products) => self.best_sellers = products,
            Action::AddToWishlist(product_id) => {
                if !self.is_in_wishlist(&product_id) {
                    self.wishlist.push(WishlistItem { product_id });
                }
            }
            Action::RemoveFromWishlist(product_id) => {
                self.wishlist.retain(|w| w.product_id != product_id);
            }
            Action::AddToCart(item) => {
                if let Some(line) = self.cart.iter_mut().find(|l| l.same_variant(&item)) {
                    line.quantity = line.quantity.saturating_add(item.quantity);
                } else if item.quantity > 0 {
                    self.cart.push(item);
                }
            }
            Action::RemoveFromCart(product_id) => {
                self.cart.retain(|line| line.product_id != product_id);
            }
            Action::UpdateCartQuantity {
                product_id,
                quantity,
            } => {
                if quantity == 0 {
                    self.cart.retain(|line| line.product_id != product_id);
                } else {
                    for line in self.cart.iter_mut().filter(|l| l.product_id == product_id) {
                        line.quantity = quantity;
                    }
                }
            }
            Action::ClearCart => self.cart.clear(),
            Action::SetUsers(users) => self.users = users,
            Action::RemoveUser(user_id) => self.users.retain(|u| u.id != user_id),
            Action::SetCoupons(coupons) => self.coupons = coupons,
            Action::RemoveCoupon(coupon_id) => self.coupons.retain(|c| c.id != coupon_id),
        }
    }
}

/// A state transition.
#[derive(Debug, Clone)]
pub enum Action {
    SetCurrentUser(Box<User>),
    Logout,
    SetFilters(Filters),
    /// Restore default filters and drop any filtered result.
    ResetFilters,
    /// Commit a filter selection together with the products it matched.
    ApplyFilters {
        filters: Filters,
        products: Vec<Product>,
    },
    SetProducts(Vec<Product>),
    /// Drop a product from every cached listing.
    RemoveProduct(ProductId),
    SetNewArrivals(Vec<Product>),
    SetBestSellers(Vec<Product>),
    AddToWishlist(ProductId),
    RemoveFromWishlist(ProductId),
    /// Add a cart line, merging into an existing line of the same variant.
    AddToCart(CartItem),
    RemoveFromCart(ProductId),
    /// Set the quantity of every line for a product; zero removes them.
    UpdateCartQuantity {
        product_id: ProductId,
        quantity: u32,
    },
    ClearCart,
    SetUsers(Vec<User>),
    RemoveUser(UserId),
    SetCoupons(Vec<Coupon>),
    RemoveCoupon(CouponId),
}

impl Action {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetCurrentUser(_) => "SET_CURRENT_USER",
            Self::Logout => "LOGOUT",
            Self::SetFilters(_) => "SET_FILTERS",
            Self::ResetFilters => "RESET_FILTERS",
            Self::ApplyFilters { .. } => "APPLY_FILTERS",
            Self::SetProducts(_) => "SET_PRODUCTS",
            Self::RemoveProduct(_) => "REMOVE_PRODUCT",
            Self::SetNewArrivals(_) => "SET_NEW_ARRIVALS",
            Self::SetBestSellers(_) => "SET_BEST_SELLERS",
            Self::AddToWishlist(_) => "ADD_TO_WISHLIST",
            Self::RemoveFromWishlist(_) => "REMOVE_FROM_WISHLIST",
            Self::AddToCart(_) => "ADD_TO_CART",
            Self::RemoveFromCart(_) => "REMOVE_FROM_CART",
            Self::UpdateCartQuantity { .. } => "UPDATE_CART_QUANTITY",
            Self::ClearCart => "CLEAR_CART",
            Self::SetUsers(_) => "SET_USERS",
            Self::RemoveUser(_) => "REMOVE_USER",
            Self::SetCoupons(_) => "SET_COUPONS",
            Self::RemoveCoupon(_) => "REMOVE_COUPON",
        }
    }
}

/// Shared handle to the store. Clones refer to the same state.
#[derive(Debug, Clone)]
pub struct Store {
    sender: Arc<watch::Sender<StoreState>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StoreState::default())
    }
}

impl Store {
    #[must_use]
    pub fn new(initial: StoreState) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Apply `action` and notify subscribers.
    pub fn dispatch(&self, action: Action) {
        debug!(action = action.name(), "Dispatching store action");
        self.sender.send_modify(|state| state.apply(action));
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> StoreState {
        self.sender.borrow().clone()
    }

    /// Read the current state without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        f(&self.sender.borrow())
    }

    /// Receive a notification after every dispatch.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.sender.subscribe()
    }
}

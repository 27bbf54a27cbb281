//! # POS Terminal
//!
//! The surface the screen layer calls, one method per user action.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                         │
//! │  │  Empty   │────►│ In Cart  │────►│ Placed   │──► CheckoutSink         │
//! │  │  Cart    │     │          │     │  Order   │                         │
//! │  └──────────┘     └──────────┘     └────┬─────┘                         │
//! │       ▲                │                │                               │
//! │       │           add_to_cart           │ cart cleared                  │
//! │       │           remove_from_cart      │                               │
//! │       │           decrement_in_cart     │                               │
//! │       │                │                │                               │
//! │       └─ cancel_order ─┘◄───────────────┘                               │
//! │                                                                         │
//! │  Browsing (set_category, set_search_query) never touches the cart.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use bistro_core::{
    compute, Cart, CartAction, Catalog, CatalogProvider, CategoryFilter, FilterState, MenuItem,
    Money, OrderSummary, OrderType, SearchQuery, StaticCatalog, TaxRate,
};

use crate::checkout::{CheckoutSink, Order};
use crate::error::{TerminalError, TerminalResult};
use crate::menu_file::FileCatalog;
use crate::state::{CartState, TerminalConfig};

/// One ordering session on one terminal.
pub struct PosTerminal {
    catalog: Catalog,
    cart: CartState,
    filter: Mutex<FilterState>,
    order_type: Mutex<OrderType>,
    config: TerminalConfig,
    checkout: Arc<dyn CheckoutSink>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl PosTerminal {
    /// Creates a terminal over an already loaded catalog.
    pub fn new(catalog: Catalog, config: TerminalConfig, checkout: Arc<dyn CheckoutSink>) -> Self {
        info!(
            store = %config.store_name,
            cashier = %config.cashier,
            items = catalog.len(),
            "Terminal ready"
        );

        PosTerminal {
            catalog,
            cart: CartState::new(),
            filter: Mutex::new(FilterState::default()),
            order_type: Mutex::new(config.default_order_type),
            config,
            checkout,
        }
    }

    /// Creates a terminal whose menu comes from `config.menu_path`, or the
    /// house menu when no path is configured.
    pub fn from_config(config: TerminalConfig, checkout: Arc<dyn CheckoutSink>) -> TerminalResult<Self> {
        let provider: Box<dyn CatalogProvider> = match &config.menu_path {
            Some(path) => Box::new(FileCatalog::open(path)?),
            None => Box::new(StaticCatalog::house_menu()),
        };
        let catalog = Catalog::from_provider(provider.as_ref())?;
        Ok(PosTerminal::new(catalog, config, checkout))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Applies any cart action.
    pub fn dispatch(&self, action: &CartAction) -> TerminalResult<Arc<Cart>> {
        debug!(?action, "dispatch");
        Ok(self.cart.update(|cart| cart.apply(&self.catalog, action))?)
    }

    /// Adds one unit of a menu item.
    ///
    /// ## Errors
    /// - `ItemNotFound` if the id is not on the menu; the cart is unchanged
    pub fn add_to_cart(&self, item_id: &str) -> TerminalResult<Arc<Cart>> {
        debug!(item_id = %item_id, "add_to_cart");
        Ok(self.cart.update(|cart| cart.add_item(&self.catalog, item_id))?)
    }

    /// Drops an item's whole line. Unknown or absent ids are a no-op.
    pub fn remove_from_cart(&self, item_id: &str) -> Arc<Cart> {
        debug!(item_id = %item_id, "remove_from_cart");
        self.cart.modify(|cart| cart.remove_item(item_id))
    }

    /// Takes one unit off an item's line.
    pub fn decrement_in_cart(&self, item_id: &str) -> Arc<Cart> {
        debug!(item_id = %item_id, "decrement_in_cart");
        self.cart.modify(|cart| cart.decrement_item(item_id))
    }

    /// Sets a line's quantity; 0 removes the line.
    pub fn set_quantity_in_cart(&self, item_id: &str, quantity: i64) -> TerminalResult<Arc<Cart>> {
        debug!(item_id = %item_id, quantity, "set_quantity_in_cart");
        Ok(self.cart.update(|cart| cart.set_quantity(item_id, quantity))?)
    }

    /// Abandons the current order.
    pub fn cancel_order(&self) -> Arc<Cart> {
        info!("Order cancelled, clearing cart");
        self.cart.modify(Cart::clear)
    }

    /// The current cart.
    pub fn cart(&self) -> Arc<Cart> {
        self.cart.snapshot().cart
    }

    // =========================================================================
    // Browsing
    // =========================================================================

    /// Selects a category and returns the visible items.
    pub fn set_category(&self, label: &str) -> Vec<Arc<MenuItem>> {
        debug!(category = %label, "set_category");
        let mut filter = lock(&self.filter);
        filter.category = CategoryFilter::from_label(label);
        filter.apply(self.catalog.get_all())
    }

    /// Updates the search text and returns the visible items.
    pub fn set_search_query(&self, text: &str) -> Vec<Arc<MenuItem>> {
        debug!(query = %text, "set_search_query");
        let mut filter = lock(&self.filter);
        filter.query = SearchQuery::new(text);
        filter.apply(self.catalog.get_all())
    }

    /// Items visible under the current category and search.
    pub fn visible_items(&self) -> Vec<Arc<MenuItem>> {
        lock(&self.filter).apply(self.catalog.get_all())
    }

    /// Labels for the category bar.
    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories()
    }

    // =========================================================================
    // Order
    // =========================================================================

    pub fn order_type(&self) -> OrderType {
        *lock(&self.order_type)
    }

    pub fn set_order_type(&self, order_type: OrderType) {
        debug!(%order_type, "set_order_type");
        *lock(&self.order_type) = order_type;
    }

    /// Summary of the current cart for an explicit rate and discount.
    pub fn get_order_summary(&self, tax_rate: TaxRate, discount: Money) -> OrderSummary {
        compute(&self.cart(), tax_rate, discount)
    }

    /// Summary of the current cart with the configured rate and discount.
    pub fn order_summary(&self) -> OrderSummary {
        self.get_order_summary(self.config.tax_rate(), self.config.discount())
    }

    /// Finalizes the current cart and hands it to checkout.
    ///
    /// ## Flow
    /// 1. Claim the cart: swap it for an empty one, retrying if another
    ///    action lands in between
    /// 2. Submit the frozen order to the checkout sink
    /// 3. If checkout fails, put the claimed cart back unless the cart has
    ///    been touched since the claim
    ///
    /// ## Errors
    /// - `EmptyOrder` when there is nothing to place
    /// - `Checkout` when the sink fails
    pub fn place_order(&self) -> TerminalResult<Order> {
        let (order, claimed, cleared_version) = loop {
            let claimed = self.cart.snapshot();
            if claimed.cart.is_empty() {
                return Err(TerminalError::EmptyOrder);
            }

            let summary = compute(&claimed.cart, self.config.tax_rate(), self.config.discount());
            let order = Order::new(&claimed.cart, summary, self.order_type(), &self.config.cashier);

            match self.cart.compare_and_swap(claimed.version, Cart::new()) {
                Ok(cleared) => break (order, claimed, cleared.version),
                Err(stale) => {
                    warn!(
                        expected = stale.expected,
                        current = stale.current,
                        "Cart changed while placing order, retrying"
                    );
                }
            }
        };

        if let Err(e) = self.checkout.submit(&order) {
            match self
                .cart
                .compare_and_swap(cleared_version, Cart::clone(&claimed.cart))
            {
                Ok(_) => warn!(order_id = %order.id, "Checkout failed, cart restored"),
                Err(_) => warn!(
                    order_id = %order.id,
                    "Checkout failed and the cart changed since, not restoring"
                ),
            }
            return Err(e.into());
        }

        info!(
            order_id = %order.id,
            order_type = %order.order_type,
            items = order.summary.line_count,
            total = %self.config.format_currency(order.summary.total),
            amount_due = %self.config.format_currency(order.amount_due),
            "Order placed"
        );
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::{CheckoutError, MemoryCheckout};
    use bistro_core::{CoreError, ExactMoney};
    use tempfile::tempdir;

    struct RejectingCheckout;

    impl CheckoutSink for RejectingCheckout {
        fn submit(&self, _order: &Order) -> Result<(), CheckoutError> {
            Err(CheckoutError::Rejected("kitchen closed".into()))
        }
    }

    fn terminal() -> (PosTerminal, Arc<MemoryCheckout>) {
        let sink = Arc::new(MemoryCheckout::new());
        let terminal = PosTerminal::from_config(TerminalConfig::default(), sink.clone()).unwrap();
        (terminal, sink)
    }

    fn names(items: &[Arc<MenuItem>]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_add_twice_is_one_line_of_two() {
        let (terminal, _) = terminal();
        terminal.add_to_cart("1").unwrap();
        let cart = terminal.add_to_cart("1").unwrap();

        assert_eq!(cart.distinct_items(), 1);
        assert_eq!(cart.line("1").unwrap().quantity, 2);
    }

    #[test]
    fn test_add_unknown_item() {
        let (terminal, _) = terminal();
        terminal.add_to_cart("2").unwrap();

        let err = terminal.add_to_cart("404").unwrap_err();
        assert!(matches!(err, TerminalError::Core(CoreError::ItemNotFound(_))));
        assert_eq!(terminal.cart().total_quantity(), 1);
    }

    #[test]
    fn test_remove_never_added_is_noop() {
        let (terminal, _) = terminal();
        terminal.add_to_cart("2").unwrap();
        let before = terminal.cart();

        let after = terminal.remove_from_cart("5");
        assert_eq!(after, before);
    }

    #[test]
    fn test_remove_and_decrement() {
        let (terminal, _) = terminal();
        for _ in 0..3 {
            terminal.add_to_cart("4").unwrap();
        }
        terminal.add_to_cart("6").unwrap();

        let cart = terminal.decrement_in_cart("4");
        assert_eq!(cart.line("4").unwrap().quantity, 2);

        let cart = terminal.remove_from_cart("4");
        assert!(cart.line("4").is_none());
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_set_quantity_and_dispatch() {
        let (terminal, _) = terminal();
        terminal
            .dispatch(&CartAction::Add { item_id: "3".into() })
            .unwrap();

        let cart = terminal.set_quantity_in_cart("3", 4).unwrap();
        assert_eq!(cart.line("3").unwrap().quantity, 4);

        assert!(terminal.set_quantity_in_cart("3", -1).is_err());

        let cart = terminal.dispatch(&CartAction::Clear).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_wonton_and_sausages_summary() {
        let (terminal, _) = terminal();
        terminal.add_to_cart("1").unwrap();
        terminal.add_to_cart("5").unwrap();

        let summary = terminal.get_order_summary(TaxRate::from_bps(1000), Money::from_cents(1000));
        assert_eq!(summary.subtotal.cents(), 3000);
        assert_eq!(summary.tax_amount, ExactMoney::from_cents(300));
        assert_eq!(summary.total, ExactMoney::from_cents(2300));

        assert_eq!(terminal.order_summary(), summary);
    }

    #[test]
    fn test_summary_is_stable_without_mutation() {
        let (terminal, _) = terminal();
        terminal.add_to_cart("3").unwrap();

        assert_eq!(terminal.order_summary(), terminal.order_summary());
    }

    #[test]
    fn test_cancel_then_summary() {
        let (terminal, _) = terminal();
        terminal.add_to_cart("1").unwrap();
        terminal.cancel_order();

        let summary = terminal.order_summary();
        assert_eq!(summary.line_count, 0);
        assert!(summary.subtotal.is_zero());
        assert_eq!(summary.total, ExactMoney::from_cents(-1000));
    }

    #[test]
    fn test_browsing() {
        let (terminal, _) = terminal();

        assert_eq!(terminal.set_category("All").len(), 6);
        assert_eq!(
            terminal.categories(),
            vec!["All Menu", "Meals", "Soups", "Beverages", "Appetizer", "Side Dish"]
        );

        let visible = terminal.set_search_query("FRIED");
        assert_eq!(
            names(&visible),
            vec!["Deep Fried Wonton", "Stir-Fried Noodles", "Fried Rice with Pork"]
        );

        // The search sticks while the category changes
        let visible = terminal.set_category("Meals");
        assert_eq!(names(&visible), vec!["Stir-Fried Noodles", "Fried Rice with Pork"]);
        assert_eq!(terminal.visible_items(), visible);

        assert!(terminal.set_category("Soups").is_empty());
        assert!(terminal.cart().is_empty());
    }

    #[test]
    fn test_place_order() {
        let (terminal, sink) = terminal();
        terminal.set_order_type(OrderType::Delivery);
        terminal.add_to_cart("1").unwrap();
        terminal.add_to_cart("5").unwrap();

        let order = terminal.place_order().unwrap();

        assert_eq!(order.order_type, OrderType::Delivery);
        assert_eq!(order.cashier, "Cashier 01");
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.summary.total, ExactMoney::from_cents(2300));
        assert_eq!(order.amount_due.cents(), 2300);

        assert!(terminal.cart().is_empty());
        assert_eq!(sink.orders(), vec![order]);
    }

    #[test]
    fn test_place_order_clamps_amount_due() {
        let sink = Arc::new(MemoryCheckout::new());
        let config = TerminalConfig {
            discount_cents: 5000,
            ..TerminalConfig::default()
        };
        let terminal = PosTerminal::from_config(config, sink).unwrap();
        terminal.add_to_cart("5").unwrap();

        let order = terminal.place_order().unwrap();
        assert_eq!(order.summary.total, ExactMoney::from_cents(1500 + 150 - 5000));
        assert!(order.amount_due.is_zero());
    }

    #[test]
    fn test_place_empty_order() {
        let (terminal, sink) = terminal();
        assert!(matches!(terminal.place_order(), Err(TerminalError::EmptyOrder)));
        assert!(sink.orders().is_empty());
    }

    #[test]
    fn test_failed_checkout_restores_cart() {
        let terminal = PosTerminal::from_config(
            TerminalConfig::default(),
            Arc::new(RejectingCheckout),
        )
        .unwrap();
        terminal.add_to_cart("2").unwrap();
        terminal.add_to_cart("2").unwrap();

        let err = terminal.place_order().unwrap_err();
        assert!(matches!(err, TerminalError::Checkout(CheckoutError::Rejected(_))));
        assert_eq!(terminal.cart().line("2").unwrap().quantity, 2);
    }

    #[test]
    fn test_menu_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("menu.toml");
        std::fs::write(
            &path,
            "[[items]]\nid = \"c1\"\nname = \"Congee\"\nprice_cents = 900\ncategory = \"Soups\"\n",
        )
        .unwrap();

        let config = TerminalConfig {
            menu_path: Some(path),
            ..TerminalConfig::default()
        };
        let terminal = PosTerminal::from_config(config, Arc::new(MemoryCheckout::new())).unwrap();

        assert_eq!(terminal.catalog().len(), 1);
        assert_eq!(terminal.set_category("Soups").len(), 1);
        assert!(terminal.add_to_cart("1").is_err());
    }

    #[test]
    fn test_missing_menu_file() {
        let config = TerminalConfig {
            menu_path: Some("/definitely/not/here/menu.toml".into()),
            ..TerminalConfig::default()
        };
        let result = PosTerminal::from_config(config, Arc::new(MemoryCheckout::new()));
        assert!(matches!(result, Err(TerminalError::Io(_))));
    }
}

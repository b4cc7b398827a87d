use chrono::NaiveDate;

use super::loader::DataContext;
use super::models::{GeolocationRecord, Order, OrderItem, Payment};

/// A categorical predicate; `All` is the sentinel for "no predicate"
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    #[default]
    All,
    Only(String),
}

impl Selector {
    pub const ALL_LABEL: &'static str = "All";

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Selector::All => Self::ALL_LABEL,
            Selector::Only(value) => value,
        }
    }
}

/// The user's current filter choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category: Selector,
    pub payment: Selector,
    pub state: Selector,
}

impl FilterSelection {
    /// Default selection: the full order-date extent, no categorical predicates
    pub fn full_extent(ctx: &DataContext) -> Self {
        let (start_date, end_date) = ctx.date_extent();
        Self {
            start_date,
            end_date,
            category: Selector::All,
            payment: Selector::All,
            state: Selector::All,
        }
    }
}

/// Read-only filtered views over the loaded tables
pub struct FilteredData<'a> {
    pub orders: Vec<&'a Order>,
    pub order_items: Vec<&'a OrderItem>,
    pub payments: Vec<&'a Payment>,
    pub geolocation: Vec<&'a GeolocationRecord>,
}

/// Apply a selection to the context. An inverted date range or a selector
/// matching zero rows yields empty views, never an error.
pub fn apply<'a>(ctx: &'a DataContext, selection: &FilterSelection) -> FilteredData<'a> {
    let orders = ctx
        .orders
        .iter()
        .filter(|o| {
            let date = o.order_purchase_timestamp.date();
            date >= selection.start_date && date <= selection.end_date
        })
        .collect();

    // A category selection joins items to products on product_id; items
    // whose product is unknown or uncategorized drop out of the join
    let order_items = match &selection.category {
        Selector::All => ctx.order_items.iter().collect(),
        Selector::Only(category) => ctx
            .order_items
            .iter()
            .filter(|item| ctx.category_of(&item.product_id) == Some(category.as_str()))
            .collect(),
    };

    let payments = ctx
        .payments
        .iter()
        .filter(|p| selection.payment.matches(&p.payment_type))
        .collect();

    let geolocation = ctx
        .geolocation
        .iter()
        .filter(|g| selection.state.matches(&g.geolocation_state))
        .collect();

    FilteredData {
        orders,
        order_items,
        payments,
        geolocation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testkit;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_ctx() -> DataContext {
        testkit::context(
            vec![
                testkit::order("o1", "c1", "2017-01-05 09:30:00"),
                testkit::order("o2", "c2", "2017-02-10 14:00:00"),
                testkit::order("o3", "c3", "2017-02-15 23:59:59"),
            ],
            vec![
                testkit::product("p1", Some("toys")),
                testkit::product("p2", Some("electronics")),
                testkit::product("p3", None),
            ],
            vec![
                testkit::item("o1", "p1"),
                testkit::item("o2", "p2"),
                testkit::item("o2", "p2"),
                testkit::item("o3", "p3"),
                testkit::item("o3", "ghost"),
            ],
            vec![
                testkit::payment("o1", "credit_card"),
                testkit::payment("o2", "boleto"),
                testkit::payment("o3", "credit_card"),
            ],
            vec![testkit::geo("SP"), testkit::geo("SP"), testkit::geo("RJ")],
        )
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let ctx = sample_ctx();
        let mut selection = FilterSelection::full_extent(&ctx);
        selection.start_date = date(2017, 1, 5);
        selection.end_date = date(2017, 2, 10);

        let filtered = apply(&ctx, &selection);
        assert_eq!(filtered.orders.len(), 2);
        assert!(filtered.orders.len() <= ctx.orders.len());
        for order in &filtered.orders {
            let d = order.order_purchase_timestamp.date();
            assert!(d >= selection.start_date && d <= selection.end_date);
        }
    }

    #[test]
    fn test_inverted_range_yields_empty() {
        let ctx = sample_ctx();
        let mut selection = FilterSelection::full_extent(&ctx);
        selection.start_date = date(2017, 3, 1);
        selection.end_date = date(2017, 1, 1);

        let filtered = apply(&ctx, &selection);
        assert!(filtered.orders.is_empty());
    }

    #[test]
    fn test_all_selectors_are_identity() {
        let ctx = sample_ctx();
        let selection = FilterSelection::full_extent(&ctx);

        let filtered = apply(&ctx, &selection);
        assert_eq!(filtered.orders.len(), ctx.orders.len());
        assert_eq!(filtered.order_items.len(), ctx.order_items.len());
        assert_eq!(filtered.payments.len(), ctx.payments.len());
        assert_eq!(filtered.geolocation.len(), ctx.geolocation.len());
    }

    #[test]
    fn test_payment_selection_keeps_only_matches() {
        let ctx = sample_ctx();
        let mut selection = FilterSelection::full_extent(&ctx);
        selection.payment = Selector::Only("credit_card".to_string());

        let filtered = apply(&ctx, &selection);
        assert_eq!(filtered.payments.len(), 2);
        assert!(filtered
            .payments
            .iter()
            .all(|p| p.payment_type == "credit_card"));
    }

    #[test]
    fn test_state_selection_keeps_only_matches() {
        let ctx = sample_ctx();
        let mut selection = FilterSelection::full_extent(&ctx);
        selection.state = Selector::Only("SP".to_string());

        let filtered = apply(&ctx, &selection);
        assert_eq!(filtered.geolocation.len(), 2);
        assert!(filtered
            .geolocation
            .iter()
            .all(|g| g.geolocation_state == "SP"));
    }

    #[test]
    fn test_category_selection_joins_through_products() {
        let ctx = sample_ctx();
        let mut selection = FilterSelection::full_extent(&ctx);
        selection.category = Selector::Only("electronics".to_string());

        let filtered = apply(&ctx, &selection);
        assert_eq!(filtered.order_items.len(), 2);
        assert!(filtered.order_items.iter().all(|i| i.product_id == "p2"));
    }

    #[test]
    fn test_category_join_drops_unknown_and_uncategorized() {
        let ctx = sample_ctx();
        let mut selection = FilterSelection::full_extent(&ctx);
        selection.category = Selector::Only("toys".to_string());

        let filtered = apply(&ctx, &selection);
        // p3 has a null category and "ghost" has no product row
        assert_eq!(filtered.order_items.len(), 1);
        assert_eq!(filtered.order_items[0].product_id, "p1");
    }

    #[test]
    fn test_no_match_selection_yields_empty_not_error() {
        let ctx = sample_ctx();
        let mut selection = FilterSelection::full_extent(&ctx);
        selection.category = Selector::Only("furniture".to_string());
        selection.payment = Selector::Only("debit".to_string());
        selection.state = Selector::Only("AM".to_string());

        let filtered = apply(&ctx, &selection);
        assert!(filtered.order_items.is_empty());
        assert!(filtered.payments.is_empty());
        assert!(filtered.geolocation.is_empty());
    }
}

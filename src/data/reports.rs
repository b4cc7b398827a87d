use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use super::filter::{self, FilterSelection};
use super::loader::DataContext;
use super::models::{GeolocationRecord, Order, OrderItem, Payment};

pub const TOP_PRODUCTS_LIMIT: usize = 10;

/// Result of a report generator; charts are never handed empty series
#[derive(Debug, Clone, PartialEq)]
pub enum ReportData<T> {
    Ready(T),
    NoData,
}

impl<T> ReportData<T> {
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            ReportData::Ready(value) => Some(value),
            ReportData::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, ReportData::NoData)
    }
}

/// Whether the state selector applies to the geographic report.
///
/// `AllStates` preserves the source dashboard's behavior: the selector is
/// collected but the report always counts the full geolocation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeoScope {
    #[default]
    AllStates,
    SelectedState,
}

impl GeoScope {
    pub fn toggle(&self) -> Self {
        match self {
            GeoScope::AllStates => GeoScope::SelectedState,
            GeoScope::SelectedState => GeoScope::AllStates,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeoScope::AllStates => "all states",
            GeoScope::SelectedState => "selected state",
        }
    }
}

/// One row of the top-products ranking; category is the display label and
/// stays None when the product id has no catalog match
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSales {
    pub product_id: String,
    pub category: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateCount {
    pub state: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentShare {
    pub payment_type: String,
    pub count: u64,
    pub percent: f64,
}

/// One time bucket of a trend series
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub count: u64,
}

/// Count purchases per product id and keep the `limit` highest counts.
/// Ties break toward the first-encountered product (stable descending
/// order); labels come from a left join back to the product catalog.
pub fn top_products(
    ctx: &DataContext,
    items: &[&OrderItem],
    limit: usize,
) -> ReportData<Vec<ProductSales>> {
    if items.is_empty() {
        return ReportData::NoData;
    }

    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
    for (idx, item) in items.iter().enumerate() {
        let entry = counts.entry(item.product_id.as_str()).or_insert((0, idx));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, u64, usize)> = counts
        .into_iter()
        .map(|(id, (count, first_seen))| (id, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(limit);

    ReportData::Ready(
        ranked
            .into_iter()
            .map(|(id, count, _)| ProductSales {
                product_id: id.to_string(),
                category: ctx.category_of(id).map(str::to_string),
                count,
            })
            .collect(),
    )
}

/// Count rows per state code, ordered by state code ascending (not by count)
pub fn state_distribution(
    geolocation: &[&GeolocationRecord],
) -> ReportData<Vec<StateCount>> {
    if geolocation.is_empty() {
        return ReportData::NoData;
    }

    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in geolocation {
        *counts.entry(record.geolocation_state.as_str()).or_default() += 1;
    }

    ReportData::Ready(
        counts
            .into_iter()
            .map(|(state, count)| StateCount {
                state: state.to_string(),
                count,
            })
            .collect(),
    )
}

/// Count rows per payment type and derive each type's percentage share,
/// largest share first
pub fn payment_distribution(payments: &[&Payment]) -> ReportData<Vec<PaymentShare>> {
    if payments.is_empty() {
        return ReportData::NoData;
    }

    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for payment in payments {
        *counts.entry(payment.payment_type.as_str()).or_default() += 1;
    }

    let total = payments.len() as f64;
    let mut shares: Vec<PaymentShare> = counts
        .into_iter()
        .map(|(payment_type, count)| PaymentShare {
            payment_type: payment_type.to_string(),
            count,
            percent: count as f64 * 100.0 / total,
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));

    ReportData::Ready(shares)
}

/// Orders per calendar month, chronologically ascending
pub fn monthly_trend(orders: &[&Order]) -> ReportData<Vec<TrendPoint>> {
    if orders.is_empty() {
        return ReportData::NoData;
    }

    let mut buckets: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for order in orders {
        let date = order.order_purchase_timestamp.date();
        *buckets.entry((date.year(), date.month())).or_default() += 1;
    }

    ReportData::Ready(
        buckets
            .into_iter()
            .map(|((year, month), count)| TrendPoint {
                label: format!("{:04}-{:02}", year, month),
                count,
            })
            .collect(),
    )
}

/// Orders per ISO calendar week, chronologically ascending
pub fn weekly_trend(orders: &[&Order]) -> ReportData<Vec<TrendPoint>> {
    if orders.is_empty() {
        return ReportData::NoData;
    }

    let mut buckets: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for order in orders {
        let week = order.order_purchase_timestamp.date().iso_week();
        *buckets.entry((week.year(), week.week())).or_default() += 1;
    }

    ReportData::Ready(
        buckets
            .into_iter()
            .map(|((year, week), count)| TrendPoint {
                label: format!("{:04}-W{:02}", year, week),
                count,
            })
            .collect(),
    )
}

/// The five reports of one dashboard render
pub struct ReportBundle {
    pub top_products: ReportData<Vec<ProductSales>>,
    pub state_distribution: ReportData<Vec<StateCount>>,
    pub payment_distribution: ReportData<Vec<PaymentShare>>,
    pub monthly_trend: ReportData<Vec<TrendPoint>>,
    pub weekly_trend: ReportData<Vec<TrendPoint>>,
}

/// The full pure pipeline: one selection in, five reports out. Invoked by
/// the UI on every filter change; holds no state of its own.
pub fn build_reports(
    ctx: &DataContext,
    selection: &FilterSelection,
    geo_scope: GeoScope,
) -> ReportBundle {
    let filtered = filter::apply(ctx, selection);

    let geo_rows: Vec<&GeolocationRecord> = match geo_scope {
        GeoScope::AllStates => ctx.geolocation.iter().collect(),
        GeoScope::SelectedState => filtered.geolocation,
    };

    ReportBundle {
        top_products: top_products(ctx, &filtered.order_items, TOP_PRODUCTS_LIMIT),
        state_distribution: state_distribution(&geo_rows),
        payment_distribution: payment_distribution(&filtered.payments),
        monthly_trend: monthly_trend(&filtered.orders),
        weekly_trend: weekly_trend(&filtered.orders),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Selector;
    use crate::data::testkit;

    fn items_ctx() -> DataContext {
        testkit::context(
            vec![testkit::order("o1", "c1", "2017-01-01 00:00:00")],
            vec![
                testkit::product("p1", Some("toys")),
                testkit::product("p2", Some("electronics")),
            ],
            vec![
                testkit::item("o1", "p1"),
                testkit::item("o1", "p2"),
                testkit::item("o1", "p2"),
                testkit::item("o1", "ghost"),
            ],
            vec![],
            vec![],
        )
    }

    #[test]
    fn test_top_products_ranking_and_labels() {
        let ctx = items_ctx();
        let items: Vec<_> = ctx.order_items.iter().collect();

        let ReportData::Ready(top) = top_products(&ctx, &items, 10) else {
            panic!("expected data");
        };
        assert!(top.len() <= 10);
        assert_eq!(top[0].product_id, "p2");
        assert_eq!(top[0].count, 2);
        assert_eq!(top[0].category.as_deref(), Some("electronics"));
        // join miss keeps a null label
        let ghost = top.iter().find(|p| p.product_id == "ghost").unwrap();
        assert_eq!(ghost.category, None);
        // displayed counts never exceed the filtered item count
        let shown: u64 = top.iter().map(|p| p.count).sum();
        assert!(shown <= items.len() as u64);
        // descending
        for pair in top.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn test_top_products_ties_keep_first_encountered_order() {
        let ctx = testkit::context(
            vec![testkit::order("o1", "c1", "2017-01-01 00:00:00")],
            vec![],
            vec![
                testkit::item("o1", "b"),
                testkit::item("o1", "a"),
                testkit::item("o1", "b"),
                testkit::item("o1", "a"),
            ],
            vec![],
            vec![],
        );
        let items: Vec<_> = ctx.order_items.iter().collect();

        let ReportData::Ready(top) = top_products(&ctx, &items, 10) else {
            panic!("expected data");
        };
        assert_eq!(top[0].product_id, "b");
        assert_eq!(top[1].product_id, "a");
    }

    #[test]
    fn test_top_products_truncates_to_limit() {
        let ctx = testkit::context(
            vec![testkit::order("o1", "c1", "2017-01-01 00:00:00")],
            vec![],
            (0..15)
                .map(|i| testkit::item("o1", &format!("p{:02}", i)))
                .collect(),
            vec![],
            vec![],
        );
        let items: Vec<_> = ctx.order_items.iter().collect();

        let ReportData::Ready(top) = top_products(&ctx, &items, 10) else {
            panic!("expected data");
        };
        assert_eq!(top.len(), 10);
    }

    #[test]
    fn test_top_products_empty_input_is_no_data() {
        let ctx = items_ctx();
        assert!(top_products(&ctx, &[], 10).is_no_data());
    }

    #[test]
    fn test_state_distribution_orders_by_state_code() {
        let rows = [
            testkit::geo("SP"),
            testkit::geo("AC"),
            testkit::geo("SP"),
            testkit::geo("RJ"),
        ];
        let refs: Vec<_> = rows.iter().collect();

        let ReportData::Ready(counts) = state_distribution(&refs) else {
            panic!("expected data");
        };
        let states: Vec<_> = counts.iter().map(|c| c.state.as_str()).collect();
        // ascending state code, not descending count
        assert_eq!(states, vec!["AC", "RJ", "SP"]);
        assert_eq!(counts[2].count, 2);
    }

    #[test]
    fn test_payment_shares_sum_to_one_hundred() {
        let rows = [
            testkit::payment("o1", "credit_card"),
            testkit::payment("o2", "credit_card"),
            testkit::payment("o3", "boleto"),
            testkit::payment("o4", "voucher"),
            testkit::payment("o5", "voucher"),
            testkit::payment("o6", "voucher"),
        ];
        let refs: Vec<_> = rows.iter().collect();

        let ReportData::Ready(shares) = payment_distribution(&refs) else {
            panic!("expected data");
        };
        // every distinct type present, largest share first
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].payment_type, "voucher");
        let total: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_payment_distribution_empty_is_no_data() {
        assert!(payment_distribution(&[]).is_no_data());
    }

    #[test]
    fn test_monthly_trend_buckets() {
        let orders = [
            testkit::order("o1", "c1", "2017-01-05 10:00:00"),
            testkit::order("o2", "c2", "2017-02-10 11:00:00"),
            testkit::order("o3", "c3", "2017-02-15 12:00:00"),
        ];
        let refs: Vec<_> = orders.iter().collect();

        let ReportData::Ready(trend) = monthly_trend(&refs) else {
            panic!("expected data");
        };
        assert_eq!(
            trend,
            vec![
                TrendPoint {
                    label: "2017-01".to_string(),
                    count: 1
                },
                TrendPoint {
                    label: "2017-02".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_weekly_trend_is_ascending_across_year_boundary() {
        let orders = [
            testkit::order("o1", "c1", "2017-01-02 08:00:00"),
            testkit::order("o2", "c2", "2016-12-31 08:00:00"),
            testkit::order("o3", "c3", "2017-01-02 20:00:00"),
        ];
        let refs: Vec<_> = orders.iter().collect();

        let ReportData::Ready(trend) = weekly_trend(&refs) else {
            panic!("expected data");
        };
        // 2016-12-31 falls in ISO week 2016-W52, 2017-01-02 opens 2017-W01
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].label, "2016-W52");
        assert_eq!(trend[1].label, "2017-W01");
        assert_eq!(trend[1].count, 2);
        for pair in trend.windows(2) {
            assert!(pair[0].label < pair[1].label);
        }
    }

    #[test]
    fn test_trend_empty_is_no_data() {
        assert!(monthly_trend(&[]).is_no_data());
        assert!(weekly_trend(&[]).is_no_data());
    }

    fn geo_ctx() -> DataContext {
        testkit::context(
            vec![testkit::order("o1", "c1", "2017-01-01 00:00:00")],
            vec![],
            vec![],
            vec![testkit::payment("o1", "credit_card")],
            vec![testkit::geo("SP"), testkit::geo("RJ")],
        )
    }

    #[test]
    fn test_geo_scope_all_states_ignores_selection() {
        let ctx = geo_ctx();
        let mut selection = FilterSelection::full_extent(&ctx);
        selection.state = Selector::Only("SP".to_string());

        let bundle = build_reports(&ctx, &selection, GeoScope::AllStates);
        let ReportData::Ready(counts) = bundle.state_distribution else {
            panic!("expected data");
        };
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_geo_scope_selected_state_applies_selection() {
        let ctx = geo_ctx();
        let mut selection = FilterSelection::full_extent(&ctx);
        selection.state = Selector::Only("SP".to_string());

        let bundle = build_reports(&ctx, &selection, GeoScope::SelectedState);
        let ReportData::Ready(counts) = bundle.state_distribution else {
            panic!("expected data");
        };
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].state, "SP");
    }

    #[test]
    fn test_bundle_reports_no_data_for_unmatched_category() {
        let ctx = items_ctx();
        let mut selection = FilterSelection::full_extent(&ctx);
        selection.category = Selector::Only("furniture".to_string());

        let bundle = build_reports(&ctx, &selection, GeoScope::AllStates);
        assert!(bundle.top_products.is_no_data());
    }
}

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use super::models::{
    Customer, GeolocationRecord, Order, OrderItem, Payment, Product, Seller,
};

pub const SELLERS_FILE: &str = "sellers_dataset.csv";
pub const GEOLOCATION_FILE: &str = "geolocation_dataset.csv";
pub const PRODUCTS_FILE: &str = "products_dataset.csv";
pub const ORDERS_FILE: &str = "orders_dataset.csv";
pub const PAYMENTS_FILE: &str = "order_payments_dataset.csv";
pub const CUSTOMERS_FILE: &str = "customers_dataset.csv";
pub const ORDER_ITEMS_FILE: &str = "order_items_dataset.csv";

/// Fatal dataset loading errors; there is no partial-load recovery
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {name} dataset at {path:?}")]
    Open {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {name} dataset")]
    Parse {
        name: &'static str,
        #[source]
        source: csv::Error,
    },
    #[error("orders dataset contains no rows")]
    NoOrders,
}

/// All seven datasets, loaded once at startup and read-only thereafter
pub struct DataContext {
    pub sellers: Vec<Seller>,
    pub geolocation: Vec<GeolocationRecord>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub payments: Vec<Payment>,
    pub customers: Vec<Customer>,
    pub order_items: Vec<OrderItem>,
    category_by_product: HashMap<String, Option<String>>,
}

impl DataContext {
    /// Read the seven fixed-name CSV files from `data_dir`.
    ///
    /// Any missing file, malformed row, or unparseable order timestamp is
    /// fatal; the caller surfaces the error before the terminal UI starts.
    pub fn load(data_dir: &Path) -> Result<Self, LoadError> {
        let sellers = read_table(data_dir, SELLERS_FILE, "sellers")?;
        let geolocation = read_table(data_dir, GEOLOCATION_FILE, "geolocation")?;
        let products = read_table(data_dir, PRODUCTS_FILE, "products")?;
        let orders: Vec<Order> = read_table(data_dir, ORDERS_FILE, "orders")?;
        let payments = read_table(data_dir, PAYMENTS_FILE, "order payments")?;
        let customers = read_table(data_dir, CUSTOMERS_FILE, "customers")?;
        let order_items = read_table(data_dir, ORDER_ITEMS_FILE, "order items")?;

        let ctx = Self::from_tables(
            sellers,
            geolocation,
            products,
            orders,
            payments,
            customers,
            order_items,
        )?;

        info!(
            orders = ctx.orders.len(),
            order_items = ctx.order_items.len(),
            payments = ctx.payments.len(),
            products = ctx.products.len(),
            geolocation = ctx.geolocation.len(),
            "datasets loaded"
        );

        Ok(ctx)
    }

    /// Build a context from already-parsed tables.
    pub fn from_tables(
        sellers: Vec<Seller>,
        geolocation: Vec<GeolocationRecord>,
        products: Vec<Product>,
        orders: Vec<Order>,
        payments: Vec<Payment>,
        customers: Vec<Customer>,
        order_items: Vec<OrderItem>,
    ) -> Result<Self, LoadError> {
        // The dashboard's date bounds come from the order extent
        if orders.is_empty() {
            return Err(LoadError::NoOrders);
        }

        let category_by_product = products
            .iter()
            .map(|p| (p.product_id.clone(), p.product_category_name.clone()))
            .collect();

        Ok(Self {
            sellers,
            geolocation,
            products,
            orders,
            payments,
            customers,
            order_items,
            category_by_product,
        })
    }

    /// Category of a product, or None when the product is unknown or
    /// carries a null category
    pub fn category_of(&self, product_id: &str) -> Option<&str> {
        self.category_by_product
            .get(product_id)
            .and_then(|c| c.as_deref())
    }

    /// Min/max calendar dates across all order purchase timestamps
    pub fn date_extent(&self) -> (NaiveDate, NaiveDate) {
        let mut min = self.orders[0].order_purchase_timestamp.date();
        let mut max = min;
        for order in &self.orders[1..] {
            let date = order.order_purchase_timestamp.date();
            if date < min {
                min = date;
            }
            if date > max {
                max = date;
            }
        }
        (min, max)
    }

    /// Distinct non-null product categories, sorted ascending
    pub fn category_options(&self) -> Vec<String> {
        distinct(self.products.iter().filter_map(|p| {
            p.product_category_name.as_deref()
        }))
    }

    /// Distinct payment types, sorted ascending
    pub fn payment_options(&self) -> Vec<String> {
        distinct(self.payments.iter().map(|p| p.payment_type.as_str()))
    }

    /// Distinct geolocation state codes, sorted ascending
    pub fn state_options(&self) -> Vec<String> {
        distinct(self.geolocation.iter().map(|g| g.geolocation_state.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let set: BTreeSet<&str> = values.filter(|v| !v.is_empty()).collect();
    set.into_iter().map(str::to_string).collect()
}

/// Deserialize every row of a CSV table, failing on the first bad row
pub fn read_records<T, R>(reader: R) -> Result<Vec<T>, csv::Error>
where
    T: DeserializeOwned,
    R: io::Read,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    rdr.deserialize().collect()
}

fn read_table<T: DeserializeOwned>(
    dir: &Path,
    file: &'static str,
    name: &'static str,
) -> Result<Vec<T>, LoadError> {
    let path = dir.join(file);
    let handle = File::open(&path).map_err(|source| LoadError::Open {
        name,
        path: path.clone(),
        source,
    })?;
    read_records(io::BufReader::new(handle)).map_err(|source| LoadError::Parse { name, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testkit;

    #[test]
    fn test_empty_orders_is_fatal() {
        let result = DataContext::from_tables(
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
        );
        assert!(matches!(result, Err(LoadError::NoOrders)));
    }

    #[test]
    fn test_date_extent_spans_orders() {
        let ctx = testkit::context(
            vec![
                testkit::order("o1", "c1", "2017-03-15 08:00:00"),
                testkit::order("o2", "c2", "2017-01-05 23:59:59"),
                testkit::order("o3", "c3", "2018-06-01 00:00:00"),
            ],
            vec![],
            vec![],
            vec![],
            vec![],
        );
        let (min, max) = ctx.date_extent();
        assert_eq!(min, chrono::NaiveDate::from_ymd_opt(2017, 1, 5).unwrap());
        assert_eq!(max, chrono::NaiveDate::from_ymd_opt(2018, 6, 1).unwrap());
    }

    #[test]
    fn test_options_are_distinct_and_sorted() {
        let ctx = testkit::context(
            vec![testkit::order("o1", "c1", "2017-01-01 00:00:00")],
            vec![
                testkit::product("p1", Some("toys")),
                testkit::product("p2", Some("electronics")),
                testkit::product("p3", Some("toys")),
                testkit::product("p4", None),
            ],
            vec![],
            vec![
                testkit::payment("o1", "voucher"),
                testkit::payment("o1", "credit_card"),
                testkit::payment("o1", "voucher"),
            ],
            vec![
                testkit::geo("SP"),
                testkit::geo("RJ"),
                testkit::geo("SP"),
            ],
        );
        assert_eq!(ctx.category_options(), vec!["electronics", "toys"]);
        assert_eq!(ctx.payment_options(), vec!["credit_card", "voucher"]);
        assert_eq!(ctx.state_options(), vec!["RJ", "SP"]);
    }

    #[test]
    fn test_category_lookup() {
        let ctx = testkit::context(
            vec![testkit::order("o1", "c1", "2017-01-01 00:00:00")],
            vec![
                testkit::product("p1", Some("toys")),
                testkit::product("p2", None),
            ],
            vec![],
            vec![],
            vec![],
        );
        assert_eq!(ctx.category_of("p1"), Some("toys"));
        assert_eq!(ctx.category_of("p2"), None);
        assert_eq!(ctx.category_of("missing"), None);
    }

    #[test]
    fn test_read_records_rejects_missing_column() {
        let csv = "order_id\no1\n";
        let result: Result<Vec<crate::data::models::OrderItem>, _> =
            read_records(csv.as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_read_records_parses_orders() {
        let csv = "order_id,customer_id,order_status,order_purchase_timestamp\n\
                   o1,c1,delivered,2017-10-02 10:56:33\n\
                   o2,c2,shipped,2018-07-24 20:41:37\n";
        let orders: Vec<Order> = read_records(csv.as_bytes()).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].order_id, "o2");
    }
}

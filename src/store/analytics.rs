//! Sales figures over recorded orders

use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::store::orders::Order;
use crate::utils::money::round2;

/// Aggregate sales numbers for the back office dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_orders: usize,
    pub total_sales: BigDecimal,
    pub average_order_value: BigDecimal,
    /// Sales keyed by `YYYY-MM` (UTC)
    pub by_month: BTreeMap<String, BigDecimal>,
}

/// Order totals grouped by calendar month of creation
pub fn sales_by_month(orders: &[Order]) -> BTreeMap<String, BigDecimal> {
    let mut months: BTreeMap<String, BigDecimal> = BTreeMap::new();
    for order in orders {
        let key = order.created_at.format("%Y-%m").to_string();
        let entry = months.entry(key).or_insert_with(|| BigDecimal::from(0));
        *entry += &order.total;
    }
    months.into_iter().map(|(k, v)| (k, round2(&v))).collect()
}

/// Count, sum and average of the given orders
pub fn summarize(orders: &[Order]) -> SalesSummary {
    let total_orders = orders.len();
    let total: BigDecimal = orders.iter().map(|o| &o.total).sum();
    let average = if total_orders == 0 {
        BigDecimal::from(0)
    } else {
        &total / BigDecimal::from(total_orders as u64)
    };

    SalesSummary {
        total_orders,
        total_sales: round2(&total),
        average_order_value: round2(&average),
        by_month: sales_by_month(orders),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::orders::OrderStatus;
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;

    fn order(id: &str, total: &str, year: i32, month: u32) -> Order {
        Order {
            id: id.to_string(),
            items: vec![],
            subtotal: BigDecimal::from_str(total).unwrap(),
            total: BigDecimal::from_str(total).unwrap(),
            payment_method: "cod".to_string(),
            status: OrderStatus::Placed,
            address: None,
            created_at: Utc.with_ymd_and_hms(year, month, 12, 10, 0, 0).unwrap(),
            delivered_at: None,
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.total_sales, BigDecimal::from(0));
        assert_eq!(summary.average_order_value, BigDecimal::from(0));
        assert!(summary.by_month.is_empty());
    }

    #[test]
    fn test_summary_and_months() {
        let orders = vec![
            order("a", "1000", 2024, 11),
            order("b", "2500.50", 2024, 11),
            order("c", "100", 2025, 1),
        ];
        let summary = summarize(&orders);

        assert_eq!(summary.total_orders, 3);
        assert_eq!(summary.total_sales, BigDecimal::from_str("3600.50").unwrap());
        assert_eq!(
            summary.average_order_value,
            BigDecimal::from_str("1200.17").unwrap()
        );

        let months: Vec<&String> = summary.by_month.keys().collect();
        assert_eq!(months, vec!["2024-11", "2025-01"]);
        assert_eq!(
            summary.by_month["2024-11"],
            BigDecimal::from_str("3500.50").unwrap()
        );
    }
}

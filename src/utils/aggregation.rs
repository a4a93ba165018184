use std::collections::HashMap;

use crate::types::Transaction;

/// Sum transaction values by an entity key, in first-seen key order.
pub fn sum_by<F>(records: &[Transaction], key_fn: F) -> Vec<(String, f64)>
where
    F: Fn(&Transaction) -> &str,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut grouped: Vec<(String, f64)> = Vec::new();

    for record in records {
        let key = key_fn(record);
        match positions.get(key) {
            Some(&idx) => grouped[idx].1 += record.value,
            None => {
                positions.insert(key, grouped.len());
                grouped.push((key.to_string(), record.value));
            }
        }
    }

    grouped
}

/// Sales per product subgroup
pub fn by_subgroup(records: &[Transaction]) -> Vec<(String, f64)> {
    sum_by(records, |r| r.subgroup.as_str())
}

/// Sales per product description
pub fn by_product(records: &[Transaction]) -> Vec<(String, f64)> {
    sum_by(records, |r| r.product_description.as_str())
}

/// Sales per customer name
pub fn by_customer(records: &[Transaction]) -> Vec<(String, f64)> {
    sum_by(records, |r| r.customer_name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn tx(customer: &str, product: &str, subgroup: &str, value: f64) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2016, 3, 1).unwrap(),
            value,
            value_usd: value / 3000.0,
            customer_id: customer.to_lowercase(),
            customer_name: customer.to_string(),
            product_id: product.to_lowercase(),
            product_description: product.to_string(),
            subgroup: subgroup.to_string(),
            department: "Antioquia".to_string(),
            city: "Medellin".to_string(),
            document_id: "F-1".to_string(),
        }
    }

    #[test]
    fn test_empty_data() {
        let data: Vec<Transaction> = vec![];
        assert!(by_subgroup(&data).is_empty());
        assert!(by_product(&data).is_empty());
        assert!(by_customer(&data).is_empty());
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let data = vec![
            tx("Ana", "Tornillo", "Ferreteria", 10.0),
            tx("Luis", "Pintura", "Acabados", 20.0),
            tx("Ana", "Brocha", "Acabados", 5.0),
        ];

        let result = by_subgroup(&data);
        assert_eq!(
            result,
            vec![
                ("Ferreteria".to_string(), 10.0),
                ("Acabados".to_string(), 25.0),
            ]
        );
    }

    #[test]
    fn test_customer_totals() {
        let data = vec![
            tx("Ana", "Tornillo", "Ferreteria", 10.0),
            tx("Luis", "Pintura", "Acabados", 20.0),
            tx("Ana", "Brocha", "Acabados", 5.0),
        ];

        let result = by_customer(&data);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0], ("Ana".to_string(), 15.0));
        assert_eq!(result[1], ("Luis".to_string(), 20.0));
    }

    #[test]
    fn test_single_product_sums_all_rows() {
        let data = vec![
            tx("Ana", "Tornillo", "Ferreteria", 10.0),
            tx("Luis", "Tornillo", "Ferreteria", 30.0),
        ];

        let result = by_product(&data);
        assert_eq!(result, vec![("Tornillo".to_string(), 40.0)]);
    }
}

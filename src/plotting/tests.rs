#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::analysis::{aggregate, rank};
    use crate::types::{Granularity, Transaction};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn tx(y: i32, m: u32, d: u32, value: f64) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            value,
            value_usd: value / 3000.0,
            customer_id: "c1".to_string(),
            customer_name: "Cliente".to_string(),
            product_id: "p1".to_string(),
            product_description: "Producto".to_string(),
            subgroup: "General".to_string(),
            department: "Antioquia".to_string(),
            city: "Medellin".to_string(),
            document_id: "F-1".to_string(),
        }
    }

    #[test]
    fn test_trend_chart_from_monthly_series() {
        let records = vec![
            tx(2015, 12, 3, 100.0),
            tx(2016, 1, 9, 200.0),
            tx(2016, 2, 1, 50.0),
        ];
        let series = aggregate(&records, Granularity::Month).unwrap();
        let chart = TrendChart::from_series(&series);

        assert_eq!(chart.title, "Evolución de Ventas Mensuales");
        assert_eq!(chart.x_title, "Fecha");
        let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Dic", "Ene", "Feb"]);
        assert_eq!(chart.annotations.len(), 1);
        assert_eq!(chart.annotations[0].year, "2016");
        assert!(chart.y_range.1 >= 200.0);
    }

    #[test]
    fn test_weekly_chart_axis_title() {
        let series = aggregate(&[tx(2016, 1, 25, 1.0)], Granularity::Week).unwrap();
        let chart = TrendChart::from_series(&series);
        assert_eq!(chart.x_title, "Semana");
        assert_eq!(chart.points[0].label, "1/25 - 1/31");
    }

    #[test]
    fn test_pareto_chart_highlights_top() {
        let ranked = rank(vec![("A", 50.0), ("B", 30.0), ("C", 15.0), ("D", 5.0)]).unwrap();
        let chart = ParetoChart::from_ranked(&ranked, 2);

        let highlighted: Vec<&str> = chart
            .rows
            .iter()
            .filter(|r| r.highlighted)
            .map(|r| r.key.as_str())
            .collect();
        assert_eq!(highlighted, vec!["A", "B"]);
        assert_eq!(chart.rows.last().unwrap().cumulative_share_pct, 100.0);
    }

    #[test]
    fn test_bar_chart_largest_last() {
        let ranked = rank(vec![("A", 50.0), ("B", 30.0), ("C", 15.0), ("D", 5.0)]).unwrap();
        let chart = BarChart::top(&ranked, 3, "Top 3 Subgrupos por Ventas Totales");

        assert_eq!(
            chart.bars,
            vec![
                ("C".to_string(), 15.0),
                ("B".to_string(), 30.0),
                ("A".to_string(), 50.0),
            ]
        );
    }

    #[test]
    fn test_adaptive_range() {
        let mut values = vec![10.0; 39];
        values.push(1000.0); // outlier

        let (min, max) = calculate_adaptive_range(&values);
        assert_eq!(min, 0.0);
        assert!(max < 1000.0); // Max should be scaled down due to outlier
        assert!(max > 10.0); // But should still be greater than the normal range
    }

    #[test]
    fn test_empty_chart() {
        let series = aggregate(&[], Granularity::Year).unwrap();
        let chart = TrendChart::from_series(&series);

        assert!(chart.points.is_empty());
        assert_eq!(chart.y_range, (0.0, 1.0));
        assert_eq!(chart.title, trend_title(Granularity::Year));
    }
}

//! Dashboard counters

use serde::Serialize;

use crate::model::ContractStatus;
use crate::model::RiskLevel;
use crate::model::TableRow;

/// Headline counts shown above the contracts table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    pub renewal_due: usize,
    pub expired: usize,
    pub high_risk: usize,
}

impl DashboardStats {
    /// Counts rows by their `status` and `risk_score` fields.
    ///
    /// Labels are read the way [`Contract`](crate::model::Contract) reads
    /// them, so `active` and `Active` count alike.
    pub fn from_rows<R: TableRow>(rows: &[R]) -> Self {
        let mut stats = Self {
            total: rows.len(),
            ..Self::default()
        };

        for row in rows {
            match label(row, "status").map(ContractStatus::from) {
                Some(ContractStatus::Active) => stats.active += 1,
                Some(ContractStatus::RenewalDue) => stats.renewal_due += 1,
                Some(ContractStatus::Expired) => stats.expired += 1,
                _ => {}
            }
            if label(row, "risk_score").map(RiskLevel::from) == Some(RiskLevel::High) {
                stats.high_risk += 1;
            }
        }

        stats
    }
}

fn label<R: TableRow>(row: &R, field: &str) -> Option<String> {
    row.value(field)
        .and_then(|value| value.as_str().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn counts_by_status_and_risk() {
        let rows = vec![
            Record::new().set("status", "Active").set("risk_score", "High"),
            Record::new().set("status", "Active").set("risk_score", "Low"),
            Record::new().set("status", "Renewal Due").set("risk_score", "High"),
            Record::new().set("status", "Expired"),
            Record::new().set("status", "active").set("risk_score", "high"),
            Record::new().set("status", "Draft"),
            Record::new(),
        ];

        let stats = DashboardStats::from_rows(&rows);
        assert_eq!(
            stats,
            DashboardStats {
                total: 7,
                active: 3,
                renewal_due: 1,
                expired: 1,
                high_risk: 3,
            }
        );
    }

    #[test]
    fn records_and_contracts_count_alike() {
        use crate::model::Contract;

        let records = vec![
            Record::new().set("doc_id", "a").set("status", "active"),
            Record::new()
                .set("doc_id", "b")
                .set("status", "RENEWAL DUE")
                .set("risk_score", "high"),
        ];
        let contracts: Vec<Contract> = records
            .iter()
            .map(|record| Contract::try_from(record).unwrap())
            .collect();

        assert_eq!(DashboardStats::from_rows(&records), DashboardStats::from_rows(&contracts));
        assert_eq!(DashboardStats::from_rows(&records).renewal_due, 1);
    }

    #[test]
    fn empty_input() {
        assert_eq!(DashboardStats::from_rows::<Record>(&[]), DashboardStats::default());
    }
}

//! # Report Aggregator Service
//!
//! The ReportAggregator produces the weekly and monthly sales reports.
//! Given an employee and a period it runs the read-only report queries
//! and shapes the rows into a complete payload: one zero-filled bucket
//! per calendar day, summary totals, the best-sellers ranking, the
//! payment-method breakdown, and (monthly) inventory movement, derived
//! KPIs, and best days.
//!
//! ## Flow
//!
//! ```text
//! 1. Resolve the period (anchor date or current week/month)
//!                ↓
//! 2. Run the report queries against PostgreSQL
//!                ↓
//! 3. Build the calendar skeleton, one zero bucket per day
//!                ↓
//! 4. Overlay query rows onto the skeleton by date
//!                ↓
//! 5. Merge the per-type rankings, compute KPIs
//!                ↓
//! 6. Return the structured payload to the API layer
//! ```
//!
//! ## Design Notes
//!
//! - The aggregator takes `user_id` explicitly on every call; there is
//!   no ambient current-user state.
//! - The best-sellers ranking is two-stage: phones and accessories are
//!   each ranked and limited independently in SQL, then merged here
//!   with a stable sort. An item can make the final list by topping
//!   its own type even when stronger sellers of the other type were
//!   cut by that type's limit.
//! - Everything after the queries is pure: the `build_*` functions
//!   take row structs and return payload structs, so the shaping logic
//!   is tested without a database.
//! - Any failed query fails the whole report. No partial payloads.

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use tracing::debug;

use crate::db::queries::{
    self, AccessoryDeltaRow, DailySalesRow, PaymentTotalsRow, PhoneDeltaRow, TopItemRow,
    TransferTotalsRow,
};
use crate::db::{Database, DatabaseError};
use crate::models::{
    AccessoryDeltas, BestDay, DailyBucket, InventoryDeltas, MonthlyReport, PaymentBreakdown,
    PhoneDeltas, ReportPeriodInfo, ReportSummary, TopItem, TransferSummary, WeeklyReport,
};
use crate::utils::round1;

/// Items in the weekly best-sellers list.
const TOP_ITEMS_WEEKLY: i64 = 5;

/// Items in the monthly best-sellers list.
const TOP_ITEMS_MONTHLY: i64 = 10;

/// Best days listed in the monthly report.
const BEST_DAYS: usize = 5;

/// Errors that can occur while computing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The anchor date or month string could not be understood.
    /// Rejected before any query runs.
    #[error("Invalid report period: {0}")]
    InvalidPeriod(String),

    /// A report query failed. The whole report is abandoned.
    #[error("Report data access failed: {0}")]
    DataAccess(#[from] DatabaseError),
}

/// Whether a report covers a week or a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Week,
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

/// The inclusive date range a report covers.
///
/// Computed once per request from the caller-supplied anchor (or the
/// current date) and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub granularity: Granularity,
}

impl ReportPeriod {
    /// The week containing (or starting at) the anchor.
    ///
    /// Without an anchor this is the current ISO week, Monday through
    /// Sunday. With an anchor, the week is the 7 days starting at the
    /// anchor date. The end is always `start + 6 days`: the window
    /// length never depends on what "this week" happens to be.
    pub fn week(anchor: Option<NaiveDate>, today: NaiveDate) -> Self {
        let start_date = anchor.unwrap_or_else(|| today.week(Weekday::Mon).first_day());
        Self {
            start_date,
            end_date: start_date + Duration::days(6),
            granularity: Granularity::Week,
        }
    }

    /// The month named by `anchor` (`YYYY-MM`), or the current month.
    pub fn month(anchor: Option<&str>, today: NaiveDate) -> Result<Self, ReportError> {
        let (year, month) = match anchor {
            Some(s) => parse_month(s)
                .ok_or_else(|| ReportError::InvalidPeriod(format!("Malformed month: {}", s)))?,
            None => (today.year(), today.month()),
        };

        let start_date = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| ReportError::InvalidPeriod(format!("No such month: {}-{:02}", year, month)))?;

        let first_of_next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end_date = first_of_next
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| ReportError::InvalidPeriod(format!("No such month: {}-{:02}", year, month)))?;

        Ok(Self {
            start_date,
            end_date,
            granularity: Granularity::Month,
        })
    }

    /// Number of calendar days in the period, inclusive.
    pub fn num_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    fn to_info(self) -> ReportPeriodInfo {
        ReportPeriodInfo {
            start_date: self.start_date,
            end_date: self.end_date,
            granularity: self.granularity.as_str().to_string(),
        }
    }
}

/// Parse a `YYYY-MM` string into (year, month).
///
/// Range checking is left to `NaiveDate`; this only splits and parses
/// the two numbers.
fn parse_month(s: &str) -> Option<(i32, u32)> {
    let (year_part, month_part) = s.split_once('-')?;
    if year_part.len() != 4 || month_part.is_empty() || month_part.len() > 2 {
        return None;
    }
    let year: i32 = year_part.parse().ok()?;
    let month: u32 = month_part.parse().ok()?;
    Some((year, month))
}

/// The report computation service.
///
/// Holds the database handle; every report request is a self-contained
/// read-only query sequence with no state shared across requests.
///
/// ## Usage
///
/// ```rust,ignore
/// let reports = ReportAggregator::new(db);
/// let weekly = reports.weekly_report(7, None).await?;
/// let monthly = reports.monthly_report(7, Some("2024-02")).await?;
/// ```
#[derive(Clone)]
pub struct ReportAggregator {
    /// Database connection for the report queries.
    db: Database,
}

impl ReportAggregator {
    /// Create a new ReportAggregator instance.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Compute the weekly report for one employee.
    ///
    /// `week_start` defaults to the Monday of the current ISO week.
    /// A user with no activity gets a fully-populated all-zero report;
    /// that is not an error.
    pub async fn weekly_report(
        &self,
        user_id: i32,
        week_start: Option<NaiveDate>,
    ) -> Result<WeeklyReport, ReportError> {
        let today = Utc::now().date_naive();
        let period = ReportPeriod::week(week_start, today);

        debug!(
            "Weekly report for user {} [{} .. {}]",
            user_id, period.start_date, period.end_date
        );

        let pool = self.db.pool();
        let daily_rows =
            queries::report_sales_by_day(pool, user_id, period.start_date, period.end_date).await?;
        let top_phones = queries::report_top_phones(
            pool, user_id, period.start_date, period.end_date, TOP_ITEMS_WEEKLY,
        ).await?;
        let top_accessories = queries::report_top_accessories(
            pool, user_id, period.start_date, period.end_date, TOP_ITEMS_WEEKLY,
        ).await?;
        let payment_rows =
            queries::report_payment_totals(pool, user_id, period.start_date, period.end_date).await?;

        let daily = build_daily_buckets(&period, &daily_rows);
        let summary = summarize(&daily);
        let top_items = merge_top_items(top_phones, top_accessories, TOP_ITEMS_WEEKLY as usize);
        let payment_breakdown = build_payment_breakdown(payment_rows);

        Ok(WeeklyReport {
            user_id,
            period: period.to_info(),
            daily,
            summary,
            top_items,
            payment_breakdown,
        })
    }

    /// Compute the monthly report for one employee.
    ///
    /// `month` is `YYYY-MM` and defaults to the current month. A
    /// malformed month is rejected before any query runs.
    pub async fn monthly_report(
        &self,
        user_id: i32,
        month: Option<&str>,
    ) -> Result<MonthlyReport, ReportError> {
        let today = Utc::now().date_naive();
        let period = ReportPeriod::month(month, today)?;

        debug!(
            "Monthly report for user {} [{} .. {}] ({} days)",
            user_id, period.start_date, period.end_date, period.num_days()
        );

        let pool = self.db.pool();
        let daily_rows =
            queries::report_sales_by_day(pool, user_id, period.start_date, period.end_date).await?;
        let top_phones = queries::report_top_phones(
            pool, user_id, period.start_date, period.end_date, TOP_ITEMS_MONTHLY,
        ).await?;
        let top_accessories = queries::report_top_accessories(
            pool, user_id, period.start_date, period.end_date, TOP_ITEMS_MONTHLY,
        ).await?;
        let payment_rows =
            queries::report_payment_totals(pool, user_id, period.start_date, period.end_date).await?;
        let phone_deltas =
            queries::report_phone_deltas(pool, user_id, period.start_date, period.end_date).await?;
        let accessory_deltas =
            queries::report_accessory_deltas(pool, user_id, period.start_date, period.end_date).await?;
        let transfer_totals =
            queries::report_transfer_totals(pool, user_id, period.start_date, period.end_date).await?;

        let daily = build_daily_buckets(&period, &daily_rows);
        let summary = summarize(&daily);
        let (days_with_sales, avg_daily_sales, avg_daily_revenue) = monthly_kpis(&daily);
        let top_items = merge_top_items(top_phones, top_accessories, TOP_ITEMS_MONTHLY as usize);
        let payment_breakdown = build_payment_breakdown(payment_rows);
        let best_days = best_days(&daily, BEST_DAYS);
        let inventory = build_inventory_deltas(phone_deltas, accessory_deltas, transfer_totals);

        Ok(MonthlyReport {
            user_id,
            period: period.to_info(),
            daily,
            summary,
            days_with_sales,
            avg_daily_sales,
            avg_daily_revenue,
            top_items,
            payment_breakdown,
            inventory,
            best_days,
        })
    }
}

// ============================================
// PURE SHAPING FUNCTIONS
// ============================================

/// Build one bucket per calendar day of the period, then overlay the
/// query rows by date. Days the query did not return stay zero-valued.
fn build_daily_buckets(period: &ReportPeriod, rows: &[DailySalesRow]) -> Vec<DailyBucket> {
    let mut buckets: Vec<DailyBucket> = period
        .start_date
        .iter_days()
        .take_while(|d| *d <= period.end_date)
        .enumerate()
        .map(|(i, date)| DailyBucket {
            date,
            day: (i + 1) as u32,
            sales_count: 0,
            revenue: 0,
            phone_count: 0,
            accessory_count: 0,
            accessory_units: 0,
        })
        .collect();

    for row in rows {
        let offset = (row.sale_date - period.start_date).num_days();
        if offset < 0 || offset >= buckets.len() as i64 {
            continue;
        }
        let bucket = &mut buckets[offset as usize];
        bucket.sales_count = row.sales_count;
        bucket.revenue = row.revenue;
        bucket.phone_count = row.phone_count;
        bucket.accessory_count = row.accessory_count;
        bucket.accessory_units = row.accessory_units;
    }

    buckets
}

/// Total the buckets into the summary block.
fn summarize(buckets: &[DailyBucket]) -> ReportSummary {
    let mut total_sales = 0;
    let mut total_revenue = 0;
    let mut phones_sold = 0;
    let mut accessories_sold = 0;
    let mut accessory_units = 0;

    for bucket in buckets {
        total_sales += bucket.sales_count;
        total_revenue += bucket.revenue;
        phones_sold += bucket.phone_count;
        accessories_sold += bucket.accessory_count;
        accessory_units += bucket.accessory_units;
    }

    ReportSummary::from_totals(
        total_sales,
        total_revenue,
        phones_sold,
        accessories_sold,
        accessory_units,
    )
}

/// Merge the per-type rankings into the final top-N list.
///
/// Both inputs are already ranked and limited within their own type.
/// The merged list is re-sorted by sales count descending with a
/// stable sort (ties keep per-type order, phones before accessories)
/// and truncated to `limit`.
fn merge_top_items(
    phones: Vec<TopItemRow>,
    accessories: Vec<TopItemRow>,
    limit: usize,
) -> Vec<TopItem> {
    let mut merged: Vec<TopItem> = phones
        .into_iter()
        .map(|row| to_top_item("phone", row))
        .chain(accessories.into_iter().map(|row| to_top_item("accessory", row)))
        .collect();

    merged.sort_by(|a, b| b.sales_count.cmp(&a.sales_count));
    merged.truncate(limit);
    merged
}

fn to_top_item(item_type: &str, row: TopItemRow) -> TopItem {
    TopItem {
        item_type: item_type.to_string(),
        item_id: row.item_id,
        name: row.name,
        sales_count: row.sales_count,
        units: row.units,
        revenue: row.revenue,
        avg_price: row.avg_price.round() as i64,
    }
}

/// Attach the per-method average to the payment totals.
///
/// The rows arrive ordered by total amount descending; that order is
/// preserved. The average is in cents, rounded to the nearest cent.
fn build_payment_breakdown(rows: Vec<PaymentTotalsRow>) -> Vec<PaymentBreakdown> {
    rows.into_iter()
        .map(|row| {
            let avg_amount = if row.transactions > 0 {
                (row.total_amount as f64 / row.transactions as f64).round() as i64
            } else {
                0
            };
            PaymentBreakdown {
                payment_method: row.payment_method,
                transactions: row.transactions,
                total_amount: row.total_amount,
                avg_amount,
            }
        })
        .collect()
}

/// Derive the monthly KPIs from the buckets.
///
/// Returns `(days_with_sales, avg_daily_sales, avg_daily_revenue)`.
/// Averages are per *active* day: a month with no sales yields
/// `(0, 0.0, 0)` rather than dividing by zero.
fn monthly_kpis(buckets: &[DailyBucket]) -> (i64, f64, i64) {
    let days_with_sales = buckets.iter().filter(|b| b.sales_count > 0).count() as i64;
    if days_with_sales == 0 {
        return (0, 0.0, 0);
    }

    let total_sales: i64 = buckets.iter().map(|b| b.sales_count).sum();
    let total_revenue: i64 = buckets.iter().map(|b| b.revenue).sum();

    let avg_daily_sales = round1(total_sales as f64 / days_with_sales as f64);
    // Cents rounded to a whole currency unit
    let avg_daily_revenue =
        ((total_revenue as f64 / days_with_sales as f64) / 100.0).round() as i64 * 100;

    (days_with_sales, avg_daily_sales, avg_daily_revenue)
}

/// The `n` best days of the month by revenue, descending, ties kept
/// in calendar order. Days without sales never appear.
fn best_days(buckets: &[DailyBucket], n: usize) -> Vec<BestDay> {
    let mut days: Vec<BestDay> = buckets
        .iter()
        .filter(|b| b.sales_count > 0)
        .map(|b| BestDay {
            date: b.date,
            sales_count: b.sales_count,
            revenue: b.revenue,
        })
        .collect();

    days.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    days.truncate(n);
    days
}

/// Map the delta query rows into the response block.
fn build_inventory_deltas(
    phones: PhoneDeltaRow,
    accessories: AccessoryDeltaRow,
    transfers: TransferTotalsRow,
) -> InventoryDeltas {
    InventoryDeltas {
        phones: PhoneDeltas {
            added: phones.added,
            sold: phones.sold,
            in_stock: phones.in_stock,
            transferred: phones.transferred,
            unavailable: phones.unavailable,
        },
        accessories: AccessoryDeltas {
            added: accessories.added,
            units_in_stock: accessories.units_in_stock,
            in_stock: accessories.in_stock,
            out_of_stock: accessories.out_of_stock,
            unavailable: accessories.unavailable,
        },
        transfers: TransferSummary {
            transfers: transfers.transfers,
            units: transfers.units,
            phone_transfers: transfers.phone_transfers,
            accessory_transfers: transfers.accessory_transfers,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sales_row(d: NaiveDate, count: i64, revenue: i64) -> DailySalesRow {
        DailySalesRow {
            sale_date: d,
            sales_count: count,
            revenue,
            phone_count: count,
            accessory_count: 0,
            accessory_units: 0,
        }
    }

    fn top_row(item_id: i32, name: &str, sales_count: i64, revenue: i64) -> TopItemRow {
        TopItemRow {
            item_id,
            name: name.to_string(),
            sales_count,
            units: sales_count,
            revenue,
            avg_price: if sales_count > 0 {
                revenue as f64 / sales_count as f64
            } else {
                0.0
            },
        }
    }

    // ==========================================
    // PERIOD RESOLUTION
    // ==========================================

    #[test]
    fn test_week_defaults_to_current_monday() {
        // 2024-06-05 is a Wednesday
        let period = ReportPeriod::week(None, date(2024, 6, 5));
        assert_eq!(period.start_date, date(2024, 6, 3));
        assert_eq!(period.end_date, date(2024, 6, 9));
        assert_eq!(period.num_days(), 7);
    }

    #[test]
    fn test_week_with_explicit_anchor_is_seven_days() {
        // A historical anchor far from "today" still yields a 7-day window
        let period = ReportPeriod::week(Some(date(2024, 1, 10)), date(2024, 6, 5));
        assert_eq!(period.start_date, date(2024, 1, 10));
        assert_eq!(period.end_date, date(2024, 1, 16));
        assert_eq!(period.num_days(), 7);
    }

    #[test]
    fn test_month_defaults_to_current_month() {
        let period = ReportPeriod::month(None, date(2024, 6, 15)).unwrap();
        assert_eq!(period.start_date, date(2024, 6, 1));
        assert_eq!(period.end_date, date(2024, 6, 30));
    }

    #[test]
    fn test_month_leap_february_has_29_days() {
        let period = ReportPeriod::month(Some("2024-02"), date(2024, 6, 15)).unwrap();
        assert_eq!(period.num_days(), 29);
        assert_eq!(period.end_date, date(2024, 2, 29));
    }

    #[test]
    fn test_month_december_rollover() {
        let period = ReportPeriod::month(Some("2023-12"), date(2024, 6, 15)).unwrap();
        assert_eq!(period.end_date, date(2023, 12, 31));
    }

    #[test]
    fn test_malformed_month_rejected() {
        let today = date(2024, 6, 15);
        assert!(matches!(
            ReportPeriod::month(Some("2024-13"), today),
            Err(ReportError::InvalidPeriod(_))
        ));
        assert!(matches!(
            ReportPeriod::month(Some("garbage"), today),
            Err(ReportError::InvalidPeriod(_))
        ));
        assert!(matches!(
            ReportPeriod::month(Some(""), today),
            Err(ReportError::InvalidPeriod(_))
        ));
        assert!(matches!(
            ReportPeriod::month(Some("24-02"), today),
            Err(ReportError::InvalidPeriod(_))
        ));
    }

    // ==========================================
    // BUCKETS & SUMMARY
    // ==========================================

    #[test]
    fn test_buckets_cover_every_day_zero_filled() {
        let period = ReportPeriod::week(Some(date(2024, 6, 3)), date(2024, 6, 5));
        let buckets = build_daily_buckets(&period, &[]);

        assert_eq!(buckets.len(), 7);
        for (i, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.day, (i + 1) as u32);
            assert_eq!(bucket.sales_count, 0);
            assert_eq!(bucket.revenue, 0);
        }
        assert_eq!(buckets[0].date, date(2024, 6, 3));
        assert_eq!(buckets[6].date, date(2024, 6, 9));
    }

    #[test]
    fn test_single_monday_sale_week() {
        // One 100.00 sale on Monday 2024-06-03, nothing else all week
        let period = ReportPeriod::week(Some(date(2024, 6, 3)), date(2024, 6, 5));
        let rows = vec![sales_row(date(2024, 6, 3), 1, 10_000)];

        let buckets = build_daily_buckets(&period, &rows);
        let summary = summarize(&buckets);

        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].sales_count, 1);
        assert_eq!(buckets[0].revenue, 10_000);
        for bucket in &buckets[1..] {
            assert_eq!(bucket.sales_count, 0);
            assert_eq!(bucket.revenue, 0);
        }
        assert_eq!(summary.total_sales, 1);
        assert_eq!(summary.total_revenue, 10_000);
        assert_eq!(summary.formatted_revenue, "100.00");
    }

    #[test]
    fn test_bucket_counts_match_summary() {
        let period = ReportPeriod::month(Some("2024-02"), date(2024, 6, 15)).unwrap();
        let rows = vec![
            sales_row(date(2024, 2, 1), 3, 90_000),
            sales_row(date(2024, 2, 14), 5, 150_000),
            sales_row(date(2024, 2, 29), 2, 60_000),
        ];

        let buckets = build_daily_buckets(&period, &rows);
        let summary = summarize(&buckets);

        assert_eq!(buckets.len(), 29);
        let bucket_total: i64 = buckets.iter().map(|b| b.sales_count).sum();
        assert_eq!(bucket_total, summary.total_sales);
        assert_eq!(summary.total_sales, 10);
        assert_eq!(summary.total_revenue, 300_000);
        // Day numbers equal day-of-month
        assert_eq!(buckets[13].date, date(2024, 2, 14));
        assert_eq!(buckets[13].day, 14);
        assert_eq!(buckets[13].sales_count, 5);
    }

    #[test]
    fn test_empty_period_is_all_zero_not_error() {
        let period = ReportPeriod::week(Some(date(2024, 6, 3)), date(2024, 6, 5));
        let buckets = build_daily_buckets(&period, &[]);
        let summary = summarize(&buckets);

        assert_eq!(summary.total_sales, 0);
        assert_eq!(summary.total_revenue, 0);
        assert_eq!(summary.phones_sold, 0);
        assert_eq!(summary.accessories_sold, 0);
        assert_eq!(summary.accessory_units, 0);
    }

    // ==========================================
    // TOP-N MERGE
    // ==========================================

    #[test]
    fn test_merge_keeps_per_type_winners() {
        // Phones sold 10, 9, 8; accessories 7 and 2. With limit 3 the
        // accessory that topped its own ranking still loses the merge
        // to stronger phones.
        let phones = vec![
            top_row(1, "Phone A", 10, 100),
            top_row(2, "Phone B", 9, 90),
            top_row(3, "Phone C", 8, 80),
        ];
        let accessories = vec![
            top_row(20, "Charger", 7, 70),
            top_row(21, "Case", 2, 20),
        ];

        let merged = merge_top_items(phones, accessories, 3);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].name, "Phone A");
        assert_eq!(merged[1].name, "Phone B");
        assert_eq!(merged[2].name, "Phone C");
    }

    #[test]
    fn test_merge_is_sorted_and_truncated() {
        let phones = vec![top_row(1, "Phone A", 3, 100)];
        let accessories = vec![
            top_row(20, "Charger", 9, 70),
            top_row(21, "Case", 5, 20),
        ];

        let merged = merge_top_items(phones, accessories, 2);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "Charger");
        assert_eq!(merged[1].name, "Case");
        assert!(merged[0].sales_count >= merged[1].sales_count);
    }

    #[test]
    fn test_merge_tie_keeps_phones_first() {
        let phones = vec![top_row(1, "Phone A", 4, 100)];
        let accessories = vec![top_row(20, "Charger", 4, 70)];

        let merged = merge_top_items(phones, accessories, 5);

        assert_eq!(merged[0].item_type, "phone");
        assert_eq!(merged[1].item_type, "accessory");
    }

    #[test]
    fn test_merge_never_exceeds_limit() {
        let phones: Vec<TopItemRow> =
            (1..=5).map(|i| top_row(i, "P", 10 - i as i64, 10)).collect();
        let accessories: Vec<TopItemRow> =
            (10..=14).map(|i| top_row(i, "A", 20 - i as i64, 10)).collect();

        let merged = merge_top_items(phones, accessories, 5);
        assert_eq!(merged.len(), 5);
    }

    // ==========================================
    // PAYMENT BREAKDOWN
    // ==========================================

    #[test]
    fn test_payment_breakdown_totals_and_average() {
        let rows = vec![
            PaymentTotalsRow {
                payment_method: "cash".to_string(),
                transactions: 3,
                total_amount: 10_000,
            },
            PaymentTotalsRow {
                payment_method: "card".to_string(),
                transactions: 2,
                total_amount: 5_000,
            },
        ];

        let breakdown = build_payment_breakdown(rows);

        assert_eq!(breakdown.len(), 2);
        // Order preserved (already descending by total)
        assert_eq!(breakdown[0].payment_method, "cash");
        // 10000 / 3 = 3333.33.., rounds to 3333 cents
        assert_eq!(breakdown[0].avg_amount, 3_333);
        assert_eq!(breakdown[1].avg_amount, 2_500);

        // Breakdown totals add up to the period revenue
        let total: i64 = breakdown.iter().map(|p| p.total_amount).sum();
        assert_eq!(total, 15_000);
    }

    // ==========================================
    // MONTHLY KPIS & BEST DAYS
    // ==========================================

    #[test]
    fn test_kpis_no_active_days() {
        let period = ReportPeriod::month(Some("2024-03"), date(2024, 6, 15)).unwrap();
        let buckets = build_daily_buckets(&period, &[]);

        let (days_with_sales, avg_sales, avg_revenue) = monthly_kpis(&buckets);
        assert_eq!(days_with_sales, 0);
        assert_eq!(avg_sales, 0.0);
        assert_eq!(avg_revenue, 0);
    }

    #[test]
    fn test_kpis_rounding() {
        let period = ReportPeriod::month(Some("2024-03"), date(2024, 6, 15)).unwrap();
        let rows = vec![
            sales_row(date(2024, 3, 1), 2, 12_000),
            sales_row(date(2024, 3, 2), 3, 9_000),
            sales_row(date(2024, 3, 3), 2, 4_000),
        ];
        let buckets = build_daily_buckets(&period, &rows);

        let (days_with_sales, avg_sales, avg_revenue) = monthly_kpis(&buckets);
        assert_eq!(days_with_sales, 3);
        // 7 sales / 3 days = 2.333.. -> 2.3
        assert_eq!(avg_sales, 2.3);
        // 25000 cents / 3 days = 8333.3 cents -> 83.33 units -> 83 units
        assert_eq!(avg_revenue, 8_300);
    }

    #[test]
    fn test_best_days_ranked_by_revenue() {
        let period = ReportPeriod::month(Some("2024-03"), date(2024, 6, 15)).unwrap();
        let rows = vec![
            sales_row(date(2024, 3, 5), 1, 5_000),
            sales_row(date(2024, 3, 10), 4, 20_000),
            sales_row(date(2024, 3, 11), 2, 20_000),
            sales_row(date(2024, 3, 20), 1, 1_000),
        ];
        let buckets = build_daily_buckets(&period, &rows);

        let days = best_days(&buckets, 5);

        assert_eq!(days.len(), 4);
        assert_eq!(days[0].date, date(2024, 3, 10));
        // Equal revenue keeps calendar order
        assert_eq!(days[1].date, date(2024, 3, 11));
        assert_eq!(days[2].date, date(2024, 3, 5));
        assert_eq!(days[3].date, date(2024, 3, 20));
    }

    #[test]
    fn test_best_days_truncates() {
        let period = ReportPeriod::month(Some("2024-03"), date(2024, 6, 15)).unwrap();
        let rows: Vec<DailySalesRow> = (1..=10)
            .map(|d| sales_row(date(2024, 3, d), 1, d as i64 * 1_000))
            .collect();
        let buckets = build_daily_buckets(&period, &rows);

        let days = best_days(&buckets, 5);
        assert_eq!(days.len(), 5);
        assert_eq!(days[0].revenue, 10_000);
    }
}

use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use strum::IntoEnumIterator;
use woothee::parser::Parser;

use super::browser::browser_family;
use super::device::{DeviceType, classify_device};
use crate::storage::ScanLog;

const BROWSER_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceShare {
    pub device: DeviceType,
    pub count: u64,
    /// Share of all scans in percent, rounded to one decimal.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserShare {
    pub browser: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentScan {
    pub scanned_at: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
    pub device: DeviceType,
}

/// Aggregated view of one QR code's scan window.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub total_scans: u64,
    pub scans_per_day: Vec<DailyCount>,
    pub last_7_days: u64,
    pub today: u64,
    pub device_breakdown: Vec<DeviceShare>,
    pub browser_breakdown: Vec<BrowserShare>,
    pub recent_scans: Vec<RecentScan>,
}

impl AnalyticsReport {
    /// Largest daily count, for scaling the bar chart.
    pub fn peak_day(&self) -> u64 {
        self.scans_per_day.iter().map(|d| d.count).max().unwrap_or(0)
    }
}

/// 构建完整报告
///
/// `scans` 须为窗口内按时间升序的扫码记录；`total_scans` 即其条数，
/// 不在日期桶范围内的记录只计入总数。
pub fn build_report(
    scans: &[ScanLog],
    now: DateTime<Utc>,
    window_days: u32,
    recent_limit: usize,
) -> AnalyticsReport {
    let scans_per_day = daily_histogram(scans, now.date_naive(), window_days);
    let last_7_days = scans_per_day.iter().rev().take(7).map(|d| d.count).sum();
    let today = scans_per_day.last().map(|d| d.count).unwrap_or(0);

    AnalyticsReport {
        total_scans: scans.len() as u64,
        last_7_days,
        today,
        scans_per_day,
        device_breakdown: device_breakdown(scans),
        browser_breakdown: browser_breakdown(scans, BROWSER_TOP_N),
        recent_scans: recent_scans(scans, recent_limit),
    }
}

/// 生成 `days` 个连续日期桶（today-(days-1) … today），无数据的日期补 0
pub fn daily_histogram(scans: &[ScanLog], today: NaiveDate, days: u32) -> Vec<DailyCount> {
    let mut buckets: Vec<DailyCount> = (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| DailyCount { date, count: 0 })
        .collect();

    let Some(first) = buckets.first().map(|b| b.date) else {
        return buckets;
    };

    for scan in scans {
        let date = scan.scanned_at.date_naive();
        if date < first || date > today {
            continue;
        }
        let index = (date - first).num_days() as usize;
        if let Some(bucket) = buckets.get_mut(index) {
            bucket.count += 1;
        }
    }

    buckets
}

/// 设备分布：固定顺序 Mobile, Desktop, Tablet, Other，丢弃 0 计数
pub fn device_breakdown(scans: &[ScanLog]) -> Vec<DeviceShare> {
    let mut counts: HashMap<DeviceType, u64> = HashMap::new();
    for scan in scans {
        *counts.entry(classify_device(&scan.user_agent)).or_default() += 1;
    }

    let total = scans.len() as f64;
    DeviceType::iter()
        .filter_map(|device| {
            let count = counts.get(&device).copied().unwrap_or(0);
            (count > 0).then(|| DeviceShare {
                device,
                count,
                percentage: round_one_decimal(count as f64 * 100.0 / total),
            })
        })
        .collect()
}

/// 浏览器分布，按次数降序取前 `top_n`，同次数按名称排序
pub fn browser_breakdown(scans: &[ScanLog], top_n: usize) -> Vec<BrowserShare> {
    let parser = Parser::new();
    let mut counts: HashMap<String, u64> = HashMap::new();
    for scan in scans {
        *counts
            .entry(browser_family(&parser, &scan.user_agent))
            .or_default() += 1;
    }

    let mut shares: Vec<BrowserShare> = counts
        .into_iter()
        .map(|(browser, count)| BrowserShare { browser, count })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.browser.cmp(&b.browser)));
    shares.truncate(top_n);
    shares
}

/// 最近的 `limit` 条记录，新的在前
pub fn recent_scans(scans: &[ScanLog], limit: usize) -> Vec<RecentScan> {
    scans
        .iter()
        .rev()
        .take(limit)
        .map(|scan| RecentScan {
            scanned_at: scan.scanned_at,
            ip_address: scan.ip_address.clone(),
            user_agent: scan.user_agent.clone(),
            device: classify_device(&scan.user_agent),
        })
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

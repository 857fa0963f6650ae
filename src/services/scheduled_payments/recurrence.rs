//! 定期付款的日期推算

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::models::scheduled_payments::Recurrence;

/// 计算下一次执行日期，结果总是晚于 `last_run`
///
/// 按月重复时先加一个自然月（1 月 31 日 → 2 月末），若设置了 `day_of_month`
/// 再把日期固定到该日，超出当月天数时取月末。按年重复时 2 月 29 日落到平年的 2 月 28 日。
pub fn next_run_date(
    last_run: NaiveDate,
    recurrence: Recurrence,
    day_of_month: Option<u32>,
) -> NaiveDate {
    match recurrence {
        Recurrence::Daily => add_days(last_run, 1),
        Recurrence::Weekly => add_days(last_run, 7),
        Recurrence::Biweekly => add_days(last_run, 14),
        Recurrence::Monthly => {
            let next = add_months(last_run, 1);
            match day_of_month {
                Some(day) => pin_day(next, day),
                None => next,
            }
        }
        Recurrence::Yearly => add_months(last_run, 12),
    }
}

/// 下一次执行日期已超过结束日期时，规则应停用
pub fn is_finished(next_run: NaiveDate, end_date: Option<NaiveDate>) -> bool {
    end_date.is_some_and(|end| next_run > end)
}

/// 从 `from` 开始（含）列出接下来 `count` 个执行日期，遇到结束日期即停止
pub fn upcoming_dates(
    from: NaiveDate,
    recurrence: Recurrence,
    day_of_month: Option<u32>,
    end_date: Option<NaiveDate>,
    count: usize,
) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut current = from;
    while dates.len() < count && !is_finished(current, end_date) {
        dates.push(current);
        current = next_run_date(current, recurrence, day_of_month);
    }
    dates
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

// chrono 的按月加法会把超出的日期截到月末
fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

fn pin_day(date: NaiveDate, day: u32) -> NaiveDate {
    let day = day.clamp(1, last_day_of_month(date.year(), date.month()));
    date.with_day(day).unwrap_or(date)
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_fixed_intervals() {
        assert_eq!(next_run_date(d(2025, 1, 31), Recurrence::Daily, None), d(2025, 2, 1));
        assert_eq!(next_run_date(d(2025, 12, 29), Recurrence::Weekly, None), d(2026, 1, 5));
        assert_eq!(next_run_date(d(2025, 2, 20), Recurrence::Biweekly, None), d(2025, 3, 6));
    }

    #[test]
    fn test_monthly_clamps_to_month_end() {
        assert_eq!(next_run_date(d(2025, 1, 31), Recurrence::Monthly, None), d(2025, 2, 28));
        assert_eq!(next_run_date(d(2024, 1, 31), Recurrence::Monthly, None), d(2024, 2, 29));
        assert_eq!(next_run_date(d(2025, 12, 15), Recurrence::Monthly, None), d(2026, 1, 15));
    }

    #[test]
    fn test_monthly_with_day_of_month() {
        assert_eq!(
            next_run_date(d(2025, 3, 1), Recurrence::Monthly, Some(15)),
            d(2025, 4, 15)
        );
        assert_eq!(
            next_run_date(d(2025, 1, 15), Recurrence::Monthly, Some(31)),
            d(2025, 2, 28)
        );
        assert_eq!(
            next_run_date(d(2024, 1, 15), Recurrence::Monthly, Some(31)),
            d(2024, 2, 29)
        );
        // 月末被截断后，下个月恢复到指定日
        assert_eq!(
            next_run_date(d(2025, 2, 28), Recurrence::Monthly, Some(31)),
            d(2025, 3, 31)
        );
    }

    #[test]
    fn test_yearly_leap_day() {
        assert_eq!(next_run_date(d(2024, 2, 29), Recurrence::Yearly, None), d(2025, 2, 28));
        assert_eq!(next_run_date(d(2025, 6, 1), Recurrence::Yearly, None), d(2026, 6, 1));
    }

    #[test]
    fn test_result_always_after_input() {
        let start = d(2024, 1, 1);
        for recurrence in Recurrence::ALL.iter().copied() {
            for day_of_month in [None, Some(1), Some(15), Some(31)] {
                let mut current = start;
                for _ in 0..400 {
                    let next = next_run_date(current, recurrence, day_of_month);
                    assert!(next > current, "{recurrence} {day_of_month:?} {current}");
                    current = next;
                }
            }
        }
    }

    #[test]
    fn test_is_finished() {
        assert!(!is_finished(d(2025, 5, 1), None));
        assert!(!is_finished(d(2025, 5, 1), Some(d(2025, 5, 1))));
        assert!(is_finished(d(2025, 5, 2), Some(d(2025, 5, 1))));
    }

    #[test]
    fn test_upcoming_dates_stops_at_end() {
        let dates = upcoming_dates(
            d(2025, 1, 1),
            Recurrence::Weekly,
            None,
            Some(d(2025, 1, 20)),
            10,
        );
        assert_eq!(dates, vec![d(2025, 1, 1), d(2025, 1, 8), d(2025, 1, 15)]);
        assert_eq!(
            upcoming_dates(d(2025, 1, 1), Recurrence::Daily, None, None, 3).len(),
            3
        );
    }
}

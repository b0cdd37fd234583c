//! 農曆年份編碼表，涵蓋 1900 至 2100 年。
//!
//! 每年以一個 20 位整數編碼：
//!
//! - 位 0..=3：閏月序號，0 表示該年無閏月
//! - 位 4..=15：自高位起分別為正月至臘月，置位為大月（30 日），否則為小月（29 日）
//! - 位 16：閏月為大月則置位
//!
//! 曆元為 1900 年正月初一，即公曆 1900 年 1 月 31 日。

use std::ops::RangeInclusive;

/// 編碼表支持的年份
pub const YEARS: RangeInclusive<i32> = 1900..=2100;

/// 曆元（1900 年正月初一）的儒略日數
pub const EPOCH_JDN: u32 = 2_415_051;

#[rustfmt::skip]
static INFO: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x06e95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x055c0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04bd7, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520,                                                                                   // 2100
];

/// 各年正月初一距曆元的日數，末項為 2101 年正月初一（即 2100 年末日之次日）。
static NEW_YEAR_OFFSETS: [u32; 202] = {
    let mut out = [0; 202];
    let mut i = 0;
    while i < INFO.len() {
        out[i + 1] = out[i] + encoded_year_days(INFO[i]);
        i += 1;
    }
    out
};

const fn encoded_year_days(info: u32) -> u32 {
    let mut sum = 348;
    let mut bit = 0x8000;
    while bit > 0x8 {
        if info & bit != 0 {
            sum += 1;
        }
        bit >>= 1;
    }
    sum + encoded_leap_days(info)
}

const fn encoded_leap_days(info: u32) -> u32 {
    match info & 0xf {
        0 => 0,
        _ if info & 0x10000 != 0 => 30,
        _ => 29,
    }
}

fn info(year: i32) -> Option<u32> {
    if !YEARS.contains(&year) {
        return None;
    }
    INFO.get((year - 1900) as usize).copied()
}

/// 取得該年閏月序號，無閏月為 0；年份不在表內則返回 `None`。
///
/// # 用例
///
/// ```
/// use abonilo::chinese::table;
///
/// assert_eq!(Some(2), table::leap_month(2023));
/// assert_eq!(Some(0), table::leap_month(2024));
/// assert_eq!(None, table::leap_month(1899));
/// ```
pub fn leap_month(year: i32) -> Option<u32> {
    info(year).map(|info| info & 0xf)
}

/// 取得該年閏月日數，無閏月為 0。
pub fn leap_days(year: i32) -> Option<u32> {
    info(year).map(encoded_leap_days)
}

/// 取得該年第 `month` 個平月的日數（29 或 30）。
///
/// 年份不在表內或 `month` 不在 `1..=12` 間則返回 `None`。
pub fn month_days(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    info(year).map(|info| if info & (0x10000 >> month) != 0 { 30 } else { 29 })
}

/// 取得該年總日數，即十二個平月與閏月日數之和。
///
/// # 用例
///
/// ```
/// use abonilo::chinese::table;
///
/// assert_eq!(Some(384), table::year_days(2023));
/// ```
pub fn year_days(year: i32) -> Option<u32> {
    info(year).map(encoded_year_days)
}

/// 取得該年正月初一距曆元的日數。
pub fn new_year_offset(year: i32) -> Option<u32> {
    info(year)?;
    NEW_YEAR_OFFSETS.get((year - 1900) as usize).copied()
}

/// 依距曆元的日數取得所在農曆年，返回 `(年, 該年正月初一距曆元日數)`。
///
/// 日數超出表末則返回 `None`。
pub fn year_for_offset(offset: u32) -> Option<(i32, u32)> {
    let idx = NEW_YEAR_OFFSETS.partition_point(|&o| o <= offset) - 1;
    if idx >= INFO.len() {
        return None;
    }
    Some((1900 + idx as i32, NEW_YEAR_OFFSETS[idx]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;

    #[test]
    fn epoch() {
        assert_eq!(
            EPOCH_JDN,
            Date::from_gregorian(1900, 1, 31).unwrap().jdn()
        );
    }

    #[test]
    fn out_of_range() {
        for year in [1899, 2101, 0, -1, i32::MAX, i32::MIN] {
            assert_eq!(None, leap_month(year));
            assert_eq!(None, leap_days(year));
            assert_eq!(None, month_days(year, 1));
            assert_eq!(None, year_days(year));
            assert_eq!(None, new_year_offset(year));
        }
        assert_eq!(None, month_days(2000, 0));
        assert_eq!(None, month_days(2000, 13));
    }

    #[test]
    fn leap_months() {
        let data = [
            (1900, 8, 29),
            (2017, 6, 30),
            (2020, 4, 29),
            (2023, 2, 29),
            (2025, 6, 29),
            (2024, 0, 0),
            (2100, 0, 0),
        ];
        for (year, month, days) in data {
            assert_eq!(Some(month), leap_month(year), "{year}");
            assert_eq!(Some(days), leap_days(year), "{year}");
        }
    }

    #[test]
    fn month_lengths() {
        let std_2023 = [29, 30, 29, 30, 30, 29, 30, 30, 29, 30, 29, 30];
        for (month, std) in (1..).zip(std_2023) {
            assert_eq!(Some(std), month_days(2023, month), "month {month}");
        }
    }

    #[test]
    fn new_years() {
        let data = [
            (1900, "1900-01-31"),
            (2000, "2000-02-05"),
            (2017, "2017-01-28"),
            (2023, "2023-01-22"),
            (2024, "2024-02-10"),
            (2050, "2050-01-23"),
            (2100, "2100-02-09"),
        ];
        for (year, std) in data {
            let offset = new_year_offset(year).unwrap();
            let date = Date::from_jdn(EPOCH_JDN + offset);
            assert_eq!(std, date.iso_gregorian());
            assert_eq!(Some((year, offset)), year_for_offset(offset));
            if year > 1900 {
                let prev = year_for_offset(offset - 1).map(|(y, _)| y);
                assert_eq!(Some(year - 1), prev);
            }
        }
    }

    #[test]
    fn past_end_of_table() {
        let end = NEW_YEAR_OFFSETS[201];
        assert_eq!(Some(2100), year_for_offset(end - 1).map(|(y, _)| y));
        assert_eq!(None, year_for_offset(end));
        assert_eq!(
            "2101-01-29",
            Date::from_jdn(EPOCH_JDN + end).iso_gregorian()
        );
    }
}

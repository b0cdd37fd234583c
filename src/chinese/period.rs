//! 農曆日期運算：加減週期、農曆轉公曆、距某農曆日期的日數。

use crate::date::Date;
use crate::period::{Period, PeriodUnit};

use super::{LunarDate, LunarYear, Month, table};

/// 農曆週期運算失敗。
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum PeriodError {
    /// 加年、加月後的日期在任何日數下都無對應公曆日期。攜帶未經收窄的目標日期，
    /// 調用方可沿用該日期但應視之為不可靠。
    #[error("lunar date {0} has no solar counterpart")]
    Unrepresentable(LunarDate),
    /// 按日加減時，起點或終點超出支持範圍。
    #[error("day arithmetic on {0} leaves the supported range")]
    OutOfRange(LunarDate),
}

impl LunarDate {
    /// 將農曆日期轉為公曆日期。
    ///
    /// 結果與在公曆 `year - 1` 至 `year + 1` 三年內逐日搜索首個轉換後相符的日期相同；
    /// 因公曆轉農曆為單射，此處直接依編碼表推算再核對搜索範圍。
    ///
    /// 日期無效（閏月不符、日數超出）或對應公曆日期不在 1900 至 2100 年間則返回 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use abonilo::chinese::{LunarDate, Month::*};
    ///
    /// let date = LunarDate::new(2023, Leap(2), 1).to_date().unwrap();
    /// assert_eq!("2023-03-22", date.iso_gregorian());
    /// assert_eq!(None, LunarDate::new(2024, Leap(2), 1).to_date());
    /// ```
    pub fn to_date(&self) -> Option<Date> {
        let year = LunarYear::new(self.year)?;
        let len = year.month_len(self.month)?;
        if !(1..=len).contains(&self.day) {
            return None;
        }
        let date = year.new_moon(self.month)?.date + (self.day - 1) as i32;
        let solar_year = date.gregorian().0;
        let window = self.year - 1..=self.year + 1;
        (window.contains(&solar_year) && table::YEARS.contains(&solar_year)).then_some(date)
    }

    /// 加上一個週期，返回新的農曆日期。
    ///
    /// - 按年：年數相加，閏月僅在目標年閏月相同時保留，否則改為同序號平月；
    /// - 按月：以 1900 年正月為零點計算絕對月序後重新拆分年月，閏月規則同上；
    /// - 按日：轉為公曆加減日數後轉回農曆。
    ///
    /// 加年、加月後若日數超出目標月日數則收窄至月末，並逐日回退直至存在對應公曆日期；
    /// 回退至 0 仍無則返回 [`PeriodError::Unrepresentable`]，攜帶未收窄的日期；
    /// 目標年份超出 `i32` 時攜帶原日期。
    ///
    /// # 用例
    ///
    /// ```
    /// use abonilo::{Period, PeriodUnit};
    /// use abonilo::chinese::{LunarDate, Month::*};
    ///
    /// let date = LunarDate::new(2023, Leap(2), 15);
    /// let next = date.add_period(Period::new(1, PeriodUnit::Year)).unwrap();
    /// assert_eq!((2024, Common(2), 15), next.ymd());
    /// ```
    pub fn add_period(&self, period: Period) -> Result<LunarDate, PeriodError> {
        let (year, num) = match period.unit {
            PeriodUnit::Day => return self.add_days(period.value),
            PeriodUnit::Year => (self.year.checked_add(period.value), self.month.num() as i32),
            PeriodUnit::Month => {
                let total = (self.year as i64 - 1900) * 12
                    + (self.month.num() as i64 - 1)
                    + period.value as i64;
                let year = i32::try_from(total.div_euclid(12) + 1900).ok();
                (year, total.rem_euclid(12) as i32 + 1)
            }
        };
        let year = year.ok_or(PeriodError::Unrepresentable(*self))?;
        let num = num as u32;
        let keeps_leap = self.is_leap() && table::leap_month(year) == Some(num);
        let target = LunarDate::new(year, Month::new(num, keeps_leap), self.day);

        let max_day = target.month_len().unwrap_or(29);
        let mut day = self.day.min(max_day);
        while day > 0 {
            let candidate = LunarDate { day, ..target };
            if candidate.to_date().is_some() {
                return Ok(candidate);
            }
            day -= 1;
        }
        Err(PeriodError::Unrepresentable(target))
    }

    fn add_days(&self, days: i32) -> Result<LunarDate, PeriodError> {
        self.to_date()
            .and_then(|date| date.add_days(days))
            .and_then(LunarDate::from_date)
            .ok_or(PeriodError::OutOfRange(*self))
    }

    /// 取得自 `today` 至該農曆日期對應公曆日期的日數，已過則為負。
    ///
    /// 無對應公曆日期則返回 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use abonilo::Date;
    /// use abonilo::chinese::{LunarDate, Month::*};
    ///
    /// let today = Date::from_gregorian(2023, 1, 1).unwrap();
    /// assert_eq!(Some(21), LunarDate::new(2023, Common(1), 1).days_until(today));
    /// ```
    pub fn days_until(&self, today: Date) -> Option<i32> {
        self.to_date().map(|date| date - today)
    }
}

/// 同 [`LunarDate::to_date`]。
pub fn lunar_to_solar(lunar: &LunarDate) -> Option<Date> {
    lunar.to_date()
}

/// 同 [`LunarDate::add_period`]。
pub fn add_period(lunar: &LunarDate, period: Period) -> Result<LunarDate, PeriodError> {
    lunar.add_period(period)
}

/// 同 [`LunarDate::days_until`]。
pub fn days_until(lunar: &LunarDate, today: Date) -> Option<i32> {
    lunar.days_until(today)
}
